//! Structural comparison of two type strings.
//!
//! The comparison is one level deep: property values are compared as
//! whitespace-normalized strings, never re-parsed.

use serde::Serialize;

use super::parse::{parse_type, ObjectType, TypeNode};

/// One difference between an actual (source) and expected (target) type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Difference {
    /// Property required by the target is absent from the source.
    MissingInSource {
        /// Property name.
        property: String,
        /// The target's value type.
        expected_type: String,
    },
    /// Property present in the source is absent from the target.
    ExtraInSource {
        /// Property name.
        property: String,
        /// The source's value type.
        actual_type: String,
    },
    /// Property present on both sides with different value types.
    ValueMismatch {
        /// Property name.
        property: String,
        /// The source's value type.
        actual_type: String,
        /// The target's value type.
        expected_type: String,
    },
    /// One side is an object literal, the other is not.
    StructureMismatch {
        /// Full source text.
        actual_text: String,
        /// Full target text.
        expected_text: String,
    },
    /// Both sides are primitives and their text differs.
    PrimitiveMismatch {
        /// Source text.
        actual: String,
        /// Target text.
        expected: String,
    },
}

impl Difference {
    /// The property this difference is about, if any.
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::MissingInSource { property, .. }
            | Self::ExtraInSource { property, .. }
            | Self::ValueMismatch { property, .. } => Some(property),
            Self::StructureMismatch { .. } | Self::PrimitiveMismatch { .. } => None,
        }
    }
}

/// Compare two type strings and list their differences.
///
/// - Two primitives differ iff their text differs.
/// - Two objects are compared property by property over the union of names,
///   source names first.
/// - An object against a primitive yields a single [`Difference::StructureMismatch`].
///
/// # Example
///
/// ```
/// use ts_error_analyzer::types::{compare_types, Difference};
///
/// let diffs = compare_types("{a: string}", "{a: string; b: number}");
/// assert_eq!(
///     diffs,
///     vec![Difference::MissingInSource {
///         property: "b".into(),
///         expected_type: "number".into(),
///     }]
/// );
/// ```
pub fn compare_types(source: &str, target: &str) -> Vec<Difference> {
    let source_node = parse_type(source);
    let target_node = parse_type(target);
    compare_nodes(source, target, &source_node, &target_node)
}

/// Compare two already-parsed nodes.
///
/// `source_text` and `target_text` are the original strings, reported
/// verbatim in a [`Difference::StructureMismatch`].
pub(crate) fn compare_nodes(
    source_text: &str,
    target_text: &str,
    source: &TypeNode,
    target: &TypeNode,
) -> Vec<Difference> {
    let mut differences = Vec::new();

    match (source, target) {
        (TypeNode::Primitive { value: s }, TypeNode::Primitive { value: t }) => {
            if s != t {
                differences.push(Difference::PrimitiveMismatch {
                    actual: s.clone(),
                    expected: t.clone(),
                });
            }
        }
        (TypeNode::Object(s), TypeNode::Object(t)) => {
            compare_objects(s, t, &mut differences);
        }
        _ => {}
    }

    if source.is_object() != target.is_object() {
        differences.push(Difference::StructureMismatch {
            actual_text: source_text.to_owned(),
            expected_text: target_text.to_owned(),
        });
    }

    differences
}

fn compare_objects(source: &ObjectType, target: &ObjectType, out: &mut Vec<Difference>) {
    for name in union_names(Some(source), Some(target)) {
        match (source.get(name), target.get(name)) {
            (None, Some(t)) => out.push(Difference::MissingInSource {
                property: name.to_owned(),
                expected_type: t.value_type.clone(),
            }),
            (Some(s), None) => out.push(Difference::ExtraInSource {
                property: name.to_owned(),
                actual_type: s.value_type.clone(),
            }),
            (Some(s), Some(t)) => {
                if normalize_type(&s.value_type) != normalize_type(&t.value_type) {
                    out.push(Difference::ValueMismatch {
                        property: name.to_owned(),
                        actual_type: s.value_type.clone(),
                        expected_type: t.value_type.clone(),
                    });
                }
            }
            (None, None) => {}
        }
    }
}

/// Property names of both sides, source order first, without repeats.
pub(crate) fn union_names<'a>(
    source: Option<&'a ObjectType>,
    target: Option<&'a ObjectType>,
) -> Vec<&'a str> {
    let mut names: Vec<&str> = source.map(|s| s.names().collect()).unwrap_or_default();
    if let Some(target) = target {
        for name in target.names() {
            if !source.is_some_and(|s| s.contains(name)) {
                names.push(name);
            }
        }
    }
    names
}

/// Collapse whitespace runs to a single space and trim.
pub fn normalize_type(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
