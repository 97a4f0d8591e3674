//! Per-property alignment of two types for side-by-side display.

use rustc_hash::FxHashMap;
use serde::Serialize;
use strum::AsRefStr;

use super::compare::{compare_nodes, union_names, Difference};
use super::parse::{parse_type, PropertyEntry, TypeNode};

/// How one aligned property line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlignStatus {
    /// Both sides agree.
    Ok,
    /// Both sides have the property with different value types.
    ValueMismatch,
    /// Only the target has the property.
    MissingInSource,
    /// Only the source has the property.
    ExtraInSource,
}

/// One aligned property line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedRow {
    /// Property name.
    pub property: String,
    /// Source side text, `name?: value` or a `(missing)` placeholder.
    pub source_display: String,
    /// Target side text, `name?: value` or an `(extra)` placeholder.
    pub target_display: String,
    /// Classification of the line.
    pub status: AlignStatus,
}

/// Side-by-side view of an actual and an expected type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AlignedDiff {
    /// Neither side is an object literal.
    Primitive {
        /// Source text.
        source: String,
        /// Target text.
        target: String,
        /// Whether the texts are identical.
        equal: bool,
    },
    /// At least one side is an object literal; one row per property.
    Object {
        /// Rows over the union of property names, source order first.
        rows: Vec<AlignedRow>,
    },
}

impl AlignedDiff {
    /// Whether any line differs between the two sides.
    pub fn has_differences(&self) -> bool {
        match self {
            Self::Primitive { equal, .. } => !equal,
            Self::Object { rows } => rows.iter().any(|r| r.status != AlignStatus::Ok),
        }
    }
}

/// Align two type strings property by property.
///
/// Classification comes from [`compare_types`](super::compare_types), keyed
/// by property name. When one side is not an object there are no
/// per-property differences, so rows fall back to presence on each side.
///
/// # Example
///
/// ```
/// use ts_error_analyzer::types::{align_types, AlignStatus, AlignedDiff};
///
/// let AlignedDiff::Object { rows } = align_types("{ a: string }", "{ a: number; b?: Date }") else {
///     panic!("expected object rows");
/// };
/// assert_eq!(rows[0].status, AlignStatus::ValueMismatch);
/// assert_eq!(rows[1].source_display, "b?: (missing)");
/// ```
pub fn align_types(source: &str, target: &str) -> AlignedDiff {
    let source_node = parse_type(source);
    let target_node = parse_type(target);

    if let (TypeNode::Primitive { value: s }, TypeNode::Primitive { value: t }) =
        (&source_node, &target_node)
    {
        return AlignedDiff::Primitive {
            source: s.clone(),
            target: t.clone(),
            equal: s == t,
        };
    }

    let differences = compare_nodes(source, target, &source_node, &target_node);
    let mut by_property: FxHashMap<&str, &Difference> = FxHashMap::default();
    for diff in &differences {
        if let Some(name) = diff.property() {
            by_property.entry(name).or_insert(diff);
        }
    }

    let source_obj = source_node.as_object();
    let target_obj = target_node.as_object();

    let rows = union_names(source_obj, target_obj)
        .into_iter()
        .map(|name| {
            let s = source_obj.and_then(|o| o.get(name));
            let t = target_obj.and_then(|o| o.get(name));
            let status = match by_property.get(name) {
                Some(Difference::ValueMismatch { .. }) => AlignStatus::ValueMismatch,
                Some(Difference::MissingInSource { .. }) => AlignStatus::MissingInSource,
                Some(Difference::ExtraInSource { .. }) => AlignStatus::ExtraInSource,
                _ => presence_status(s, t),
            };
            AlignedRow {
                property: name.to_owned(),
                source_display: side_display(s, t, "(missing)"),
                target_display: side_display(t, s, "(extra)"),
                status,
            }
        })
        .collect();

    AlignedDiff::Object { rows }
}

fn presence_status(source: Option<&PropertyEntry>, target: Option<&PropertyEntry>) -> AlignStatus {
    match (source, target) {
        (None, Some(_)) => AlignStatus::MissingInSource,
        (Some(_), None) => AlignStatus::ExtraInSource,
        _ => AlignStatus::Ok,
    }
}

/// Display one side, or a placeholder built from the other side's entry.
fn side_display(own: Option<&PropertyEntry>, other: Option<&PropertyEntry>, placeholder: &str) -> String {
    match (own, other) {
        (Some(entry), _) => entry.display(),
        (None, Some(entry)) => format!("{}{}: {}", entry.name, entry.optional_marker(), placeholder),
        (None, None) => String::new(),
    }
}
