//! The table of recognized diagnostic line shapes.
//!
//! Every pattern is tried against every (trimmed) line, in table order. A
//! pattern may be suppressed when another pattern already matched the same
//! line. Adding a diagnostic shape means adding a row here.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use strum::IntoStaticStr;

use super::problem::{Problem, ProblemKind, TypeMismatch};
use crate::types::parse_object;

// ============================================================================
// Table Types
// ============================================================================

/// Identifies a row of the pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum PatternId {
    PropertyIncompatible,
    TypeMismatch,
    MissingProperties,
    NotExist,
    CannotFindName,
    CannotFindModule,
    DidYouMean,
    NoOverload,
    ImplicitAny,
    ArgumentMismatch,
    UnknownType,
    PossiblyUndefined,
    PossiblyNull,
    PossiblyNullOrUndefined,
    ArgumentCount,
    NotCallable,
    NotConstructable,
    MustReturn,
    Operator,
    Constraint,
    ConversionMistake,
    BaseProperty,
    MissingPropsFrom,
    UnintentionalComparison,
    UsedBeforeAssigned,
    NoInitializer,
    UndefinedNotAssignable,
    NullNotAssignable,
    GenericArgsRequired,
    TypeAsValue,
    ValueAsType,
    SyntaxExpected,
    InterfaceExtends,
    ClassImplements,
    IndexAccess,
    InvalidIndexType,
    CannotIndex,
}

impl PatternId {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Which path an emitted record is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// The nested-property path at this line.
    Current,
    /// Always the empty path.
    Root,
}

/// What a matched pattern contributes.
#[derive(Debug)]
pub(crate) enum Action {
    /// Enter a nested property.
    PushPath(String),
    /// Emit problem records.
    Emit(Vec<Emitted>),
    /// Annotate the preceding record with a "Did you mean" name.
    Suggest(String),
}

/// One record produced by a pattern.
#[derive(Debug)]
pub(crate) struct Emitted {
    /// Extra path segment below the scope path.
    pub subpath: Option<String>,
    pub problem: Problem,
}

impl Action {
    fn one(problem: impl Into<Problem>) -> Self {
        Self::Emit(vec![Emitted {
            subpath: None,
            problem: problem.into(),
        }])
    }
}

type Handler = fn(&Captures<'_>) -> Action;

pub(crate) struct Pattern {
    pub id: PatternId,
    pub regex: Regex,
    pub scope: Scope,
    /// Skip this row when the given row matched the same line.
    pub unless: Option<PatternId>,
    pub handler: Handler,
}

impl Pattern {
    fn new(id: PatternId, regex: &str, scope: Scope, handler: Handler) -> Self {
        Self {
            id,
            regex: Regex::new(regex).expect("diagnostic patterns are valid regexes"),
            scope,
            unless: None,
            handler,
        }
    }

    fn unless(mut self, id: PatternId) -> Self {
        self.unless = Some(id);
        self
    }
}

// ============================================================================
// Capture Helpers
// ============================================================================

/// Text of a capture group, empty if it did not participate.
fn cap(c: &Captures<'_>, i: usize) -> String {
    c.get(i).map_or_else(String::new, |m| m.as_str().to_owned())
}

/// Numeric capture group; saturates on overflow.
fn num(c: &Captures<'_>, i: usize) -> Option<u32> {
    c.get(i).map(|m| m.as_str().parse().unwrap_or(u32::MAX))
}

/// Split a comma-separated property list.
fn split_list(list: &str) -> Vec<String> {
    list.split(',').map(|p| p.trim().to_owned()).collect()
}

/// Split a property list, dropping the `and ` joiner and `N more` tails.
fn split_list_from(list: &str) -> Vec<String> {
    list.split(',')
        .map(|p| {
            let p = p.trim();
            p.strip_prefix("and")
                .filter(|rest| rest.starts_with(char::is_whitespace))
                .map_or(p, str::trim_start)
        })
        .filter(|p| !p.is_empty() && !p.contains(" more"))
        .map(str::to_owned)
        .collect()
}

// ============================================================================
// Type Mismatch
// ============================================================================

/// Handle `Type 'S' is not assignable to type 'T'`.
///
/// Properties of two object types where only the target is an array become
/// separate records one level down and replace the top-level record.
fn type_mismatch(c: &Captures<'_>) -> Action {
    let (source, target) = (cap(c, 1), cap(c, 2));
    let per_property = array_mismatches(&source, &target);

    if per_property.is_empty() {
        return Action::one(TypeMismatch::classify(&source, &target));
    }
    Action::Emit(per_property)
}

fn array_mismatches(source: &str, target: &str) -> Vec<Emitted> {
    if !source.starts_with('{') || !target.starts_with('{') {
        return Vec::new();
    }
    let source_props = parse_object(source);
    let target_props = parse_object(target);

    source_props
        .iter()
        .filter_map(|s| {
            let t = target_props.get(&s.name)?;
            let only_target_is_array = !t.value_type.is_empty()
                && t.value_type.contains("[]")
                && !s.value_type.contains("[]");
            only_target_is_array.then(|| Emitted {
                subpath: Some(s.name.clone()),
                problem: TypeMismatch::array(&s.value_type, &t.value_type).into(),
            })
        })
        .collect()
}

// ============================================================================
// Pattern Table
// ============================================================================

/// All patterns, in evaluation order.
pub(crate) static PATTERNS: LazyLock<Vec<Pattern>> = LazyLock::new(build_table);

fn build_table() -> Vec<Pattern> {
    use PatternId as P;
    use ProblemKind as K;
    use Scope::{Current, Root};

    vec![
        Pattern::new(
            P::PropertyIncompatible,
            r#"Types of property ['"]([^'"]+)['"] are incompatible"#,
            Current,
            |c| Action::PushPath(cap(c, 1)),
        ),
        Pattern::new(
            P::TypeMismatch,
            r#"Type ['"]([^'"]+)['"] is not assignable to type ['"]([^'"]+)['"]"#,
            Current,
            type_mismatch,
        ),
        Pattern::new(
            P::MissingProperties,
            r"is missing the following properties[^:]*: ([^.]+)",
            Current,
            |c| Action::one(K::Missing { missing_props: split_list(&cap(c, 1)) }),
        ),
        Pattern::new(
            P::NotExist,
            r#"Property ['"]([^'"]+)['"] does not exist on type ['"]([^'"]+)['"]"#,
            Current,
            |c| Action::one(K::NotExist { prop_name: cap(c, 1), on_type: cap(c, 2) }),
        ),
        Pattern::new(
            P::CannotFindName,
            r#"Cannot find name ['"]([^'"]+)['"]"#,
            Root,
            |c| Action::one(K::CannotFindName { name: cap(c, 1) }),
        ),
        Pattern::new(
            P::CannotFindModule,
            r#"Cannot find module ['"]([^'"]+)['"]"#,
            Root,
            |c| Action::one(K::CannotFindModule { module_name: cap(c, 1) }),
        ),
        Pattern::new(
            P::DidYouMean,
            r#"Did you mean ['"]([^'"]+)['"]\?"#,
            Current,
            |c| Action::Suggest(cap(c, 1)),
        ),
        Pattern::new(
            P::NoOverload,
            r"No overload matches this call",
            Current,
            |_| Action::one(K::NoOverload),
        ),
        Pattern::new(
            P::ImplicitAny,
            r#"Parameter ['"]([^'"]+)['"] implicitly has an ['"]any['"] type"#,
            Root,
            |c| Action::one(K::ImplicitAny { param_name: cap(c, 1) }),
        ),
        Pattern::new(
            P::ArgumentMismatch,
            r#"Argument of type ['"]([^'"]+)['"] is not assignable to parameter of type ['"]([^'"]+)['"]"#,
            Current,
            |c| Action::one(TypeMismatch::classify(&cap(c, 1), &cap(c, 2)).into_argument()),
        )
        .unless(P::TypeMismatch),
        Pattern::new(
            P::UnknownType,
            r#"Object is of type ['"]unknown['"]"#,
            Current,
            |_| Action::one(K::UnknownType),
        ),
        Pattern::new(
            P::PossiblyUndefined,
            r#"Object is possibly ['"]undefined['"]"#,
            Current,
            |_| Action::one(K::PossiblyUndefined),
        ),
        Pattern::new(
            P::PossiblyNull,
            r#"Object is possibly ['"]null['"]"#,
            Current,
            |_| Action::one(K::PossiblyNull),
        ),
        Pattern::new(
            P::PossiblyNullOrUndefined,
            r#"Object is possibly ['"]null['"] or ['"]undefined['"]"#,
            Current,
            |_| Action::one(K::PossiblyNullOrUndefined),
        ),
        Pattern::new(
            P::ArgumentCount,
            r"Expected (\d+)(?:-(\d+))? arguments?, but got (\d+)",
            Current,
            |c| {
                let min = num(c, 1).unwrap_or_default();
                Action::one(K::ArgumentCount {
                    expected_min: min,
                    expected_max: num(c, 2).unwrap_or(min),
                    got: num(c, 3).unwrap_or_default(),
                })
            },
        ),
        Pattern::new(
            P::NotCallable,
            r"This expression is not callable",
            Current,
            |_| Action::one(K::NotCallable),
        ),
        Pattern::new(
            P::NotConstructable,
            r"This expression is not constructable",
            Current,
            |_| Action::one(K::NotConstructable),
        ),
        Pattern::new(
            P::MustReturn,
            r#"A function whose declared type is neither ['"]void['"] nor ['"]any['"] must return a value"#,
            Current,
            |_| Action::one(K::MustReturn),
        ),
        Pattern::new(
            P::Operator,
            r#"Operator ['"]([^'"]+)['"] cannot be applied to types ['"]([^'"]+)['"] and ['"]([^'"]+)['"]"#,
            Current,
            |c| {
                Action::one(K::OperatorError {
                    operator: cap(c, 1),
                    left_type: cap(c, 2),
                    right_type: cap(c, 3),
                })
            },
        ),
        Pattern::new(
            P::Constraint,
            r#"Type ['"]([^'"]+)['"] does not satisfy the constraint ['"]([^'"]+)['"]"#,
            Current,
            |c| Action::one(K::ConstraintError { source_type: cap(c, 1), constraint: cap(c, 2) }),
        ),
        Pattern::new(
            P::ConversionMistake,
            r#"Conversion of type ['"]([^'"]+)['"] to type ['"]([^'"]+)['"] may be a mistake"#,
            Current,
            |c| Action::one(K::ConversionMistake { source_type: cap(c, 1), target_type: cap(c, 2) }),
        ),
        Pattern::new(
            P::BaseProperty,
            r#"Property ['"]([^'"]+)['"] in type ['"]([^'"]+)['"] is not assignable to the same property in base type ['"]([^'"]+)['"]"#,
            Current,
            |c| {
                Action::one(K::BasePropertyMismatch {
                    prop_name: cap(c, 1),
                    child_type: cap(c, 2),
                    base_type: cap(c, 3),
                })
            },
        ),
        Pattern::new(
            P::MissingPropsFrom,
            r#"Type ['"]([^'"]+)['"] is missing the following properties from type ['"]([^'"]+)['"]:\s*(.+)"#,
            Current,
            |c| {
                Action::one(K::MissingPropsFrom {
                    source_type: cap(c, 1),
                    target_type: cap(c, 2),
                    missing_props: split_list_from(&cap(c, 3)),
                })
            },
        )
        .unless(P::MissingProperties),
        Pattern::new(
            P::UnintentionalComparison,
            r#"This (?:condition|comparison) will always return ['"]([^'"]+)['"]|This comparison appears to be unintentional"#,
            Current,
            |c| {
                let result = c.get(1).map_or("false", |m| m.as_str()).to_owned();
                Action::one(K::UnintentionalComparison { result })
            },
        ),
        Pattern::new(
            P::UsedBeforeAssigned,
            r#"Variable ['"]([^'"]+)['"] is used before being assigned"#,
            Root,
            |c| Action::one(K::UsedBeforeAssigned { var_name: cap(c, 1) }),
        ),
        Pattern::new(
            P::NoInitializer,
            r#"Property ['"]([^'"]+)['"] has no initializer and is not definitely assigned"#,
            Root,
            |c| Action::one(K::NoInitializer { prop_name: cap(c, 1) }),
        ),
        Pattern::new(
            P::UndefinedNotAssignable,
            r#"Type ['"]undefined['"] is not assignable to type ['"]([^'"]+)['"]"#,
            Current,
            |c| Action::one(K::UndefinedNotAssignable { target_type: cap(c, 1) }),
        )
        .unless(P::TypeMismatch),
        Pattern::new(
            P::NullNotAssignable,
            r#"Type ['"]null['"] is not assignable to type ['"]([^'"]+)['"]"#,
            Current,
            |c| Action::one(K::NullNotAssignable { target_type: cap(c, 1) }),
        )
        .unless(P::TypeMismatch),
        Pattern::new(
            P::GenericArgsRequired,
            r#"Generic type ['"]([^'"]+)['"] requires (\d+) type argument\(s\)"#,
            Current,
            |c| {
                Action::one(K::GenericArgsRequired {
                    generic_type: cap(c, 1),
                    required_count: num(c, 2).unwrap_or_default(),
                })
            },
        ),
        Pattern::new(
            P::TypeAsValue,
            r#"['"]([^'"]+)['"] only refers to a type, but is being used as a value here"#,
            Root,
            |c| Action::one(K::TypeAsValue { type_name: cap(c, 1) }),
        ),
        Pattern::new(
            P::ValueAsType,
            r#"['"]([^'"]+)['"] refers to a value, but is being used as a type here"#,
            Root,
            |c| Action::one(K::ValueAsType { value_name: cap(c, 1) }),
        ),
        Pattern::new(
            P::SyntaxExpected,
            r#"['"]([^'"]+)['"] expected"#,
            Root,
            |c| Action::one(K::SyntaxExpected { expected: cap(c, 1) }),
        ),
        Pattern::new(
            P::InterfaceExtends,
            r#"Interface ['"]([^'"]+)['"] incorrectly extends interface ['"]([^'"]+)['"]"#,
            Current,
            |c| {
                Action::one(K::InterfaceExtendError {
                    child_interface: cap(c, 1),
                    parent_interface: cap(c, 2),
                })
            },
        ),
        Pattern::new(
            P::ClassImplements,
            r#"Class ['"]([^'"]+)['"] incorrectly implements interface ['"]([^'"]+)['"]"#,
            Current,
            |c| {
                Action::one(K::ClassImplementError {
                    class_name: cap(c, 1),
                    interface_name: cap(c, 2),
                })
            },
        ),
        Pattern::new(
            P::IndexAccess,
            r#"Element implicitly has an ['"]any['"] type because expression of type ['"]([^'"]+)['"] can't be used to index type ['"]([^'"]+)['"]"#,
            Current,
            |c| Action::one(K::IndexAccessError { index_type: cap(c, 1), object_type: cap(c, 2) }),
        ),
        Pattern::new(
            P::InvalidIndexType,
            r#"Type ['"]([^'"]+)['"] cannot be used as an index type"#,
            Current,
            |c| Action::one(K::InvalidIndexType { index_type: cap(c, 1) }),
        ),
        Pattern::new(
            P::CannotIndex,
            r#"Type ['"]([^'"]+)['"] cannot be used to index type ['"]([^'"]+)['"]"#,
            Current,
            |c| Action::one(K::CannotIndex { index_type: cap(c, 1), object_type: cap(c, 2) }),
        ),
    ]
}
