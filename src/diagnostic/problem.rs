//! Problem records produced by the classifier.

use serde::Serialize;
use strum::IntoStaticStr;

// ============================================================================
// ProblemRecord
// ============================================================================

/// One recognized problem, located by its nested-property path.
///
/// Serializes flat: `path`, the problem's own fields, and `kind` for every
/// problem except a plain type mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecord {
    /// Property names leading to the problem, outermost first.
    pub path: Vec<String>,
    /// The problem itself.
    #[serde(flatten)]
    pub problem: Problem,
    /// A "Did you mean" replacement offered by the compiler.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ProblemRecord {
    /// Create a record without a suggestion.
    pub fn new(path: Vec<String>, problem: impl Into<Problem>) -> Self {
        Self {
            path,
            problem: problem.into(),
            suggestion: None,
        }
    }

    /// The kind, or `None` for a plain type mismatch.
    pub fn kind(&self) -> Option<&ProblemKind> {
        match &self.problem {
            Problem::Kinded(kind) => Some(kind),
            Problem::TypeMismatch(_) => None,
        }
    }

    /// The type mismatch details, if this is a plain type mismatch.
    pub fn mismatch(&self) -> Option<&TypeMismatch> {
        match &self.problem {
            Problem::TypeMismatch(m) => Some(m),
            Problem::Kinded(_) => None,
        }
    }

    /// Kind name, `"type"` for a plain type mismatch.
    pub fn kind_tag(&self) -> &'static str {
        self.kind().map_or("type", ProblemKind::tag)
    }

    /// The path joined with dots.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// The actual (source) type, for problems that carry one.
    pub fn source_type(&self) -> Option<&str> {
        match &self.problem {
            Problem::TypeMismatch(m) => Some(&m.source_type),
            Problem::Kinded(
                ProblemKind::ConstraintError { source_type, .. }
                | ProblemKind::ConversionMistake { source_type, .. }
                | ProblemKind::MissingPropsFrom { source_type, .. },
            ) => Some(source_type),
            Problem::Kinded(_) => None,
        }
    }

    /// The expected (target) type, for problems that carry one.
    pub fn target_type(&self) -> Option<&str> {
        match &self.problem {
            Problem::TypeMismatch(m) => Some(&m.target_type),
            Problem::Kinded(
                ProblemKind::ConversionMistake { target_type, .. }
                | ProblemKind::MissingPropsFrom { target_type, .. }
                | ProblemKind::UndefinedNotAssignable { target_type }
                | ProblemKind::NullNotAssignable { target_type },
            ) => Some(target_type),
            Problem::Kinded(_) => None,
        }
    }

    /// The unresolved name of a `cannotFindName` problem.
    pub fn name(&self) -> Option<&str> {
        match self.kind() {
            Some(ProblemKind::CannotFindName { name }) => Some(name),
            _ => None,
        }
    }

    /// The module of a `cannotFindModule` problem.
    pub fn module_name(&self) -> Option<&str> {
        match self.kind() {
            Some(ProblemKind::CannotFindModule { module_name }) => Some(module_name),
            _ => None,
        }
    }

    /// Display category, used to group and color problems.
    pub fn category(&self) -> Option<ProblemCategory> {
        match &self.problem {
            Problem::Kinded(kind) => kind.category(),
            Problem::TypeMismatch(m) => m.category(),
        }
    }
}

// ============================================================================
// Problem
// ============================================================================

/// A plain type mismatch or one of the specific diagnostic kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Problem {
    /// `Type 'S' is not assignable to type 'T'` and its argument variant.
    TypeMismatch(TypeMismatch),
    /// Any other recognized diagnostic shape.
    Kinded(ProblemKind),
}

impl From<TypeMismatch> for Problem {
    fn from(m: TypeMismatch) -> Self {
        Self::TypeMismatch(m)
    }
}

impl From<ProblemKind> for Problem {
    fn from(kind: ProblemKind) -> Self {
        Self::Kinded(kind)
    }
}

/// Details of a plain type mismatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMismatch {
    /// The actual type.
    pub source_type: String,
    /// The expected type.
    pub target_type: String,
    /// An array was expected where a non-array was given.
    pub is_array_mismatch: bool,
    /// Either side is generic (contains `<`).
    pub is_generic: bool,
    /// Either side is a union (contains ` | `).
    pub is_union: bool,
    /// Either side is a literal type.
    pub is_literal: bool,
    /// Either side is a `readonly [...]` tuple.
    pub is_readonly_array: bool,
    /// Reported as `Argument of type ... parameter of type ...`.
    pub is_argument: bool,
}

impl TypeMismatch {
    /// Build a mismatch and derive its shape flags from the two type texts.
    ///
    /// `is_array_mismatch` is set when the target ends in `[]` and the source
    /// does not.
    pub fn classify(source_type: &str, target_type: &str) -> Self {
        let (s, t) = (source_type, target_type);
        let is_readonly_array = either(s, t, is_readonly_tuple);
        Self {
            source_type: s.to_owned(),
            target_type: t.to_owned(),
            is_array_mismatch: ends_with_array(t) && !ends_with_array(s),
            is_generic: either(s, t, |x| x.contains('<')),
            is_union: either(s, t, |x| x.contains(" | ")),
            is_literal: either(s, t, is_literal_type) || is_readonly_array,
            is_readonly_array,
            is_argument: false,
        }
    }

    /// A property-level array mismatch; no other flags are derived.
    pub fn array(source_type: &str, target_type: &str) -> Self {
        Self {
            source_type: source_type.to_owned(),
            target_type: target_type.to_owned(),
            is_array_mismatch: true,
            ..Self::default()
        }
    }

    /// Mark as reported for a call argument.
    pub fn into_argument(mut self) -> Self {
        self.is_argument = true;
        self
    }

    fn category(&self) -> Option<ProblemCategory> {
        if self.is_literal {
            Some(ProblemCategory::Literal)
        } else if self.is_generic {
            Some(ProblemCategory::Generic)
        } else if self.is_union {
            Some(ProblemCategory::Union)
        } else {
            None
        }
    }
}

fn either(source: &str, target: &str, test: impl Fn(&str) -> bool) -> bool {
    test(source) || test(target)
}

fn ends_with_array(text: &str) -> bool {
    text.trim_end().ends_with("[]")
}

fn is_readonly_tuple(text: &str) -> bool {
    text.strip_prefix("readonly")
        .is_some_and(|rest| rest.trim_start().starts_with('['))
}

/// String, numeric, boolean and template literal types.
fn is_literal_type(text: &str) -> bool {
    quoted(text, &['"', '\''])
        || (!text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()))
        || text == "true"
        || text == "false"
        || quoted(text, &['`'])
        || text.contains("${")
}

fn quoted(text: &str, quotes: &[char]) -> bool {
    text.len() >= 2 && text.starts_with(quotes) && text.ends_with(quotes)
}

// ============================================================================
// ProblemKind
// ============================================================================

/// Specific diagnostic shapes, each with its own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, IntoStaticStr)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProblemKind {
    /// `... is missing the following properties ...: a, b`
    Missing {
        /// Listed property names.
        missing_props: Vec<String>,
    },
    /// `Property 'P' does not exist on type 'T'`
    NotExist {
        /// The property.
        prop_name: String,
        /// The type it was looked up on.
        on_type: String,
    },
    /// `Cannot find name 'N'`
    CannotFindName {
        /// The unresolved name.
        name: String,
    },
    /// `Cannot find module 'M'`
    CannotFindModule {
        /// The module specifier.
        module_name: String,
    },
    /// `No overload matches this call`
    NoOverload,
    /// `Parameter 'p' implicitly has an 'any' type`
    ImplicitAny {
        /// The parameter.
        param_name: String,
    },
    /// `Object is of type 'unknown'`
    UnknownType,
    /// `Object is possibly 'undefined'`
    PossiblyUndefined,
    /// `Object is possibly 'null'`
    PossiblyNull,
    /// `Object is possibly 'null' or 'undefined'`
    PossiblyNullOrUndefined,
    /// `Expected N[-M] arguments, but got K`
    ArgumentCount {
        /// Minimum accepted arguments.
        expected_min: u32,
        /// Maximum accepted arguments; equals the minimum without a range.
        expected_max: u32,
        /// Arguments supplied.
        got: u32,
    },
    /// `This expression is not callable`
    NotCallable,
    /// `This expression is not constructable`
    NotConstructable,
    /// `A function whose declared type is neither 'void' nor 'any' must return a value`
    MustReturn,
    /// `Operator 'op' cannot be applied to types 'L' and 'R'`
    OperatorError {
        /// The operator.
        operator: String,
        /// Left operand type.
        left_type: String,
        /// Right operand type.
        right_type: String,
    },
    /// `Type 'S' does not satisfy the constraint 'C'`
    ConstraintError {
        /// The offending type.
        source_type: String,
        /// The constraint.
        constraint: String,
    },
    /// `Conversion of type 'S' to type 'T' may be a mistake`
    ConversionMistake {
        /// Converted type.
        source_type: String,
        /// Conversion target.
        target_type: String,
    },
    /// `Property 'P' in type 'C' is not assignable to the same property in base type 'B'`
    BasePropertyMismatch {
        /// The property.
        prop_name: String,
        /// The derived type.
        child_type: String,
        /// The base type.
        base_type: String,
    },
    /// `Type 'S' is missing the following properties from type 'T': a, b`
    MissingPropsFrom {
        /// The incomplete type.
        source_type: String,
        /// The type it should satisfy.
        target_type: String,
        /// Listed property names.
        missing_props: Vec<String>,
    },
    /// `This comparison appears to be unintentional` and `... will always return 'x'`
    UnintentionalComparison {
        /// The constant result of the comparison.
        result: String,
    },
    /// `Variable 'v' is used before being assigned`
    UsedBeforeAssigned {
        /// The variable.
        var_name: String,
    },
    /// `Property 'P' has no initializer and is not definitely assigned`
    NoInitializer {
        /// The property.
        prop_name: String,
    },
    /// `Type 'undefined' is not assignable to type 'T'`
    UndefinedNotAssignable {
        /// The target type.
        target_type: String,
    },
    /// `Type 'null' is not assignable to type 'T'`
    NullNotAssignable {
        /// The target type.
        target_type: String,
    },
    /// `Generic type 'G' requires N type argument(s)`
    GenericArgsRequired {
        /// The generic type.
        generic_type: String,
        /// Required number of type arguments.
        required_count: u32,
    },
    /// `'T' only refers to a type, but is being used as a value here`
    TypeAsValue {
        /// The type name.
        type_name: String,
    },
    /// `'v' refers to a value, but is being used as a type here`
    ValueAsType {
        /// The value name.
        value_name: String,
    },
    /// `'x' expected`
    SyntaxExpected {
        /// The expected token.
        expected: String,
    },
    /// `Interface 'C' incorrectly extends interface 'P'`
    InterfaceExtendError {
        /// The extending interface.
        child_interface: String,
        /// The extended interface.
        parent_interface: String,
    },
    /// `Class 'C' incorrectly implements interface 'I'`
    ClassImplementError {
        /// The class.
        class_name: String,
        /// The interface.
        interface_name: String,
    },
    /// `Element implicitly has an 'any' type because expression of type 'I' can't be used to index type 'O'`
    IndexAccessError {
        /// The index expression type.
        index_type: String,
        /// The indexed type.
        object_type: String,
    },
    /// `Type 'I' cannot be used as an index type`
    InvalidIndexType {
        /// The index type.
        index_type: String,
    },
    /// `Type 'I' cannot be used to index type 'O'`
    CannotIndex {
        /// The index type.
        index_type: String,
        /// The indexed type.
        object_type: String,
    },
}

impl ProblemKind {
    /// The camelCase kind name, as serialized.
    pub fn tag(&self) -> &'static str {
        self.into()
    }

    /// Display category, if the kind belongs to one.
    pub fn category(&self) -> Option<ProblemCategory> {
        use ProblemCategory as C;
        match self {
            Self::CannotFindModule { .. } => Some(C::Module),
            Self::CannotFindName { .. } => Some(C::NotFound),
            Self::NoOverload => Some(C::Generic),
            Self::PossiblyUndefined | Self::PossiblyNull | Self::PossiblyNullOrUndefined => {
                Some(C::Nullable)
            }
            Self::UnknownType => Some(C::Unknown),
            Self::ArgumentCount { .. } => Some(C::Argument),
            Self::NotCallable | Self::NotConstructable => Some(C::Callable),
            Self::OperatorError { .. } => Some(C::Operator),
            Self::ConstraintError { .. } => Some(C::Constraint),
            Self::InterfaceExtendError { .. } | Self::ClassImplementError { .. } => {
                Some(C::Inheritance)
            }
            Self::IndexAccessError { .. } | Self::InvalidIndexType { .. } | Self::CannotIndex { .. } => {
                Some(C::Index)
            }
            _ => None,
        }
    }
}

/// Coarse grouping of problems for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProblemCategory {
    /// Module resolution.
    Module,
    /// Unresolved name.
    NotFound,
    /// Generics and overloads.
    Generic,
    /// Possibly null or undefined.
    Nullable,
    /// `unknown` values.
    Unknown,
    /// Argument count.
    Argument,
    /// Call or construct on a non-function.
    Callable,
    /// Operator operands.
    Operator,
    /// Generic constraints.
    Constraint,
    /// Interface extension and implementation.
    Inheritance,
    /// Index access.
    Index,
    /// Literal types.
    Literal,
    /// Union types.
    Union,
}

impl ProblemCategory {
    /// The camelCase category name.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_flags() {
        let m = TypeMismatch::classify("Promise<string>", "string");
        assert!(m.is_generic);
        assert!(!m.is_union && !m.is_literal && !m.is_array_mismatch);

        let m = TypeMismatch::classify("string | undefined", "string");
        assert!(m.is_union);

        let m = TypeMismatch::classify("42", "string");
        assert!(m.is_literal);

        let m = TypeMismatch::classify("string", "true");
        assert!(m.is_literal);

        let m = TypeMismatch::classify("`id-${string}`", "number");
        assert!(m.is_literal);

        let m = TypeMismatch::classify("readonly [1, 2]", "number[]");
        assert!(m.is_readonly_array && m.is_literal);
    }

    #[test]
    fn test_classify_array_mismatch_requires_trailing_brackets() {
        assert!(TypeMismatch::classify("{ id: string }", "{ id: string }[]").is_array_mismatch);
        assert!(!TypeMismatch::classify("string[]", "number[]").is_array_mismatch);
        assert!(!TypeMismatch::classify("string", "string[] | undefined").is_array_mismatch);
    }

    #[test]
    fn test_literal_detection() {
        assert!(is_literal_type("'a'"));
        assert!(is_literal_type("\"a\""));
        assert!(is_literal_type("123"));
        assert!(!is_literal_type("'"));
        assert!(!is_literal_type("12a"));
        assert!(!is_literal_type(""));
        assert!(!is_literal_type("string"));
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(ProblemKind::NoOverload.tag(), "noOverload");
        assert_eq!(
            ProblemKind::CannotFindModule { module_name: "x".into() }.tag(),
            "cannotFindModule"
        );
        assert_eq!(ProblemKind::PossiblyNullOrUndefined.tag(), "possiblyNullOrUndefined");
        let record = ProblemRecord::new(vec![], TypeMismatch::classify("a", "b"));
        assert_eq!(record.kind_tag(), "type");
    }

    #[test]
    fn test_record_accessors() {
        let record = ProblemRecord::new(
            vec!["a".into(), "b".into()],
            ProblemKind::CannotFindName { name: "foo".into() },
        );
        assert_eq!(record.path_string(), "a.b");
        assert_eq!(record.name(), Some("foo"));
        assert_eq!(record.module_name(), None);
        assert_eq!(record.source_type(), None);
        assert_eq!(record.category(), Some(ProblemCategory::NotFound));
    }

    #[test]
    fn test_serialize_kinded() {
        let mut record = ProblemRecord::new(
            vec![],
            ProblemKind::NotExist {
                prop_name: "foo".into(),
                on_type: "Bar".into(),
            },
        );
        record.suggestion = Some("fooBar".into());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "path": [],
                "kind": "notExist",
                "propName": "foo",
                "onType": "Bar",
                "suggestion": "fooBar"
            })
        );
    }

    #[test]
    fn test_serialize_mismatch_has_no_kind() {
        let record = ProblemRecord::new(vec!["x".into()], TypeMismatch::classify("string", "number"));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("kind").is_none());
        assert_eq!(json["sourceType"], "string");
        assert_eq!(json["isArrayMismatch"], false);
        assert_eq!(json["path"], serde_json::json!(["x"]));
    }
}
