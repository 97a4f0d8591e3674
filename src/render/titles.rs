//! Human-readable titles, details and fix hints per problem.

use crate::analysis::AnalysisResult;
use crate::diagnostic::{ProblemKind, ProblemRecord};

/// Title of a problem.
///
/// Kinded problems use a fixed table. Plain mismatches are titled by their
/// flags in priority order generic, union, literal, array (including the
/// result-level array/object flag), and fall back to "Type mismatch".
pub fn title_for(record: &ProblemRecord, result: &AnalysisResult) -> &'static str {
    use ProblemKind as K;

    let Some(kind) = record.kind() else {
        let Some(m) = record.mismatch() else {
            return "Type mismatch";
        };
        return if m.is_generic {
            "Generic type mismatch"
        } else if m.is_union {
            "Union type mismatch"
        } else if m.is_literal {
            "Literal type mismatch"
        } else if m.is_array_mismatch || result.is_array_object_mismatch {
            "Array type mismatch"
        } else {
            "Type mismatch"
        };
    };

    match kind {
        K::Missing { .. } | K::NotExist { .. } | K::MissingPropsFrom { .. } => "Missing property",
        K::CannotFindName { .. } => "Name not found",
        K::CannotFindModule { .. } => "Module not found",
        K::NoOverload => "No matching overload",
        K::ImplicitAny { .. } => "Implicit any",
        K::UnknownType => "Value of type unknown",
        K::PossiblyUndefined => "Possibly undefined",
        K::PossiblyNull => "Possibly null",
        K::PossiblyNullOrUndefined => "Possibly null or undefined",
        K::ArgumentCount { .. } => "Wrong number of arguments",
        K::NotCallable => "Not callable",
        K::NotConstructable => "Not constructable",
        K::MustReturn => "Missing return value",
        K::OperatorError { .. } => "Invalid operand types",
        K::ConstraintError { .. } => "Constraint not satisfied",
        K::ConversionMistake { .. } => "Suspicious conversion",
        K::BasePropertyMismatch { .. } => "Incompatible override",
        K::UnintentionalComparison { .. } => "Unintentional comparison",
        K::UsedBeforeAssigned { .. } => "Used before assignment",
        K::NoInitializer { .. } => "Missing initializer",
        K::UndefinedNotAssignable { .. } => "Undefined not assignable",
        K::NullNotAssignable { .. } => "Null not assignable",
        K::GenericArgsRequired { .. } => "Missing type arguments",
        K::TypeAsValue { .. } => "Type used as value",
        K::ValueAsType { .. } => "Value used as type",
        K::SyntaxExpected { .. } => "Syntax error",
        K::InterfaceExtendError { .. } => "Incorrect interface extension",
        K::ClassImplementError { .. } => "Incorrect interface implementation",
        K::IndexAccessError { .. } | K::InvalidIndexType { .. } | K::CannotIndex { .. } => {
            "Invalid index"
        }
    }
}

/// One-line description of what went wrong.
pub fn detail_for(record: &ProblemRecord) -> String {
    use ProblemKind as K;

    let Some(kind) = record.kind() else {
        return match record.mismatch() {
            Some(m) if m.is_argument => format!(
                "argument '{}' is not assignable to parameter '{}'",
                m.source_type, m.target_type
            ),
            Some(m) => format!("'{}' is not assignable to '{}'", m.source_type, m.target_type),
            None => String::new(),
        };
    };

    match kind {
        K::Missing { missing_props } => format!("missing {}", missing_props.join(", ")),
        K::NotExist { prop_name, on_type } => {
            format!("'{prop_name}' does not exist on '{on_type}'")
        }
        K::CannotFindName { name } => format!("'{name}' is not declared"),
        K::CannotFindModule { module_name } => format!("'{module_name}' cannot be resolved"),
        K::NoOverload => "no overload accepts these arguments".to_owned(),
        K::ImplicitAny { param_name } => format!("parameter '{param_name}' has no type"),
        K::UnknownType => "value must be narrowed before use".to_owned(),
        K::PossiblyUndefined => "value may be undefined".to_owned(),
        K::PossiblyNull => "value may be null".to_owned(),
        K::PossiblyNullOrUndefined => "value may be null or undefined".to_owned(),
        K::ArgumentCount { expected_min, expected_max, got } => {
            if expected_min == expected_max {
                format!("expected {expected_min}, got {got}")
            } else {
                format!("expected {expected_min}-{expected_max}, got {got}")
            }
        }
        K::NotCallable => "expression is not a function".to_owned(),
        K::NotConstructable => "expression is not a constructor".to_owned(),
        K::MustReturn => "function does not return on every path".to_owned(),
        K::OperatorError { operator, left_type, right_type } => {
            format!("'{operator}' between '{left_type}' and '{right_type}'")
        }
        K::ConstraintError { source_type, constraint } => {
            format!("'{source_type}' does not satisfy '{constraint}'")
        }
        K::ConversionMistake { source_type, target_type } => {
            format!("'{source_type}' to '{target_type}'")
        }
        K::BasePropertyMismatch { prop_name, child_type, base_type } => {
            format!("'{prop_name}' in '{child_type}' differs from base '{base_type}'")
        }
        K::MissingPropsFrom { source_type, target_type, missing_props } => format!(
            "'{source_type}' lacks {} from '{target_type}'",
            missing_props.join(", ")
        ),
        K::UnintentionalComparison { result } => format!("always '{result}'"),
        K::UsedBeforeAssigned { var_name } => format!("'{var_name}' is read before assignment"),
        K::NoInitializer { prop_name } => format!("'{prop_name}' is never initialized"),
        K::UndefinedNotAssignable { target_type } => format!("'undefined' to '{target_type}'"),
        K::NullNotAssignable { target_type } => format!("'null' to '{target_type}'"),
        K::GenericArgsRequired { generic_type, required_count } => {
            format!("'{generic_type}' needs {required_count} type argument(s)")
        }
        K::TypeAsValue { type_name } => format!("'{type_name}' is a type"),
        K::ValueAsType { value_name } => format!("'{value_name}' is a value"),
        K::SyntaxExpected { expected } => format!("'{expected}' expected"),
        K::InterfaceExtendError { child_interface, parent_interface } => {
            format!("'{child_interface}' extends '{parent_interface}'")
        }
        K::ClassImplementError { class_name, interface_name } => {
            format!("'{class_name}' implements '{interface_name}'")
        }
        K::IndexAccessError { index_type, object_type }
        | K::CannotIndex { index_type, object_type } => {
            format!("'{index_type}' cannot index '{object_type}'")
        }
        K::InvalidIndexType { index_type } => format!("'{index_type}' is not an index type"),
    }
}

/// A fix hint, if one applies.
///
/// A "Did you mean" name from the compiler takes precedence.
pub fn suggestion_for(record: &ProblemRecord) -> Option<String> {
    use ProblemKind as K;

    if let Some(name) = &record.suggestion {
        return Some(format!("did you mean '{name}'?"));
    }

    let Some(kind) = record.kind() else {
        let m = record.mismatch()?;
        return Some(if m.is_array_mismatch {
            format!("wrap the value in an array: [value] as {}", m.target_type)
        } else if m.is_argument {
            format!(
                "the function expects '{}' but received '{}'; check the argument",
                m.target_type, m.source_type
            )
        } else {
            format!("change the value to match '{}'", m.target_type)
        });
    };

    let hint = match kind {
        K::Missing { missing_props } | K::MissingPropsFrom { missing_props, .. } => {
            format!("add the missing properties: {}", missing_props.join(", "))
        }
        K::NotExist { prop_name, on_type } => {
            format!("check '{prop_name}' for typos or declare it on '{on_type}'")
        }
        K::CannotFindName { name } => {
            format!("'{name}' is not defined; check for typos, a missing import or declaration")
        }
        K::CannotFindModule { module_name } if is_relative(module_name) => {
            format!("check that the path '{module_name}' exists")
        }
        K::CannotFindModule { module_name } => {
            format!("npm install {module_name} (or @types/{module_name})")
        }
        K::NoOverload => "compare the arguments with each overload signature".to_owned(),
        K::ImplicitAny { param_name } => format!("annotate the parameter: {param_name}: Type"),
        K::UnknownType => "narrow first, e.g. if (typeof value === \"string\") { ... }".to_owned(),
        K::PossiblyUndefined => {
            "use optional chaining (obj?.prop) or check obj !== undefined".to_owned()
        }
        K::PossiblyNull => "use optional chaining (obj?.prop) or check obj !== null".to_owned(),
        K::PossiblyNullOrUndefined => {
            "use optional chaining (obj?.prop) or nullish coalescing (obj ?? fallback)".to_owned()
        }
        K::ArgumentCount { .. } => "check the function signature".to_owned(),
        K::NotCallable => "make sure the right variable is being called".to_owned(),
        K::NotConstructable => "use `new` only with classes and constructors".to_owned(),
        K::MustReturn => "return a value on every code path".to_owned(),
        K::OperatorError { .. } => "convert the operands to compatible types".to_owned(),
        K::ConstraintError { constraint, .. } => {
            format!("pass a type argument that satisfies '{constraint}'")
        }
        K::ConversionMistake { target_type, .. } => {
            format!("convert through unknown: value as unknown as {target_type}")
        }
        K::BasePropertyMismatch { base_type, .. } => {
            format!("make the property type compatible with '{base_type}'")
        }
        K::UnintentionalComparison { .. } => "the operands have no overlap; check the comparison".to_owned(),
        K::UsedBeforeAssigned { var_name } => format!("initialize it: let {var_name} = value;"),
        K::NoInitializer { prop_name } => {
            format!("initialize it, assign it in the constructor or declare {prop_name}!: Type")
        }
        K::UndefinedNotAssignable { target_type } => {
            format!("provide a value or widen the type to {target_type} | undefined")
        }
        K::NullNotAssignable { target_type } => {
            format!("provide a value or widen the type to {target_type} | null")
        }
        K::GenericArgsRequired { generic_type, .. } => {
            format!("supply type arguments, e.g. {generic_type}<string>")
        }
        K::TypeAsValue { type_name } => {
            format!("'{type_name}' exists only at compile time; use a value or a type guard")
        }
        K::ValueAsType { value_name } => format!("use typeof {value_name} in type positions"),
        K::SyntaxExpected { expected } => format!("insert '{expected}'"),
        K::InterfaceExtendError { parent_interface, .. } => {
            format!("make the overridden members compatible with '{parent_interface}'")
        }
        K::ClassImplementError { interface_name, .. } => {
            format!("implement every member of '{interface_name}' with matching types")
        }
        K::IndexAccessError { object_type, .. } | K::CannotIndex { object_type, .. } => {
            format!("index with keyof {object_type} or add an index signature")
        }
        K::InvalidIndexType { .. } => "index with string, number or symbol".to_owned(),
    };
    Some(hint)
}

/// Short label for a type text: `array`, `object`, a primitive name, or the
/// text itself.
pub fn type_summary(ty: &str) -> &str {
    let ty = ty.trim();
    if ty.contains("[]") {
        "array"
    } else if ty.starts_with('{') {
        "object"
    } else {
        ty
    }
}

fn is_relative(module: &str) -> bool {
    module.starts_with('.') || module.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::diagnostic::TypeMismatch;
    use pretty_assertions::assert_eq;

    fn first(text: &str) -> (ProblemRecord, AnalysisResult) {
        let result = analyze(text).unwrap();
        (result.problems[0].clone(), result)
    }

    #[test]
    fn test_mismatch_title_priority() {
        let result = analyze("Cannot find name 'x'.").unwrap();
        let titled = |s: &str, t: &str| {
            title_for(&ProblemRecord::new(vec![], TypeMismatch::classify(s, t)), &result)
        };
        assert_eq!(titled("Promise<string | number>", "string"), "Generic type mismatch");
        assert_eq!(titled("string | number", "'a'"), "Union type mismatch");
        assert_eq!(titled("'a'", "number[]"), "Literal type mismatch");
        assert_eq!(titled("string", "number[]"), "Array type mismatch");
        assert_eq!(titled("string", "number"), "Type mismatch");
    }

    #[test]
    fn test_array_object_flag_titles_mismatch() {
        let (record, result) = first(
            "Type '{ a: string; }' is not assignable to type 'Foo'.\nType '{ a: string; }' is missing the following properties from type 'Foo[]': length, pop, push, concat",
        );
        assert!(result.is_array_object_mismatch);
        assert_eq!(title_for(&record, &result), "Array type mismatch");
    }

    #[test]
    fn test_kind_titles() {
        let (record, result) = first("Property 'a' does not exist on type 'B'.");
        assert_eq!(title_for(&record, &result), "Missing property");
        let (record, result) = first("Type 'number' cannot be used as an index type.");
        assert_eq!(title_for(&record, &result), "Invalid index");
    }

    #[test]
    fn test_module_hint() {
        let (record, _) = first("Cannot find module 'lodash'.");
        assert_eq!(suggestion_for(&record).unwrap(), "npm install lodash (or @types/lodash)");
        let (record, _) = first("Cannot find module './utils'.");
        assert_eq!(suggestion_for(&record).unwrap(), "check that the path './utils' exists");
    }

    #[test]
    fn test_did_you_mean_takes_precedence() {
        let (record, _) = first("Cannot find name 'lenght'. Did you mean 'length'?");
        assert_eq!(suggestion_for(&record).unwrap(), "did you mean 'length'?");
    }

    #[test]
    fn test_type_summary() {
        assert_eq!(type_summary("{ id: string; }[]"), "array");
        assert_eq!(type_summary("Array<string> | string[]"), "array");
        assert_eq!(type_summary("{ id: string; }"), "object");
        assert_eq!(type_summary("number"), "number");
        assert_eq!(type_summary("Promise<User>"), "Promise<User>");
    }

    #[test]
    fn test_details() {
        let (record, _) = first("Expected 1-2 arguments, but got 3.");
        assert_eq!(detail_for(&record), "expected 1-2, got 3");
        let (record, _) = first("Expected 1 arguments, but got 3.");
        assert_eq!(detail_for(&record), "expected 1, got 3");
        let (record, _) = first("Type 'string' is not assignable to type 'number'.");
        assert_eq!(detail_for(&record), "'string' is not assignable to 'number'");
    }
}
