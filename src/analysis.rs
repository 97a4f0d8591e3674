//! Analysis of a whole diagnostic text.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::diagnostic::{classify_with_config, dedup, ProblemRecord};
use crate::error::AnalyzeError;
use crate::render::{render_result, RenderOptions};

/// Diagnostic code marker, e.g. `TS2322`.
static ERROR_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TS\d{4}").expect("error code pattern is valid"));

/// Printed by the compiler when an object is given where an array is expected.
const ARRAY_OBJECT_SIGNATURE: &str = "length, pop, push, concat";

// ============================================================================
// AnalysisResult
// ============================================================================

/// Structured outcome of analyzing one diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Recognized problems, in order of appearance, without duplicates.
    pub problems: Vec<ProblemRecord>,
    /// The text lists array methods missing from an object.
    pub is_array_object_mismatch: bool,
    /// The analyzed text, trimmed.
    pub original_error: String,
    /// The first diagnostic code in the text.
    pub error_code: Option<String>,
    /// Every distinct diagnostic code, in order of first appearance.
    pub error_codes: Vec<String>,
}

impl AnalysisResult {
    /// Number of problems.
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Whether no problem was recognized.
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Iterate over the problems.
    pub fn iter(&self) -> impl Iterator<Item = &ProblemRecord> {
        self.problems.iter()
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, AnalyzeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, AnalyzeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a AnalysisResult {
    type Item = &'a ProblemRecord;
    type IntoIter = std::slice::Iter<'a, ProblemRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.problems.iter()
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(render_result(self, &RenderOptions::plain()).trim_end())
    }
}

// ============================================================================
// Analyzer
// ============================================================================

/// Analyzer with a fixed configuration.
///
/// # Example
///
/// ```
/// use ts_error_analyzer::{Analyzer, Config};
/// use ts_error_analyzer::config::PathMode;
///
/// let analyzer = Analyzer::new(Config::builder().path_mode(PathMode::Indented).build());
/// let result = analyzer.analyze("error TS2307: Cannot find module 'lodash'.").unwrap();
/// assert_eq!(result.error_code.as_deref(), Some("TS2307"));
/// assert_eq!(result.problems[0].module_name(), Some("lodash"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    config: Config,
}

impl Analyzer {
    /// Create an analyzer.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze diagnostic text.
    ///
    /// Returns `None` when the text is empty after trimming. Text without
    /// any recognized diagnostic gives a result with no problems.
    pub fn analyze(&self, text: &str) -> Option<AnalysisResult> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let records = classify_with_config(text, &self.config);
        let classified = records.len();
        let problems = if self.config.dedup { dedup(records) } else { records };

        let error_codes = extract_error_codes(text);
        let result = AnalysisResult {
            problems,
            is_array_object_mismatch: text.contains(ARRAY_OBJECT_SIGNATURE),
            original_error: text.to_owned(),
            error_code: error_codes.first().cloned(),
            error_codes,
        };

        debug!(
            problems = result.problems.len(),
            duplicates = classified - result.problems.len(),
            codes = ?result.error_codes,
            "analyzed diagnostic text"
        );
        Some(result)
    }

    /// Read a file and analyze its contents.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisResult, AnalyzeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        self.analyze(&text)
            .ok_or_else(|| AnalyzeError::empty_input(path))
    }
}

/// Analyze diagnostic text with the default configuration.
///
/// # Example
///
/// ```
/// use ts_error_analyzer::analyze;
///
/// let text = "Types of property 'x' are incompatible.\n  Type 'string' is not assignable to type 'number'.";
/// let result = analyze(text).unwrap();
/// assert_eq!(result.problems.len(), 1);
/// assert_eq!(result.problems[0].path, vec!["x"]);
///
/// assert!(analyze("   ").is_none());
/// ```
pub fn analyze(text: &str) -> Option<AnalysisResult> {
    Analyzer::default().analyze(text)
}

/// Distinct diagnostic codes (`TS` plus four digits), in order of first appearance.
pub fn extract_error_codes(text: &str) -> Vec<String> {
    let mut seen = FxHashSet::default();
    ERROR_CODE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|code| seen.insert(*code))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigBuilder, PathMode};
    use crate::diagnostic::{DedupKey, Problem, ProblemKind, TypeMismatch};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_cannot_find_module() {
        let result = analyze("Cannot find module 'lodash'").unwrap();
        assert_eq!(result.problems.len(), 1);
        assert_eq!(
            result.problems[0].problem,
            Problem::Kinded(ProblemKind::CannotFindModule { module_name: "lodash".into() })
        );
    }

    #[test]
    fn test_not_exist_with_suggestion() {
        let result = analyze("Property 'foo' does not exist on type 'Bar'. Did you mean 'fooBar'?").unwrap();
        assert_eq!(result.problems.len(), 1);
        let record = &result.problems[0];
        assert_eq!(
            record.kind(),
            Some(&ProblemKind::NotExist { prop_name: "foo".into(), on_type: "Bar".into() })
        );
        assert_eq!(record.suggestion.as_deref(), Some("fooBar"));
    }

    #[test]
    fn test_nested_path() {
        let text = "Types of property 'x' are incompatible.\nType 'string' is not assignable to type 'number'.";
        let result = analyze(text).unwrap();
        assert_eq!(result.problems.len(), 1);
        let record = &result.problems[0];
        assert_eq!(record.path, vec!["x".to_string()]);
        assert_eq!(record.source_type(), Some("string"));
        assert_eq!(record.target_type(), Some("number"));
        assert!(record.kind().is_none());
    }

    #[test]
    fn test_array_mismatch_extraction() {
        let text = "Type '{items: {id: string}}' is not assignable to type '{items: {id: string}[]}'.";
        let result = analyze(text).unwrap();
        assert_eq!(result.problems.len(), 1);
        let record = &result.problems[0];
        assert_eq!(record.path, vec!["items".to_string()]);
        assert!(record.mismatch().is_some_and(|m| m.is_array_mismatch));
    }

    #[test]
    fn test_error_codes() {
        let text = "a.ts(1,1): error TS2322: x\nb.ts(2,2): error TS2345: y\nc.ts(3,3): error TS2322: z";
        let result = analyze(text).unwrap();
        assert_eq!(result.error_codes, vec!["TS2322", "TS2345"]);
        assert_eq!(result.error_code.as_deref(), Some("TS2322"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_extract_error_codes_none() {
        assert!(extract_error_codes("no codes, TS12 or ts2322").is_empty());
        assert_eq!(extract_error_codes("TS23456"), vec!["TS2345"]);
    }

    #[test]
    fn test_array_object_flag() {
        let text = "Type '{ a: string; }' is missing the following properties from type 'string[]': length, pop, push, concat, and 26 more.";
        let result = analyze(text).unwrap();
        assert!(result.is_array_object_mismatch);
        assert_eq!(
            result.problems[0].kind(),
            Some(&ProblemKind::Missing {
                missing_props: vec![
                    "length".into(),
                    "pop".into(),
                    "push".into(),
                    "concat".into(),
                    "and 26 more".into(),
                ]
            })
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(analyze("").is_none());
        assert!(analyze(" \n\t ").is_none());
        let result = analyze("hello").unwrap();
        assert!(result.is_empty());
        assert!(result.error_codes.is_empty());
        assert_eq!(result.error_code, None);
    }

    #[test]
    fn test_original_error_is_trimmed() {
        let result = analyze("\n  Cannot find name 'x'.  \n").unwrap();
        assert_eq!(result.original_error, "Cannot find name 'x'.");
    }

    #[test]
    fn test_dedup_applied_by_default() {
        let text = "Type 'string' is not assignable to type 'number'.\nType 'string' is not assignable to type 'number'.";
        assert_eq!(analyze(text).unwrap().len(), 1);

        let raw = Analyzer::new(ConfigBuilder::new().dedup(false).build());
        assert_eq!(raw.analyze(text).unwrap().len(), 2);
    }

    #[test]
    fn test_indented_analyzer() {
        let text = "Type 'A' is not assignable to type 'B'.\n  Types of property 'a' are incompatible.\n    Type 'string' is not assignable to type 'number'.\nObject is possibly 'null'.";
        let analyzer = Analyzer::new(Config::builder().path_mode(PathMode::Indented).build());
        let result = analyzer.analyze(text).unwrap();
        let paths: Vec<_> = result.iter().map(ProblemRecord::path_string).collect();
        assert_eq!(paths, vec!["", "a", ""]);
    }

    #[test]
    fn test_analyze_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tsc.log");
        std::fs::write(&path, "error TS2304: Cannot find name 'foo'.").unwrap();
        let result = Analyzer::default().analyze_file(&path).unwrap();
        assert_eq!(result.problems[0].name(), Some("foo"));

        std::fs::write(&path, "  \n").unwrap();
        let err = Analyzer::default().analyze_file(&path).unwrap_err();
        assert!(err.is_empty_input());

        let err = Analyzer::default().analyze_file(dir.path().join("missing.log")).unwrap_err();
        assert!(matches!(err, AnalyzeError::Io(_)));
    }

    #[test]
    fn test_json_shape() {
        let text = "error TS2322: Types of property 'x' are incompatible.\nType 'string' is not assignable to type 'number'.";
        let json: serde_json::Value =
            serde_json::from_str(&analyze(text).unwrap().to_json().unwrap()).unwrap();
        assert_eq!(json["errorCode"], "TS2322");
        assert_eq!(json["isArrayObjectMismatch"], false);
        assert_eq!(json["problems"][0]["path"], serde_json::json!(["x"]));
        assert_eq!(json["problems"][0]["sourceType"], "string");
        assert!(json["problems"][0].get("kind").is_none());
        assert!(analyze(text).unwrap().to_json_pretty().unwrap().contains('\n'));
    }

    #[test]
    fn test_display_is_plain_render() {
        let result = analyze("Cannot find name 'foo'.").unwrap();
        let shown = result.to_string();
        assert!(shown.contains("foo"));
        assert!(!shown.contains('\u{1b}'));
    }

    #[test]
    fn test_mismatch_record_equality() {
        let result = analyze("Type 'string' is not assignable to type 'number'.").unwrap();
        assert_eq!(
            result.problems[0].problem,
            Problem::TypeMismatch(TypeMismatch::classify("string", "number"))
        );
    }

    const LINES: &[&str] = &[
        "Types of property 'a' are incompatible.",
        "Types of property 'b' are incompatible.",
        "Type 'string' is not assignable to type 'number'.",
        "Type '{ x: string; }' is not assignable to type '{ x: string[]; }'.",
        "Cannot find name 'foo'.",
        "Cannot find module 'bar'.",
        "Did you mean 'baz'?",
        "Object is possibly 'null' or 'undefined'.",
        "Argument of type 'number' is not assignable to parameter of type 'string'.",
        "Expected 2 arguments, but got 1.",
        "error TS2322: unrelated",
        "",
    ];

    proptest! {
        #[test]
        fn test_analyze_idempotent(picks in prop::collection::vec(0..LINES.len(), 0..16)) {
            let text: Vec<_> = picks.iter().map(|&i| LINES[i]).collect();
            let text = text.join("\n");
            prop_assert_eq!(analyze(&text), analyze(&text));
        }

        #[test]
        fn test_dedup_invariant(picks in prop::collection::vec(0..LINES.len(), 0..16)) {
            let text: Vec<_> = picks.iter().map(|&i| LINES[i]).collect();
            if let Some(result) = analyze(&text.join("\n")) {
                let mut seen = FxHashSet::default();
                for record in &result {
                    prop_assert!(seen.insert(DedupKey::of(record)));
                }
            }
        }

        #[test]
        fn test_analyze_never_panics(text in "\\PC{0,200}") {
            let _ = analyze(&text);
        }
    }
}
