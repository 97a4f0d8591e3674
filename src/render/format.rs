//! Console formatting of analysis results.

use std::fmt::Write;

use super::titles::{detail_for, suggestion_for, title_for, type_summary};
use crate::analysis::AnalysisResult;
use crate::diagnostic::ProblemRecord;
use crate::types::{align_types, AlignStatus, AlignedDiff};

// ============================================================================
// Options
// ============================================================================

/// Display style for rendered output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayStyle {
    /// Numbered blocks with details, aligned types and hints.
    #[default]
    Rich,
    /// One line per problem: `N. [path] title: detail`.
    Short,
}

/// Options for controlling rendered output.
///
/// # Example
///
/// ```
/// use ts_error_analyzer::render::{DisplayStyle, RenderOptions};
///
/// // Plain text (no ANSI colors) for logging
/// let opts = RenderOptions::plain();
///
/// // One line per problem
/// let opts = RenderOptions::short();
///
/// // Custom configuration
/// let opts = RenderOptions::default()
///     .with_colored(false)
///     .with_style(DisplayStyle::Rich)
///     .with_aligned(true)
///     .with_trace(true);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Whether to use ANSI colors in output.
    pub colored: bool,
    /// Display style (rich blocks or short lines).
    pub style: DisplayStyle,
    /// Whether to show the side-by-side view of mismatched types.
    pub aligned: bool,
    /// Whether to include fix hints.
    pub hints: bool,
    /// Whether to re-print the diagnostic text with indentation guides.
    pub trace: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            colored: true,
            style: DisplayStyle::Rich,
            aligned: true,
            hints: true,
            trace: false,
        }
    }
}

impl RenderOptions {
    /// Create options for colored terminal output.
    pub fn colored() -> Self {
        Self::default()
    }

    /// Create options for plain text output (no ANSI colors).
    pub fn plain() -> Self {
        Self {
            colored: false,
            ..Self::default()
        }
    }

    /// Create options for the one-line-per-problem format.
    pub fn short() -> Self {
        Self {
            style: DisplayStyle::Short,
            aligned: false,
            hints: false,
            ..Self::default()
        }
    }

    /// Set whether to use colors.
    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Set display style.
    pub fn with_style(mut self, style: DisplayStyle) -> Self {
        self.style = style;
        self
    }

    /// Set whether to show aligned types.
    pub fn with_aligned(mut self, aligned: bool) -> Self {
        self.aligned = aligned;
        self
    }

    /// Set whether to include hints.
    pub fn with_hints(mut self, hints: bool) -> Self {
        self.hints = hints;
        self
    }

    /// Set whether to append the error trace.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

// ============================================================================
// Gutter Characters
// ============================================================================

mod gutter {
    pub const HEADER: &str = "┌─";
    pub const BAR: &str = "│";
    pub const END: &str = "└─";
    pub const PATH: &str = " → ";
    pub const OK: &str = " ";
    pub const WRONG: &str = "~";
    pub const MISSING: &str = "-";
    pub const EXTRA: &str = "+";
    pub const WARNING: &str = "⚠";
    pub const ARROW: &str = "→";
    pub const GUIDE: &str = "│ ";
}

// ============================================================================
// Coloring
// ============================================================================

/// Semantic color of a text fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Error,
    Warning,
    Correct,
    Help,
    Muted,
}

#[cfg(feature = "colored-diagnostics")]
fn colorize(text: &str, tone: Tone) -> String {
    use owo_colors::OwoColorize;
    match tone {
        Tone::Error => text.red().to_string(),
        Tone::Warning => text.yellow().to_string(),
        Tone::Correct => text.green().to_string(),
        Tone::Help => text.cyan().to_string(),
        Tone::Muted => text.dimmed().to_string(),
    }
}

#[cfg(not(feature = "colored-diagnostics"))]
fn colorize(text: &str, _tone: Tone) -> String {
    text.to_owned()
}

/// Get paint function based on options.
fn get_paint_fn(options: &RenderOptions, tone: Tone) -> Box<dyn Fn(&str) -> String> {
    if options.colored {
        Box::new(move |s| colorize(s, tone))
    } else {
        Box::new(|s: &str| s.to_owned())
    }
}

fn status_tone(status: AlignStatus) -> Tone {
    match status {
        AlignStatus::Ok => Tone::Muted,
        AlignStatus::ValueMismatch | AlignStatus::ExtraInSource => Tone::Error,
        AlignStatus::MissingInSource => Tone::Warning,
    }
}

fn status_marker(status: AlignStatus) -> &'static str {
    match status {
        AlignStatus::Ok => gutter::OK,
        AlignStatus::ValueMismatch => gutter::WRONG,
        AlignStatus::MissingInSource => gutter::MISSING,
        AlignStatus::ExtraInSource => gutter::EXTRA,
    }
}

// ============================================================================
// Public Formatting API
// ============================================================================

/// Render an analysis result for the console.
pub fn render_result(result: &AnalysisResult, options: &RenderOptions) -> String {
    let mut output = String::new();

    if result.is_empty() {
        write_empty(&mut output, result, options);
        if options.trace {
            write_trace(&mut output, result, options);
        }
        return output;
    }

    match options.style {
        DisplayStyle::Rich => {
            write_header(&mut output, result, options);
            for (i, record) in result.iter().enumerate() {
                output.push('\n');
                write_problem(&mut output, i + 1, record, result, options);
            }
        }
        DisplayStyle::Short => {
            for (i, record) in result.iter().enumerate() {
                write_short(&mut output, i + 1, record, result);
            }
        }
    }

    if options.hints {
        write_array_fix(&mut output, result, options);
    }
    if options.trace {
        write_trace(&mut output, result, options);
    }

    output
}

// ============================================================================
// Writers
// ============================================================================

fn write_empty(output: &mut String, result: &AnalysisResult, options: &RenderOptions) {
    let warn = get_paint_fn(options, Tone::Warning);
    _ = writeln!(output, "{}", warn("No problems recognized."));
    if !result.error_codes.is_empty() {
        _ = writeln!(output, "codes: {}", result.error_codes.join(", "));
    }
}

fn write_header(output: &mut String, result: &AnalysisResult, options: &RenderOptions) {
    let error = get_paint_fn(options, Tone::Error);
    let warn = get_paint_fn(options, Tone::Warning);

    let count = result.len();
    let noun = if count == 1 { "problem" } else { "problems" };
    let mut header = format!("Found {count} {noun}");
    if !result.error_codes.is_empty() {
        _ = write!(header, " [{}]", result.error_codes.join(", "));
    }
    _ = writeln!(output, "{}", error(&header));

    if result.is_array_object_mismatch {
        _ = writeln!(
            output,
            "{} {}",
            warn(gutter::WARNING),
            warn("an object was given where an array is expected")
        );
    }
}

fn write_problem(
    output: &mut String,
    number: usize,
    record: &ProblemRecord,
    result: &AnalysisResult,
    options: &RenderOptions,
) {
    let error = get_paint_fn(options, Tone::Error);
    let muted = get_paint_fn(options, Tone::Muted);
    let help = get_paint_fn(options, Tone::Help);

    _ = writeln!(output, "{}. {}", number, error(title_for(record, result)));
    if !record.path.is_empty() {
        _ = writeln!(output, "   {} {}", muted("at:"), record.path.join(gutter::PATH));
    }

    match record.mismatch() {
        Some(m) if options.aligned => {
            write_aligned(output, &m.source_type, &m.target_type, options);
        }
        _ => {
            _ = writeln!(output, "   {}", detail_for(record));
        }
    }

    if options.hints
        && let Some(hint) = suggestion_for(record)
    {
        _ = writeln!(output, "   {} {}", help("help:"), hint);
    }
}

/// Two-column view of the actual and the expected type.
fn write_aligned(output: &mut String, source: &str, target: &str, options: &RenderOptions) {
    let muted = get_paint_fn(options, Tone::Muted);
    let correct = get_paint_fn(options, Tone::Correct);
    let error = get_paint_fn(options, Tone::Error);

    let source_label = format!("actual ({})", type_summary(source));
    let target_label = format!("expected ({})", type_summary(target));

    match align_types(source, target) {
        AlignedDiff::Primitive { source, target, .. } => {
            _ = writeln!(
                output,
                "   {} {} {}{}",
                muted(gutter::HEADER),
                muted("actual:  "),
                error(&source),
                muted(&summary_suffix(&source)),
            );
            _ = writeln!(
                output,
                "   {} {} {}{}",
                muted(gutter::END),
                muted("expected:"),
                correct(&target),
                muted(&summary_suffix(&target)),
            );
        }
        AlignedDiff::Object { rows } => {
            let width = rows
                .iter()
                .map(|r| r.source_display.chars().count())
                .max()
                .unwrap_or(0)
                .max(source_label.chars().count());

            _ = writeln!(
                output,
                "   {}  {:<width$} {} {}",
                muted(gutter::HEADER),
                source_label,
                muted(gutter::BAR),
                target_label,
            );
            for row in &rows {
                let paint = get_paint_fn(options, status_tone(row.status));
                let pad = width - row.source_display.chars().count();
                _ = writeln!(
                    output,
                    "   {} {} {}{} {} {}",
                    muted(gutter::BAR),
                    paint(status_marker(row.status)),
                    paint(&row.source_display),
                    " ".repeat(pad),
                    muted(gutter::BAR),
                    correct(&row.target_display),
                );
            }
            _ = writeln!(output, "   {}", muted(gutter::END));
        }
    }
}

/// ` (label)` when the summary says more than the type text itself.
fn summary_suffix(ty: &str) -> String {
    let summary = type_summary(ty);
    if summary == ty.trim() {
        String::new()
    } else {
        format!(" ({summary})")
    }
}

/// One `name: { ... } → name: [{ ... }]` line per array-mismatched property.
fn write_array_fix(output: &mut String, result: &AnalysisResult, options: &RenderOptions) {
    let flagged: Vec<&ProblemRecord> = result
        .iter()
        .filter(|r| r.mismatch().is_some_and(|m| m.is_array_mismatch))
        .collect();
    if flagged.is_empty() && !result.is_array_object_mismatch {
        return;
    }

    let mut names: Vec<&str> = Vec::new();
    for name in flagged.iter().filter_map(|r| r.path.last()) {
        if !names.contains(&name.as_str()) {
            names.push(name);
        }
    }
    if names.is_empty() {
        names.push("data");
    }

    let help = get_paint_fn(options, Tone::Help);
    let error = get_paint_fn(options, Tone::Error);
    let correct = get_paint_fn(options, Tone::Correct);

    _ = writeln!(output);
    _ = writeln!(output, "{} wrap the object in an array", help("fix:"));
    for name in names {
        _ = writeln!(
            output,
            "   {} {} {}",
            error(&format!("{name}: {{ ... }}")),
            gutter::ARROW,
            correct(&format!("{name}: [{{ ... }}]")),
        );
    }
}

/// The diagnostic text with one guide per two spaces of indentation.
fn write_trace(output: &mut String, result: &AnalysisResult, options: &RenderOptions) {
    let muted = get_paint_fn(options, Tone::Muted);

    _ = writeln!(output);
    _ = writeln!(output, "{}", muted("error trace:"));
    for line in result.original_error.lines() {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let indent = line.chars().take_while(|c| c.is_whitespace()).count();
        _ = writeln!(output, "   {}{}", muted(&gutter::GUIDE.repeat(indent / 2)), text);
    }
}

fn write_short(output: &mut String, number: usize, record: &ProblemRecord, result: &AnalysisResult) {
    let title = title_for(record, result);
    let detail = detail_for(record);
    if record.path.is_empty() {
        _ = writeln!(output, "{number}. {title}: {detail}");
    } else {
        _ = writeln!(output, "{number}. [{}] {title}: {detail}", record.path_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use pretty_assertions::assert_eq;

    fn render(text: &str, options: RenderOptions) -> String {
        render_result(&analyze(text).unwrap(), &options)
    }

    #[test]
    fn test_short_format() {
        let text = "error TS2322: Types of property 'x' are incompatible.\nType 'string' is not assignable to type 'number'.\nCannot find module 'lodash'.";
        assert_eq!(
            render(text, RenderOptions::short().with_colored(false)),
            "1. [x] Type mismatch: 'string' is not assignable to 'number'\n\
             2. Module not found: 'lodash' cannot be resolved\n"
        );
    }

    #[test]
    fn test_rich_format_primitive() {
        let out = render(
            "error TS2322: Type 'string' is not assignable to type 'number'.",
            RenderOptions::plain(),
        );
        assert_eq!(
            out,
            "Found 1 problem [TS2322]\n\
             \n\
             1. Type mismatch\n   \
             ┌─ actual:   string\n   \
             └─ expected: number\n   \
             help: change the value to match 'number'\n"
        );
    }

    #[test]
    fn test_rich_format_aligned_object() {
        let out = render(
            "Types of property 'user' are incompatible.\nType '{ id: string; name: number; }' is not assignable to type '{ id: string; name: string; age: number; }'.",
            RenderOptions::plain().with_hints(false),
        );
        assert_eq!(
            out,
            "Found 1 problem\n\
             \n\
             1. Type mismatch\n   \
             at: user\n   \
             ┌─  actual (object) │ expected (object)\n   \
             │   id: string      │ id: string\n   \
             │ ~ name: number    │ name: string\n   \
             │ - age: (missing)  │ age: number\n   \
             └─\n"
        );
    }

    #[test]
    fn test_rich_format_warning_and_suggestion() {
        let out = render(
            "Property 'lenght' does not exist on type 'string[]'. Did you mean 'length'?\nType '{}' is missing the following properties from type 'string[]': length, pop, push, concat",
            RenderOptions::plain(),
        );
        assert!(out.starts_with("Found 2 problems\n⚠ an object was given where an array is expected\n"));
        assert!(out.contains("1. Missing property\n   'lenght' does not exist on 'string[]'\n   help: did you mean 'length'?\n"));
        assert!(out.contains("2. Missing property\n   missing length, pop, push, concat\n"));
    }

    #[test]
    fn test_primitive_view_labels_arrays() {
        let out = render(
            "Type 'string' is not assignable to type 'string[]'.",
            RenderOptions::plain().with_hints(false),
        );
        assert!(out.contains("┌─ actual:   string\n"));
        assert!(out.contains("└─ expected: string[] (array)\n"));
    }

    #[test]
    fn test_array_fix_lists_properties() {
        let text = "Type '{ items: { id: string; }; tags: string; }' is not assignable to type '{ items: { id: string; }[]; tags: string[]; }'.";
        let out = render(text, RenderOptions::plain());
        assert!(out.ends_with(
            "\nfix: wrap the object in an array\n   \
             items: { ... } → items: [{ ... }]\n   \
             tags: { ... } → tags: [{ ... }]\n"
        ));

        let out = render(text, RenderOptions::plain().with_hints(false));
        assert!(!out.contains("fix:"));
    }

    #[test]
    fn test_array_fix_falls_back_to_data() {
        let out = render(
            "Type '{}' is missing the following properties from type 'string[]': length, pop, push, concat",
            RenderOptions::plain(),
        );
        assert!(out.ends_with("\nfix: wrap the object in an array\n   data: { ... } → data: [{ ... }]\n"));

        let out = render("Cannot find name 'x'.", RenderOptions::plain());
        assert!(!out.contains("fix:"));
    }

    #[test]
    fn test_trace_guides_follow_indentation() {
        let text = "error TS2322: Type 'A' is not assignable to type 'B'.\n  Types of property 'a' are incompatible.\n    Type 'string' is not assignable to type 'number'.";
        let out = render(text, RenderOptions::plain().with_hints(false).with_trace(true));
        assert!(out.ends_with(
            "\nerror trace:\n   \
             error TS2322: Type 'A' is not assignable to type 'B'.\n   \
             │ Types of property 'a' are incompatible.\n   \
             │ │ Type 'string' is not assignable to type 'number'.\n"
        ));

        let out = render(text, RenderOptions::plain());
        assert!(!out.contains("error trace:"));
    }

    #[test]
    fn test_empty_result() {
        let out = render("error TS9999: something new", RenderOptions::plain());
        assert_eq!(out, "No problems recognized.\ncodes: TS9999\n");
    }

    #[test]
    fn test_plain_has_no_ansi() {
        let out = render("Cannot find name 'x'.", RenderOptions::plain());
        assert!(!out.contains('\u{1b}'));
    }

    #[cfg(feature = "colored-diagnostics")]
    #[test]
    fn test_colored_output_has_escapes() {
        let colored = render("Cannot find name 'x'.", RenderOptions::colored());
        assert!(colored.contains('\u{1b}'));
        assert!(colored.contains("Name not found"));
    }
}
