//! Line-by-line classification of compiler diagnostic text.

use tracing::{debug, trace};

use super::pattern::{Action, Scope, PATTERNS};
use super::problem::ProblemRecord;
use crate::config::{Config, PathMode};

/// Classify diagnostic text with the default configuration.
///
/// Records come back in emission order and are not deduplicated.
///
/// # Example
///
/// ```
/// use ts_error_analyzer::diagnostic::classify;
///
/// let records = classify("Cannot find name 'foo'.\nDid you mean 'for'?");
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].name(), Some("foo"));
/// assert_eq!(records[0].suggestion.as_deref(), Some("for"));
/// ```
pub fn classify(text: &str) -> Vec<ProblemRecord> {
    classify_with_config(text, &Config::default())
}

/// Classify diagnostic text.
///
/// Only `config.path_mode` is used here; deduplication happens afterwards.
pub fn classify_with_config(text: &str, config: &Config) -> Vec<ProblemRecord> {
    attach_suggestions(scan(text, config.path_mode))
}

// ============================================================================
// Scan
// ============================================================================

/// Output of the scan, in emission order.
#[derive(Debug)]
enum Event {
    Record(ProblemRecord),
    Suggestion { line: usize, name: String },
}

fn scan(text: &str, mode: PathMode) -> Vec<Event> {
    let mut path = PathStack::new(mode);
    let mut events = Vec::new();
    let mut matched = Vec::new();

    for (line_no, raw) in text.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let indent = indentation(raw);
        path.enter_line(indent);
        matched.clear();

        for pattern in PATTERNS.iter() {
            let Some(caps) = pattern.regex.captures(line) else {
                continue;
            };
            matched.push(pattern.id);
            if let Some(guard) = pattern.unless
                && matched.contains(&guard)
            {
                trace!(line = line_no, pattern = pattern.id.name(), "suppressed");
                continue;
            }
            trace!(line = line_no, pattern = pattern.id.name(), "matched");

            match (pattern.handler)(&caps) {
                Action::PushPath(segment) => path.push(indent, segment),
                Action::Emit(items) => {
                    for item in items {
                        let mut record_path = match pattern.scope {
                            Scope::Current => path.segments(),
                            Scope::Root => Vec::new(),
                        };
                        record_path.extend(item.subpath);
                        events.push(Event::Record(ProblemRecord::new(record_path, item.problem)));
                    }
                }
                Action::Suggest(name) => events.push(Event::Suggestion { line: line_no, name }),
            }
        }
    }

    events
}

/// Attach each suggestion to the closest record emitted before it.
///
/// Emission order is line order, then table order within a line. A
/// `Did you mean` on a line whose own record comes from a later table row
/// therefore lands on the previous line's record.
fn attach_suggestions(events: Vec<Event>) -> Vec<ProblemRecord> {
    let mut records: Vec<ProblemRecord> = Vec::new();
    for event in events {
        match event {
            Event::Record(record) => records.push(record),
            Event::Suggestion { line, name } => match records.last_mut() {
                Some(record) => record.suggestion = Some(name),
                None => debug!(line, %name, "suggestion without a preceding problem"),
            },
        }
    }
    records
}

/// Leading whitespace, in characters.
fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

// ============================================================================
// Path Stack
// ============================================================================

/// The nested-property path, with the indentation each segment was entered at.
struct PathStack {
    mode: PathMode,
    segments: Vec<(usize, String)>,
}

impl PathStack {
    fn new(mode: PathMode) -> Self {
        Self {
            mode,
            segments: Vec::new(),
        }
    }

    /// Leave segments that do not enclose a line at `indent`.
    fn enter_line(&mut self, indent: usize) {
        if self.mode == PathMode::Monotonic {
            return;
        }
        while self.segments.last().is_some_and(|(depth, _)| *depth >= indent) {
            if let Some((_, name)) = self.segments.pop() {
                debug!(%name, indent, "path pop");
            }
        }
    }

    fn push(&mut self, indent: usize, name: String) {
        debug!(%name, indent, depth = self.segments.len() + 1, "path push");
        self.segments.push((indent, name));
    }

    fn segments(&self) -> Vec<String> {
        self.segments.iter().map(|(_, name)| name.clone()).collect()
    }
}
