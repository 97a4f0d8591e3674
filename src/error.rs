//! Error type for the fallible analyzer entry points.
//!
//! Analyzing text never fails: blank input yields no result and unrecognized
//! input yields an empty problem list. Errors come from the surroundings:
//! reading diagnostic files, writing JSON and parsing configuration values.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for analyzer I/O and configuration.
///
/// # Example
///
/// ```ignore
/// match analyzer.analyze_file(path) {
///     Ok(result) => println!("{result}"),
///     Err(AnalyzeError::EmptyInput { path }) => {
///         eprintln!("paste a compiler error into {}", path.display());
///     }
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A path mode name that is neither `monotonic` nor `indented`.
    #[error("unknown path mode `{0}` (expected `monotonic` or `indented`)")]
    UnknownPathMode(String),

    /// The file was read but holds only whitespace.
    #[error("no diagnostic text in {}", path.display())]
    EmptyInput {
        /// The file that was analyzed.
        path: PathBuf,
    },
}

impl AnalyzeError {
    /// Create an empty-input error for a file.
    pub fn empty_input(path: impl AsRef<Path>) -> Self {
        Self::EmptyInput {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Whether the error only means there was nothing to analyze.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput { .. })
    }
}
