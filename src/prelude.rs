//! Prelude module for convenient imports.
//!
//! ```
//! use ts_error_analyzer::prelude::*;
//!
//! let result = analyze("Cannot find module 'lodash'").unwrap();
//! assert_eq!(result.problems[0].kind_tag(), "cannotFindModule");
//! ```

// Analysis
pub use crate::analysis::{analyze, AnalysisResult, Analyzer};
#[cfg(feature = "batch")]
pub use crate::batch::Batcher;

// Configuration & errors
pub use crate::config::{Config, ConfigBuilder, PathMode};
pub use crate::error::AnalyzeError;

// Problems
pub use crate::diagnostic::{Problem, ProblemCategory, ProblemKind, ProblemRecord, TypeMismatch};

// Types
pub use crate::types::{align_types, compare_types, parse_type, AlignStatus, AlignedDiff, Difference, TypeNode};

// Rendering
pub use crate::render::{render_result, DisplayStyle, RenderOptions};
