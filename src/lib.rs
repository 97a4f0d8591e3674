//! # ts-error-analyzer
//!
//! Turns TypeScript compiler diagnostic text into structured problems and
//! explains the types involved.
//!
//! The pipeline is pure and line oriented:
//!
//! - **Classify**: every line is matched against a fixed pattern table, keeping
//!   track of the nested property path announced by
//!   `Types of property 'x' are incompatible.` lines
//! - **Dedup**: repeated problems collapse to their first occurrence
//! - **Explain**: the two types of a mismatch are parsed one level deep and
//!   aligned property by property
//!
//! ## Quick Start
//!
//! ```
//! use ts_error_analyzer::{analyze, render_result, RenderOptions};
//!
//! let text = "\
//! error TS2322: Type '{ a: { b: string; }; }' is not assignable to type '{ a: { b: number; }; }'.
//!   Types of property 'a' are incompatible.
//!     Types of property 'b' are incompatible.
//!       Type 'string' is not assignable to type 'number'.";
//!
//! let result = analyze(text).expect("text is not blank");
//! assert_eq!(result.error_code.as_deref(), Some("TS2322"));
//! assert_eq!(result.problems.last().unwrap().path, vec!["a", "b"]);
//!
//! println!("{}", render_result(&result, &RenderOptions::plain()));
//! ```
//!
//! ## Modules
//!
//! - [`types`]: parsing, comparison and alignment of type text
//! - [`diagnostic`]: the line classifier and problem records
//! - [`render`]: titles, hints and console output
//! - [`config`]: path tracking and dedup settings
//! - `batch`: parallel analysis of many inputs (feature `batch`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analysis;
#[cfg(feature = "batch")]
pub mod batch;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod prelude;
pub mod render;
pub mod types;

// =============================================================================
// High-Level API
// =============================================================================

pub use analysis::{analyze, extract_error_codes, AnalysisResult, Analyzer};
#[cfg(feature = "batch")]
pub use batch::Batcher;
pub use config::{Config, ConfigBuilder, PathMode};
pub use error::AnalyzeError;

// =============================================================================
// Problems
// =============================================================================

pub use diagnostic::{
    classify, classify_with_config, dedup, Problem, ProblemCategory, ProblemKind, ProblemRecord,
    TypeMismatch,
};

// =============================================================================
// Types and Rendering
// =============================================================================

pub use render::{render_result, suggestion_for, title_for, type_summary, DisplayStyle, RenderOptions};
pub use types::{align_types, compare_types, parse_type, AlignStatus, AlignedDiff, Difference, TypeNode};
