//! Recognition of TypeScript compiler diagnostic lines.
//!
//! Text is classified line by line against a fixed pattern table. Each match
//! becomes a [`ProblemRecord`] located by the nested-property path in effect
//! at that line. [`dedup`] then collapses repeated records.

mod classify;
mod dedup;
mod pattern;
mod problem;

pub use classify::{classify, classify_with_config};
pub use dedup::{dedup, DedupKey};
pub use problem::{Problem, ProblemCategory, ProblemKind, ProblemRecord, TypeMismatch};
