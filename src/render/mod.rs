//! Console rendering of analysis results.
//!
//! Titles, details and hints are plain strings so other front ends can reuse
//! them; [`render_result`] lays them out for a terminal.

mod format;
mod titles;

pub use format::{render_result, DisplayStyle, RenderOptions};
pub use titles::{detail_for, suggestion_for, title_for, type_summary};
