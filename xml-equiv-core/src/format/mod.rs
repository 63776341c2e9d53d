//! Rendering of a [`DiffResult`](crate::DiffResult) for people and tools.
//!
//! Text output marks major differences with `!` and minor ones with `~`.
//! JSON output is the serialized result.

mod json;
mod text;

pub use json::format_json;
pub use text::{format_summary, format_text};
