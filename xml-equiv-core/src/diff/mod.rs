//! Dual-cursor XML comparison.

pub mod catalog;
pub mod difference;
pub mod engine;
pub mod result;

pub use catalog::{DifferenceType, Severity};
pub use difference::Difference;
pub use engine::{CompareError, DiffEngine};
pub use result::DiffResult;
