//! Streaming equivalence checks for XML documents.
//!
//! [`DiffEngine`] walks two [`NodeSource`] cursors in lockstep and records
//! every [`Difference`] it finds into a [`DiffResult`], stopping at the first
//! major one. Attribute order and `<a/>` versus `<a></a>` are not treated as
//! significant. [`XmlDiff`] wires the engine to quick-xml backed sources.

pub mod config;
pub mod diff;
pub mod format;
pub mod reader;
pub mod source;
pub mod xml_diff;

pub use config::{DiffConfiguration, WhitespaceHandling};
pub use diff::{CompareError, DiffEngine, DiffResult, Difference, DifferenceType, Severity};
pub use format::{format_json, format_summary, format_text};
pub use reader::{DocumentSource, SourceError, XmlDocument, XmlReaderSource};
pub use source::{NodeKind, NodeSource, SourceHandle};
pub use xml_diff::{compare_files, compare_str, XmlDiff};
