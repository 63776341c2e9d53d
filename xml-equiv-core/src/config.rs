use serde::{Deserialize, Serialize};

/// Which whitespace-only text nodes a reader reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhitespaceHandling {
    /// Report both insignificant and significant whitespace.
    #[default]
    All,
    /// Report only whitespace inside an `xml:space="preserve"` scope.
    Significant,
    /// Drop whitespace-only text nodes.
    None,
}

/// Settings used when turning XML input into node sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfiguration {
    pub whitespace: WhitespaceHandling,
    /// Free-form label shown in reports.
    pub description: String,
}

impl DiffConfiguration {
    pub const DEFAULT_DESCRIPTION: &'static str = "XmlDiff";

    pub fn with_whitespace(whitespace: WhitespaceHandling) -> Self {
        Self {
            whitespace,
            ..Self::default()
        }
    }
}

impl Default for DiffConfiguration {
    fn default() -> Self {
        Self {
            whitespace: WhitespaceHandling::default(),
            description: Self::DEFAULT_DESCRIPTION.to_string(),
        }
    }
}
