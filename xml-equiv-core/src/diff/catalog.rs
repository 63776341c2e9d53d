use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// How a difference affects the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Invalidates equality and halts the scan.
    Major,
    /// Recorded for diagnostics only.
    Minor,
}

/// Closed set of divergences the engine can detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceType {
    /// Nodes at the same position have different kinds.
    NodeType,
    /// Elements with different tag names.
    ElementTagName,
    /// Elements with a different number of attributes.
    ElementNumAttributes,
    /// Same attributes, different document order.
    AttrSequence,
    /// One element has an attribute the other lacks.
    AttrNameNotFound,
    /// Attributes with the same name but different values.
    AttrValue,
    /// Text nodes with different content.
    TextValue,
    /// One side has more nodes than the other at this point.
    ChildNodelistLength,
}

impl DifferenceType {
    pub const ALL: [DifferenceType; 8] = [
        Self::NodeType,
        Self::ElementTagName,
        Self::ElementNumAttributes,
        Self::AttrSequence,
        Self::AttrNameNotFound,
        Self::AttrValue,
        Self::TextValue,
        Self::ChildNodelistLength,
    ];

    pub fn severity(self) -> Severity {
        match self {
            Self::AttrSequence => Severity::Minor,
            Self::NodeType
            | Self::ElementTagName
            | Self::ElementNumAttributes
            | Self::AttrNameNotFound
            | Self::AttrValue
            | Self::TextValue
            | Self::ChildNodelistLength => Severity::Major,
        }
    }

    pub fn is_major(self) -> bool {
        self.severity() == Severity::Major
    }

    /// Human-readable name of the compared property.
    pub fn description(self) -> &'static str {
        match self {
            Self::NodeType => "node type",
            Self::ElementTagName => "element tag name",
            Self::ElementNumAttributes => "number of element attributes",
            Self::AttrSequence => "sequence of attributes",
            Self::AttrNameNotFound => "attribute name",
            Self::AttrValue => "attribute value",
            Self::TextValue => "text value",
            Self::ChildNodelistLength => "number of child nodes",
        }
    }
}

impl Display for DifferenceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
