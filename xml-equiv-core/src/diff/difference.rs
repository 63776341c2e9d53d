use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::diff::catalog::{DifferenceType, Severity};
use crate::source::NodeKind;

/// One detected divergence between the control and test documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Difference {
    kind: DifferenceType,
    severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    control_kind: Option<NodeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_kind: Option<NodeKind>,
}

impl Difference {
    pub fn new(kind: DifferenceType) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            control_kind: None,
            test_kind: None,
        }
    }

    /// A difference that records the node kinds found on each side.
    pub fn with_node_kinds(kind: DifferenceType, control: NodeKind, test: NodeKind) -> Self {
        Self {
            control_kind: Some(control),
            test_kind: Some(test),
            ..Self::new(kind)
        }
    }

    pub fn kind(&self) -> DifferenceType {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_major(&self) -> bool {
        self.severity == Severity::Major
    }

    pub fn control_kind(&self) -> Option<NodeKind> {
        self.control_kind
    }

    pub fn test_kind(&self) -> Option<NodeKind> {
        self.test_kind
    }
}

impl Display for Difference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.control_kind, self.test_kind) {
            (Some(control), Some(test)) => write!(
                f,
                "Expected {} \"{}\" but was \"{}\"",
                self.kind, control, test
            ),
            _ => write!(f, "Expected same {}", self.kind),
        }
    }
}
