use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Kind of node a [`NodeSource`] is currently positioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Start of an element, either `<a>` or self-closing `<a/>`.
    Element,
    /// Closing tag of a non-self-closing element.
    EndElement,
    /// Character data.
    Text,
    /// `<![CDATA[...]]>` section.
    CData,
    Comment,
    ProcessingInstruction,
    /// `<?xml ...?>` declaration.
    XmlDeclaration,
    DocumentType,
    /// Whitespace-only text outside an `xml:space="preserve"` scope.
    Whitespace,
    /// Whitespace-only text inside an `xml:space="preserve"` scope.
    SignificantWhitespace,
}

impl NodeKind {
    /// Short lowercase label used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Element => "element",
            Self::EndElement => "end element",
            Self::Text => "text",
            Self::CData => "cdata",
            Self::Comment => "comment",
            Self::ProcessingInstruction => "processing instruction",
            Self::XmlDeclaration => "xml declaration",
            Self::DocumentType => "document type",
            Self::Whitespace => "whitespace",
            Self::SignificantWhitespace => "significant whitespace",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the document a source reads from.
///
/// Two sources with equal handles are treated as the same document and are
/// never traversed against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceHandle(u64);

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

impl SourceHandle {
    /// Allocate a handle no other call in this process has returned.
    pub fn fresh() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Sequential cursor over one document's nodes.
///
/// A source starts positioned before its first node. Accessors describe the
/// node reached by the last successful [`advance`](NodeSource::advance) and
/// return empty values for fields the current node kind does not carry.
pub trait NodeSource {
    /// Error raised when the underlying reader cannot produce the next node.
    type Error;

    /// Move to the next node. Returns `Ok(false)` once the stream is exhausted.
    fn advance(&mut self) -> Result<bool, Self::Error>;

    fn current_kind(&self) -> NodeKind;

    /// Qualified name of the current element or end element.
    fn current_name(&self) -> &str;

    /// Value of the current text-like node.
    fn current_value(&self) -> &str;

    fn attribute_count(&self) -> usize;

    /// Attribute at `position` in document order, as `(name, value)`.
    ///
    /// Must return `Some` for every position below
    /// [`attribute_count`](NodeSource::attribute_count).
    fn attribute_at(&self, position: usize) -> Option<(&str, &str)>;

    /// Value of the attribute called `name`, ignoring position.
    fn attribute_by_name(&self, name: &str) -> Option<&str> {
        (0..self.attribute_count())
            .filter_map(|position| self.attribute_at(position))
            .find(|(attr_name, _)| *attr_name == name)
            .map(|(_, value)| value)
    }

    /// True when the current element was written as `<a/>`.
    fn is_self_closing(&self) -> bool;

    fn handle(&self) -> SourceHandle;
}

#[cfg(test)]
mod tests {
    use super::{NodeKind, NodeSource, SourceHandle};

    struct OneElement {
        handle: SourceHandle,
        attrs: Vec<(String, String)>,
    }

    impl NodeSource for OneElement {
        type Error = std::convert::Infallible;

        fn advance(&mut self) -> Result<bool, Self::Error> {
            Ok(false)
        }
        fn current_kind(&self) -> NodeKind {
            NodeKind::Element
        }
        fn current_name(&self) -> &str {
            "a"
        }
        fn current_value(&self) -> &str {
            ""
        }
        fn attribute_count(&self) -> usize {
            self.attrs.len()
        }
        fn attribute_at(&self, position: usize) -> Option<(&str, &str)> {
            self.attrs
                .get(position)
                .map(|(name, value)| (name.as_str(), value.as_str()))
        }
        fn is_self_closing(&self) -> bool {
            true
        }
        fn handle(&self) -> SourceHandle {
            self.handle
        }
    }

    #[test]
    fn fresh_handles_are_distinct() {
        assert_ne!(SourceHandle::fresh(), SourceHandle::fresh());
    }

    #[test]
    fn attribute_by_name_ignores_position() {
        let source = OneElement {
            handle: SourceHandle::fresh(),
            attrs: vec![
                ("x".to_string(), "1".to_string()),
                ("y".to_string(), "2".to_string()),
            ],
        };

        assert_eq!(source.attribute_by_name("y"), Some("2"));
        assert_eq!(source.attribute_by_name("z"), None);
    }
}
