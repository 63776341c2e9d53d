use std::fs;
use std::io::{BufRead, Cursor};
use std::path::Path;
use std::sync::Arc;

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use thiserror::Error;

use crate::config::{DiffConfiguration, WhitespaceHandling};
use crate::source::{NodeKind, NodeSource, SourceHandle};

/// Errors raised while reading XML into a node stream.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to read XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Tag, attribute or text bytes were not valid UTF-8.
    #[error("invalid UTF-8 in XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to unescape an entity or character reference.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read an input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue the tokenizer lets through.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Source type produced by [`XmlDocument::source`].
pub type DocumentSource = XmlReaderSource<Cursor<Arc<[u8]>>>;

/// XML input shared by every source created from it.
///
/// Clones refer to the same document and therefore carry the same
/// [`SourceHandle`].
#[derive(Debug, Clone)]
pub struct XmlDocument {
    bytes: Arc<[u8]>,
    handle: SourceHandle,
}

impl XmlDocument {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            bytes: Arc::from(bytes),
            handle: SourceHandle::fresh(),
        }
    }

    /// Read a whole file into a document.
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        Ok(Self::new(fs::read(path)?))
    }

    pub fn handle(&self) -> SourceHandle {
        self.handle
    }

    /// Open a fresh cursor over this document.
    pub fn source(&self, config: &DiffConfiguration) -> DocumentSource {
        XmlReaderSource::with_handle(Cursor::new(Arc::clone(&self.bytes)), config, self.handle)
    }
}

impl From<&str> for XmlDocument {
    fn from(xml: &str) -> Self {
        Self::new(xml.as_bytes())
    }
}

impl From<String> for XmlDocument {
    fn from(xml: String) -> Self {
        Self::new(xml)
    }
}

impl From<Vec<u8>> for XmlDocument {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

#[derive(Debug, Clone)]
struct CurrentNode {
    kind: NodeKind,
    name: String,
    value: String,
    attributes: Vec<(String, String)>,
    self_closing: bool,
}

impl CurrentNode {
    fn named(kind: NodeKind, name: String) -> Self {
        Self {
            kind,
            name,
            value: String::new(),
            attributes: Vec::new(),
            self_closing: false,
        }
    }

    fn valued(kind: NodeKind, value: String) -> Self {
        Self {
            value,
            ..Self::named(kind, String::new())
        }
    }
}

/// [`NodeSource`] that pulls nodes from a `quick_xml` reader on demand.
pub struct XmlReaderSource<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    whitespace: WhitespaceHandling,
    handle: SourceHandle,
    // One entry per open element: is `xml:space="preserve"` in effect.
    preserve: Vec<bool>,
    current: Option<CurrentNode>,
    exhausted: bool,
}

impl<R: BufRead> XmlReaderSource<R> {
    /// Wrap any buffered reader. The source gets a handle of its own.
    pub fn from_reader(reader: R, config: &DiffConfiguration) -> Self {
        Self::with_handle(reader, config, SourceHandle::fresh())
    }

    fn with_handle(reader: R, config: &DiffConfiguration, handle: SourceHandle) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(false);

        Self {
            reader,
            buf: Vec::new(),
            whitespace: config.whitespace,
            handle,
            preserve: Vec::new(),
            current: None,
            exhausted: false,
        }
    }
}

impl<'a> XmlReaderSource<&'a [u8]> {
    pub fn from_bytes(xml: &'a [u8], config: &DiffConfiguration) -> Self {
        Self::from_reader(xml, config)
    }
}

impl<R: BufRead> NodeSource for XmlReaderSource<R> {
    type Error = SourceError;

    fn advance(&mut self) -> Result<bool, SourceError> {
        if self.exhausted {
            return Ok(false);
        }

        loop {
            self.buf.clear();
            let node = match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) => {
                    let node = element_node(&e, self.reader.decoder(), false)?;
                    let preserve = match attribute_value(&node, "xml:space") {
                        Some("preserve") => true,
                        Some("default") => false,
                        _ => in_preserve_scope(&self.preserve),
                    };
                    self.preserve.push(preserve);
                    node
                }
                Event::Empty(e) => element_node(&e, self.reader.decoder(), true)?,
                Event::End(e) => {
                    self.preserve.pop().ok_or_else(|| {
                        SourceError::Malformed(
                            "encountered closing tag without open tag".to_string(),
                        )
                    })?;
                    CurrentNode::named(NodeKind::EndElement, qname_to_string(e.name())?)
                }
                Event::Text(e) => {
                    let text = e.unescape()?.into_owned();
                    if is_xml_whitespace(&text) {
                        let significant = in_preserve_scope(&self.preserve);
                        if !keeps_whitespace(self.whitespace, significant) {
                            continue;
                        }
                        let kind = if significant {
                            NodeKind::SignificantWhitespace
                        } else {
                            NodeKind::Whitespace
                        };
                        CurrentNode::valued(kind, text)
                    } else {
                        CurrentNode::valued(NodeKind::Text, text)
                    }
                }
                Event::CData(e) => {
                    CurrentNode::valued(NodeKind::CData, std::str::from_utf8(&e)?.to_string())
                }
                Event::Comment(e) => {
                    CurrentNode::valued(NodeKind::Comment, std::str::from_utf8(&e)?.to_string())
                }
                Event::PI(e) => CurrentNode {
                    value: std::str::from_utf8(e.content())?.trim().to_string(),
                    ..CurrentNode::named(
                        NodeKind::ProcessingInstruction,
                        std::str::from_utf8(e.target())?.to_string(),
                    )
                },
                Event::Decl(_) => CurrentNode::named(NodeKind::XmlDeclaration, "xml".to_string()),
                Event::DocType(e) => CurrentNode::valued(
                    NodeKind::DocumentType,
                    std::str::from_utf8(&e)?.trim().to_string(),
                ),
                Event::Eof => {
                    self.exhausted = true;
                    self.current = None;
                    if !self.preserve.is_empty() {
                        return Err(SourceError::Malformed(
                            "unclosed element(s) at end of document".to_string(),
                        ));
                    }
                    return Ok(false);
                }
            };

            self.current = Some(node);
            return Ok(true);
        }
    }

    fn current_kind(&self) -> NodeKind {
        // Callers only ask after a successful advance; before that the
        // cursor behaves like an empty text node.
        self.current.as_ref().map_or(NodeKind::Text, |node| node.kind)
    }

    fn current_name(&self) -> &str {
        self.current.as_ref().map_or("", |node| node.name.as_str())
    }

    fn current_value(&self) -> &str {
        self.current.as_ref().map_or("", |node| node.value.as_str())
    }

    fn attribute_count(&self) -> usize {
        self.current.as_ref().map_or(0, |node| node.attributes.len())
    }

    fn attribute_at(&self, position: usize) -> Option<(&str, &str)> {
        let (name, value) = self.current.as_ref()?.attributes.get(position)?;
        Some((name.as_str(), value.as_str()))
    }

    fn attribute_by_name(&self, name: &str) -> Option<&str> {
        attribute_value(self.current.as_ref()?, name)
    }

    fn is_self_closing(&self) -> bool {
        self.current.as_ref().is_some_and(|node| node.self_closing)
    }

    fn handle(&self) -> SourceHandle {
        self.handle
    }
}

fn element_node(
    e: &BytesStart<'_>,
    decoder: Decoder,
    self_closing: bool,
) -> Result<CurrentNode, SourceError> {
    let mut node = CurrentNode::named(NodeKind::Element, qname_to_string(e.name())?);
    node.self_closing = self_closing;

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = qname_to_string(attr.key)?;
        let value = attr.decode_and_unescape_value(decoder)?.into_owned();
        node.attributes.push((key, value));
    }

    Ok(node)
}

fn attribute_value<'n>(node: &'n CurrentNode, name: &str) -> Option<&'n str> {
    node.attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn qname_to_string(name: QName<'_>) -> Result<String, SourceError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}

fn in_preserve_scope(preserve: &[bool]) -> bool {
    preserve.last().copied().unwrap_or(false)
}

fn keeps_whitespace(handling: WhitespaceHandling, significant: bool) -> bool {
    match handling {
        WhitespaceHandling::All => true,
        WhitespaceHandling::Significant => significant,
        WhitespaceHandling::None => false,
    }
}

fn is_xml_whitespace(text: &str) -> bool {
    text.bytes()
        .all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}
