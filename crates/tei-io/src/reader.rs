use crate::error::{Result, TeiError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use sonus_span_engine::Node;
use std::path::Path;

/// Deepest element nesting a document may have
///
/// Consolidation, rendering and serialization all recurse over the tree,
/// so deeper input is rejected while loading.
pub const MAX_DEPTH: usize = 512;

/// Markup outside the root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Misc {
    Comment(String),
    ProcessingInstruction(String),
    /// Document type declaration without the `<!DOCTYPE` and `>` delimiters
    DocType(String),
}

/// A parsed markup document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Everything between the XML declaration and the root element
    pub prolog: Vec<Misc>,
    pub root: Node,
    /// Comments and processing instructions after the root element
    pub epilog: Vec<Misc>,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self {
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }
}

/// Parse `xml` into a document tree
///
/// Leading text and tails are kept exactly as found, with entities and
/// CDATA sections resolved into plain text. Whitespace outside the root
/// element is dropped.
pub fn parse_document(xml: &str) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);
    reader.expand_empty_elements(false);

    let mut builder = TreeBuilder::default();

    loop {
        let position = reader.buffer_position();
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(source) => {
                return Err(TeiError::Xml {
                    position: reader.buffer_position(),
                    source,
                })
            }
        };

        match event {
            Event::Start(e) => builder.open(element(&e, position)?)?,
            Event::Empty(e) => {
                builder.open(element(&e, position)?)?;
                builder.close()?;
            }
            Event::End(_) => builder.close()?,
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|source| TeiError::Xml { position, source })?;
                builder.text(&text)?;
            }
            Event::CData(e) => builder.text(std::str::from_utf8(&e)?)?,
            Event::Comment(e) => {
                builder.misc(Misc::Comment(std::str::from_utf8(&e)?.to_string()))?;
            }
            Event::PI(e) => {
                builder.misc(Misc::ProcessingInstruction(
                    std::str::from_utf8(&e)?.to_string(),
                ))?;
            }
            Event::DocType(e) => {
                builder.misc(Misc::DocType(std::str::from_utf8(&e)?.trim().to_string()))?;
            }
            Event::Decl(_) => {}
            Event::Eof => break,
        }
    }

    builder.finish()
}

/// Read and parse a document from disk
pub fn read_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let xml = std::str::from_utf8(&bytes)?;
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);

    let document = parse_document(xml)?;
    log::debug!(
        "Loaded {} ({} elements)",
        path.display(),
        document.root.element_count()
    );
    Ok(document)
}

fn element(start: &BytesStart<'_>, position: usize) -> Result<Node> {
    let name = start.name();
    let mut node = Node::element(std::str::from_utf8(name.as_ref())?);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| TeiError::Attribute {
            position,
            message: e.to_string(),
        })?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|source| TeiError::Xml { position, source })?
            .into_owned();
        node.attributes.push((key, value));
    }

    Ok(node)
}

/// Assembles the node tree from a flat event stream
#[derive(Default)]
struct TreeBuilder {
    prolog: Vec<Misc>,
    open: Vec<Node>,
    root: Option<Node>,
    epilog: Vec<Misc>,
}

impl TreeBuilder {
    fn open(&mut self, node: Node) -> Result<()> {
        if self.open.is_empty() && self.root.is_some() {
            return Err(TeiError::structure(format!(
                "second root element <{}>",
                node.tag
            )));
        }
        if self.open.len() >= MAX_DEPTH {
            return Err(TeiError::structure(format!(
                "<{}> nested deeper than {MAX_DEPTH} elements",
                node.tag
            )));
        }
        self.open.push(node);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let node = self
            .open
            .pop()
            .ok_or_else(|| TeiError::structure("end tag without matching start tag"))?;

        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root = Some(node),
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        match self.open.last_mut() {
            Some(parent) => match parent.children.last_mut() {
                Some(last) => last.tail.push_str(text),
                None => parent.text.push_str(text),
            },
            None if text.trim().is_empty() => {}
            None => {
                return Err(TeiError::structure(format!(
                    "text outside the root element: {:?}",
                    text.trim()
                )))
            }
        }
        Ok(())
    }

    fn misc(&mut self, misc: Misc) -> Result<()> {
        if let Some(parent) = self.open.last_mut() {
            let node = match misc {
                Misc::Comment(body) => Node::comment(body),
                Misc::ProcessingInstruction(raw) => Node::processing_instruction(raw),
                Misc::DocType(_) => {
                    return Err(TeiError::structure("DOCTYPE inside an element"));
                }
            };
            parent.children.push(node);
            return Ok(());
        }

        let is_doctype = matches!(misc, Misc::DocType(_));
        match self.root {
            Some(_) if is_doctype => Err(TeiError::structure("DOCTYPE after the root element")),
            Some(_) => {
                self.epilog.push(misc);
                Ok(())
            }
            None => {
                self.prolog.push(misc);
                Ok(())
            }
        }
    }

    fn finish(self) -> Result<Document> {
        if let Some(unclosed) = self.open.last() {
            return Err(TeiError::structure(format!(
                "unclosed element <{}> at end of input",
                unclosed.tag
            )));
        }
        let root = self
            .root
            .ok_or_else(|| TeiError::structure("no root element"))?;

        Ok(Document {
            prolog: self.prolog,
            root,
            epilog: self.epilog,
        })
    }
}
