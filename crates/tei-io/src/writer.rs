use crate::error::Result;
use crate::reader::{Document, Misc};
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use sonus_span_engine::{Node, NodeKind};
use std::path::Path;

const DECLARATION: &str = "<?xml version='1.0' encoding='UTF-8'?>";

/// Serialize a document as UTF-8 markup
pub fn write_document(document: &Document) -> Result<String> {
    let mut writer = Writer::new(Vec::with_capacity(4096));
    writer.get_mut().extend_from_slice(DECLARATION.as_bytes());
    newline(&mut writer)?;

    for misc in &document.prolog {
        write_misc(&mut writer, misc)?;
        newline(&mut writer)?;
    }
    write_node(&mut writer, &document.root)?;
    for misc in &document.epilog {
        newline(&mut writer)?;
        write_misc(&mut writer, misc)?;
    }
    newline(&mut writer)?;

    let xml = String::from_utf8(writer.into_inner()).map_err(|e| e.utf8_error())?;
    Ok(xml)
}

/// Serialize `document` and write it to `path`
pub fn write_document_to(path: impl AsRef<Path>, document: &Document) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, write_document(document)?)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

type MarkupWriter = Writer<Vec<u8>>;

fn newline(writer: &mut MarkupWriter) -> Result<()> {
    writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
    Ok(())
}

fn write_misc(writer: &mut MarkupWriter, misc: &Misc) -> Result<()> {
    let event = match misc {
        Misc::Comment(body) => Event::Comment(BytesText::from_escaped(body.as_str())),
        Misc::ProcessingInstruction(raw) => Event::PI(BytesText::from_escaped(raw.as_str())),
        Misc::DocType(decl) => Event::DocType(BytesText::from_escaped(decl.as_str())),
    };
    writer.write_event(event)?;
    Ok(())
}

/// Character data keeps quotes as they are; only `&`, `<` and `>` are escaped
fn write_text(writer: &mut MarkupWriter, text: &str) -> Result<()> {
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    }
    Ok(())
}

fn write_node(writer: &mut MarkupWriter, node: &Node) -> Result<()> {
    match node.kind {
        NodeKind::Comment => {
            writer.write_event(Event::Comment(BytesText::from_escaped(node.text.as_str())))?;
        }
        NodeKind::ProcessingInstruction => {
            writer.write_event(Event::PI(BytesText::from_escaped(node.text.as_str())))?;
        }
        NodeKind::Element => {
            let mut start = BytesStart::new(node.tag.as_str());
            for (key, value) in &node.attributes {
                start.push_attribute((key.as_str(), value.as_str()));
            }

            if node.text.is_empty() && node.children.is_empty() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
                write_text(writer, &node.text)?;
                for child in &node.children {
                    write_node(writer, child)?;
                }
                writer.write_event(Event::End(BytesEnd::new(node.tag.as_str())))?;
            }
        }
    }
    write_text(writer, &node.tail)
}
