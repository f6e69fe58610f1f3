use super::document::{Document, ElementData, Node, NodeId};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Error, Reader, Result};
use tracing::trace;

/// Build a [`Document`] from XML text.
///
/// Whitespace is kept as text nodes and nothing is trimmed, so writing the
/// tree back reproduces the source layout.
pub(super) fn parse(contents: &str) -> Result<Document> {
    let mut reader = Reader::from_str(contents);
    let mut doc = Document::default();
    let mut stack: Vec<NodeId> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let node = element_node(e, stack.last().copied(), false)?;
                let id = doc.append(stack.last().copied(), node);
                stack.push(id);
            }
            Event::Empty(ref e) => {
                let node = element_node(e, stack.last().copied(), true)?;
                doc.append(stack.last().copied(), node);
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                doc.append(stack.last().copied(), Node::Text(text));
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                doc.append(stack.last().copied(), Node::CData(text));
            }
            Event::Comment(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                doc.append(stack.last().copied(), Node::Comment(text));
            }
            Event::Decl(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                doc.append(stack.last().copied(), Node::Decl(text));
            }
            Event::PI(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                doc.append(stack.last().copied(), Node::PI(text));
            }
            Event::DocType(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                doc.append(stack.last().copied(), Node::DocType(text));
            }
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last().and_then(|id| doc.element_data(*id)) {
        return Err(Error::UnexpectedEof(format!("unclosed element <{}>", open.name)));
    }

    trace!("Parsed XML document with {} nodes", doc.nodes.len());
    Ok(doc)
}

fn element_node(start: &BytesStart, parent: Option<NodeId>, self_closing: bool) -> Result<Node> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    Ok(Node::Element(ElementData {
        name,
        attributes,
        children: Vec::new(),
        parent,
        self_closing,
        raw: Some(String::from_utf8_lossy(start).into_owned()),
    }))
}
