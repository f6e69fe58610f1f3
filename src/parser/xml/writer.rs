use super::document::{Document, Node, NodeId, UTF8_BOM};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Result, Writer};

/// Serialize a [`Document`] back to XML bytes
pub(super) fn write(doc: &Document) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    if doc.bom {
        out.extend_from_slice(UTF8_BOM.as_bytes());
    }

    let mut writer = Writer::new(out);
    for id in &doc.top {
        write_node(doc, *id, &mut writer)?;
    }
    Ok(writer.into_inner())
}

fn write_node(doc: &Document, id: NodeId, writer: &mut Writer<Vec<u8>>) -> Result<()> {
    match doc.node(id) {
        Node::Element(element) => {
            let start = match &element.raw {
                Some(raw) => BytesStart::from_content(raw.as_str(), element.name.len()),
                None => {
                    let mut start = BytesStart::new(element.name.as_str());
                    for (key, value) in &element.attributes {
                        start.push_attribute((key.as_str(), value.as_str()));
                    }
                    start
                }
            };

            if element.self_closing && element.children.is_empty() {
                return writer.write_event(Event::Empty(start));
            }

            writer.write_event(Event::Start(start))?;
            for child in &element.children {
                write_node(doc, *child, writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))
        }
        Node::Text(raw) => writer.write_event(Event::Text(BytesText::from_escaped(raw.as_str()))),
        Node::CData(raw) => writer.write_event(Event::CData(BytesCData::new(raw.as_str()))),
        Node::Comment(raw) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(raw.as_str())))
        }
        // Declaration content starts with the "xml" target name
        Node::Decl(raw) => writer.write_event(Event::Decl(BytesDecl::from_start(
            BytesStart::from_content(raw.as_str(), 3),
        ))),
        Node::PI(raw) => writer.write_event(Event::PI(BytesText::from_escaped(raw.as_str()))),
        Node::DocType(raw) => {
            writer.write_event(Event::DocType(BytesText::from_escaped(raw.as_str())))
        }
    }
}
