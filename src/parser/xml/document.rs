use super::element::Element;
use super::{reader, writer};
use quick_xml::Result;

pub(crate) const UTF8_BOM: &str = "\u{feff}";

/// Index of a node inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// A single node of the tree.
///
/// Text-like nodes keep their content exactly as it appeared in the source
/// (still escaped) so the document can be written back without changes.
#[derive(Debug, Clone)]
pub(crate) enum Node {
    Element(ElementData),
    Text(String),
    CData(String),
    Comment(String),
    Decl(String),
    PI(String),
    DocType(String),
}

#[derive(Debug, Clone)]
pub(crate) struct ElementData {
    pub name: String,
    /// Attributes in source order, values unescaped
    pub attributes: Vec<(String, String)>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    /// Written as `<tag/>` in the source
    pub self_closing: bool,
    /// Start tag text as it appeared in the source, dropped once the
    /// attributes are edited
    pub raw: Option<String>,
}

/// Parsed XML document
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    /// Top-level nodes in source order: prolog, root element, epilogue
    pub(crate) top: Vec<NodeId>,
    pub(crate) root: Option<NodeId>,
    /// Source started with a UTF-8 byte order mark
    pub(crate) bom: bool,
}

impl Document {
    /// Parse a complete document
    pub fn parse(contents: &str) -> Result<Self> {
        let body = contents.strip_prefix(UTF8_BOM);
        let mut doc = reader::parse(body.unwrap_or(contents))?;
        doc.bom = body.is_some();
        Ok(doc)
    }

    /// The document element, if there is one
    pub fn root(&self) -> Option<Element<'_>> {
        self.root.and_then(|id| self.element(id))
    }

    /// Get the element with the given id
    pub fn element(&self, id: NodeId) -> Option<Element<'_>> {
        match self.nodes.get(id.0) {
            Some(Node::Element(data)) => Some(Element::new(self, id, data)),
            _ => None,
        }
    }

    /// Query elements by absolute path, e.g. `/manifest/application/activity`.
    ///
    /// The first segment has to match the root element. A `*` segment matches
    /// any tag. Results come back in document order.
    pub fn query(&self, path: &str) -> Vec<Element<'_>> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let Some(root) = self.root() else {
            return Vec::new();
        };

        match segments.next() {
            Some(first) if first == "*" || first == root.name() => {
                let rest: Vec<&str> = segments.collect();
                root.query(&rest.join("/"))
            }
            _ => Vec::new(),
        }
    }

    /// Number of element nodes in the document
    pub fn element_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Element(_)))
            .count()
    }

    /// Set an attribute on an element, replacing an existing value in place.
    ///
    /// Returns false if `id` does not refer to an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let Some(data) = self.element_data_mut(id) else {
            return false;
        };

        match data.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => data.attributes.push((name.to_string(), value.to_string())),
        }
        data.raw = None;
        true
    }

    /// Remove an attribute from an element, returning its old value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let data = self.element_data_mut(id)?;
        let pos = data.attributes.iter().position(|(k, _)| k == name)?;
        data.raw = None;
        Some(data.attributes.remove(pos).1)
    }

    /// Serialize the tree back to XML
    pub fn to_xml_bytes(&self) -> Result<Vec<u8>> {
        writer::write(self)
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn element_data(&self, id: NodeId) -> Option<&ElementData> {
        match self.nodes.get(id.0) {
            Some(Node::Element(data)) => Some(data),
            _ => None,
        }
    }

    fn element_data_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.nodes.get_mut(id.0) {
            Some(Node::Element(data)) => Some(data),
            _ => None,
        }
    }

    /// Append a node under `parent`, or at the top level when `parent` is None
    pub(crate) fn append(&mut self, parent: Option<NodeId>, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        let is_element = matches!(node, Node::Element(_));
        self.nodes.push(node);

        match parent.and_then(|p| self.element_data_mut(p)) {
            Some(data) => data.children.push(id),
            None => {
                self.top.push(id);
                if is_element && self.root.is_none() {
                    self.root = Some(id);
                }
            }
        }
        id
    }
}
