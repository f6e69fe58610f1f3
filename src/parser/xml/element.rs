use super::document::{Document, ElementData, NodeId};
use std::fmt;

/// Borrowed handle to an element node of a [`Document`]
#[derive(Clone, Copy)]
pub struct Element<'d> {
    doc: &'d Document,
    id: NodeId,
    data: &'d ElementData,
}

impl<'d> Element<'d> {
    pub(crate) fn new(doc: &'d Document, id: NodeId, data: &'d ElementData) -> Self {
        Self { doc, id, data }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Qualified tag name, including any namespace prefix
    pub fn name(&self) -> &'d str {
        &self.data.name
    }

    /// Attribute value by qualified name (`name`, `android:name`, ...)
    pub fn attribute(&self, name: &str) -> Option<&'d str> {
        self.data
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in source order
    pub fn attributes(&self) -> impl Iterator<Item = (&'d str, &'d str)> + 'd {
        self.data
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Child elements with the given tag (`*` for any)
    pub fn children(&self, tag: &str) -> Vec<Element<'d>> {
        self.elements()
            .filter(|child| tag == "*" || child.name() == tag)
            .collect()
    }

    /// All child elements, skipping text and comments
    pub fn elements(&self) -> impl Iterator<Item = Element<'d>> + 'd {
        let doc = self.doc;
        self.data
            .children
            .iter()
            .filter_map(move |id| doc.element(*id))
    }

    pub fn parent(&self) -> Option<Element<'d>> {
        self.data.parent.and_then(|id| self.doc.element(id))
    }

    /// Query descendants by relative path, e.g. `intent-filter/action`.
    ///
    /// An empty path yields this element itself.
    pub fn query(&self, path: &str) -> Vec<Element<'d>> {
        let mut current = vec![*self];
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .iter()
                .flat_map(|element| element.children(segment))
                .collect();
            if current.is_empty() {
                break;
            }
        }
        current
    }
}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("name", &self.data.name)
            .field("attributes", &self.data.attributes)
            .finish()
    }
}
