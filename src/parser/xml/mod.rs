// XML tree module
//
// Holds a parsed XML document as an arena of nodes so that manifest queries
// can navigate it by path and the whole tree can be written back unchanged.

mod document;
mod element;
mod reader;
mod writer;

pub use document::{Document, NodeId};
pub use element::Element;
