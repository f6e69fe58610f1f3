pub mod xml;

pub use xml::{Document, Element, NodeId};
