//! DOM snapshot used by the folio reader's selection tooling.
//!
//! Holds parsed reading content (including iframe-embedded sub-documents),
//! ranges over it, and the range cloning that plain-text extraction runs on.

mod range;
mod sink;
mod tree;

pub use range::{BoundaryPoint, DomRange, RangeNode};
pub use sink::{SinkHandle, TreeBuilder, parse_html};
pub use tree::{
    Ancestors, Descendants, DomTree, DomUpdate, ElementData, NodeData, NodeId, ROOT_NODE_ID,
};
