//! [`Measure`] over a [`DomTree`] snapshot with recorded layout boxes.
//!
//! The snapshot carries no layout engine: whoever renders the content records
//! each node's client rects with [`DomMeasure::set_client_rects`]. Computed
//! style is read from `style` attributes.

use crate::geometry::{EmbeddingSurface, Frame, Rect, Viewport};
use crate::measure::{Measure, Target};
use crate::selection::TextSelection;
use folio_css::{Padding, ScaleFactors, parse_style_attribute_into_map, scale_factors_from_transform};
use folio_dom::{DomRange, DomTree, NodeData, NodeId, RangeNode};
use std::collections::{HashMap, HashSet};

/// Measurement backed by a DOM snapshot.
pub struct DomMeasure<'tree> {
    tree: &'tree DomTree,
    boxes: HashMap<NodeId, Vec<Rect>>,
    viewport: Viewport,
}

impl<'tree> DomMeasure<'tree> {
    pub fn new(tree: &'tree DomTree, viewport: Viewport) -> Self {
        Self {
            tree,
            boxes: HashMap::new(),
            viewport,
        }
    }

    pub const fn tree(&self) -> &'tree DomTree {
        self.tree
    }

    /// Record the client rects of `node`, in its own document's coordinates.
    pub fn set_client_rects(&mut self, node: NodeId, rects: Vec<Rect>) {
        self.boxes.insert(node, rects);
    }

    #[must_use]
    pub fn with_client_rects(mut self, node: NodeId, rects: Vec<Rect>) -> Self {
        self.set_client_rects(node, rects);
        self
    }

    fn node_rects(&self, node: NodeId) -> &[Rect] {
        self.boxes.get(&node).map_or(&[], Vec::as_slice)
    }

    fn style(&self, node: NodeId) -> HashMap<String, String> {
        self.tree
            .attribute(node, "style")
            .map(parse_style_attribute_into_map)
            .unwrap_or_default()
    }

    /// Boxes of a range: every element it wholly contains whose parent it
    /// does not, plus every text node it touches. Partially selected text
    /// reports its whole box.
    fn range_rects(&self, range: &DomRange) -> Vec<Rect> {
        let selected = self.tree.selected_nodes(range);
        let contained: HashSet<NodeId> = selected
            .iter()
            .filter_map(|entry| match entry {
                RangeNode::Contained(node) => Some(*node),
                RangeNode::Partial(_) => None,
            })
            .collect();

        let mut rects = Vec::new();
        for entry in &selected {
            let node = entry.node();
            let include = match self.tree.get_node_data(node) {
                Some(NodeData::Text(_)) => true,
                Some(NodeData::Element(_)) => {
                    contained.contains(&node)
                        && !self
                            .tree
                            .parent(node)
                            .is_some_and(|parent| contained.contains(&parent))
                }
                _ => false,
            };
            if include {
                rects.extend_from_slice(self.node_rects(node));
            }
        }
        rects
    }
}

impl Measure for DomMeasure<'_> {
    type Span = DomRange;
    type Element = NodeId;

    fn client_rects(&self, target: &Target<DomRange, NodeId>) -> Vec<Rect> {
        match target {
            Target::Span(range) => self.range_rects(range),
            Target::Element(node) => self.node_rects(*node).to_vec(),
        }
    }

    fn padding(&self, element: &NodeId) -> Padding {
        Padding::from_declarations(&self.style(*element))
    }

    fn embedding_surface(&self, target: &Target<DomRange, NodeId>) -> Option<EmbeddingSurface> {
        let node = match target {
            Target::Span(range) => self.tree.common_ancestor(range),
            Target::Element(node) => *node,
        };
        let frame_element = self.tree.embedding_frame(node)?;
        let frame = self
            .node_rects(frame_element)
            .iter()
            .copied()
            .reduce(|acc, rect| acc.union(&rect))
            .map_or(Frame::ORIGIN, |bounds| Frame::new(bounds.top, bounds.left));
        let scale = self
            .style(frame_element)
            .get("transform")
            .map_or(ScaleFactors::IDENTITY, |value| {
                scale_factors_from_transform(value)
            });
        log::trace!(
            target: "folio_selection",
            "target embedded in {frame_element:?} at {frame:?} scaled {scale:?}"
        );
        Some(EmbeddingSurface { frame, scale })
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Build a [`TextSelection`] for `range`, extracting its text with the
/// `reject_tags` filter (e.g. `["sup"]` to drop footnote markers).
pub fn text_selection(
    tree: &DomTree,
    key: impl Into<String>,
    range: DomRange,
    index: usize,
    reject_tags: &[&str],
) -> TextSelection<DomRange> {
    let text = tree.text_from_range(&range, reject_tags);
    TextSelection::new(key, text, range, index)
}
