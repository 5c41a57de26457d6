//! Live ranges over a [`DomTree`]: boundary ordering, content cloning and
//! plain-text extraction.
//!
//! Offsets inside text nodes count `char`s; offsets inside any other node
//! count children.

use crate::tree::{DomTree, NodeData, NodeId};
use core::cmp::Ordering;

/// A `(node, offset)` boundary point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryPoint {
    pub node: NodeId,
    pub offset: usize,
}

impl BoundaryPoint {
    pub const fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A contiguous span of content between two boundary points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomRange {
    pub start: BoundaryPoint,
    pub end: BoundaryPoint,
}

impl DomRange {
    pub const fn new(start: BoundaryPoint, end: BoundaryPoint) -> Self {
        Self { start, end }
    }

    /// A collapsed range at `point`.
    pub const fn collapsed_at(point: BoundaryPoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Range covering all of `node`'s contents.
    pub fn select_node_contents(tree: &DomTree, node: NodeId) -> Self {
        let length = match tree.get_node_data(node) {
            Some(NodeData::Text(text) | NodeData::Comment(text)) => text.chars().count(),
            _ => tree.children(node).len(),
        };
        Self::new(BoundaryPoint::new(node, 0), BoundaryPoint::new(node, length))
    }

    /// Range covering `node` itself. `None` for a detached node or a root.
    pub fn select_node(tree: &DomTree, node: NodeId) -> Option<Self> {
        let parent = tree.parent(node)?;
        let index = tree.children(parent).iter().position(|child| *child == node)?;
        Some(Self::new(
            BoundaryPoint::new(parent, index),
            BoundaryPoint::new(parent, index + 1),
        ))
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// How a node relates to a range, as reported by [`DomTree::selected_nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeNode {
    /// The node lies entirely inside the range.
    Contained(NodeId),
    /// The node holds one or both of the range's boundary points.
    Partial(NodeId),
}

impl RangeNode {
    pub const fn node(self) -> NodeId {
        match self {
            Self::Contained(node) | Self::Partial(node) => node,
        }
    }
}

/// Sort key of a boundary point: the node's child-index path followed by
/// the offset. Lexicographic order on keys is DOM boundary-point order.
struct RangeKeys {
    start: Vec<usize>,
    end: Vec<usize>,
}

impl RangeKeys {
    fn new(tree: &DomTree, range: &DomRange) -> Self {
        Self {
            start: tree.boundary_key(range.start),
            end: tree.boundary_key(range.end),
        }
    }

    /// Whether the child at `index` under the node at `parent_path`
    /// intersects the range.
    fn intersects(&self, parent_path: &[usize], index: usize) -> bool {
        let mut before = parent_path.to_vec();
        before.push(index);
        let mut after = parent_path.to_vec();
        after.push(index + 1);
        after > self.start && before < self.end
    }

    /// Whether the child at `index` lies wholly inside the range.
    fn contains(&self, parent_path: &[usize], index: usize) -> bool {
        let mut before = parent_path.to_vec();
        before.push(index);
        let mut after = parent_path.to_vec();
        after.push(index + 1);
        before >= self.start && after <= self.end
    }
}

impl DomTree {
    fn boundary_key(&self, point: BoundaryPoint) -> Vec<usize> {
        let mut key = self.path_from_root(point.node);
        key.push(point.offset);
        key
    }

    /// Order two boundary points in the same tree.
    pub fn compare_points(&self, first: BoundaryPoint, second: BoundaryPoint) -> Ordering {
        self.boundary_key(first).cmp(&self.boundary_key(second))
    }

    /// Deepest node containing both boundary points of `range`.
    pub fn common_ancestor(&self, range: &DomRange) -> NodeId {
        let start_chain: Vec<NodeId> = core::iter::once(range.start.node)
            .chain(self.ancestors(range.start.node))
            .collect();
        core::iter::once(range.end.node)
            .chain(self.ancestors(range.end.node))
            .find(|node| start_chain.contains(node))
            .unwrap_or(range.start.node)
    }

    /// Every node the range touches, in document order, starting below the
    /// common ancestor. A range inside one character-data node reports that
    /// node as partial.
    pub fn selected_nodes(&self, range: &DomRange) -> Vec<RangeNode> {
        let ancestor = self.common_ancestor(range);
        if is_character_data(self.get_node_data(ancestor)) {
            return vec![RangeNode::Partial(ancestor)];
        }
        let keys = RangeKeys::new(self, range);
        let mut out = Vec::new();
        self.collect_selected(ancestor, &self.path_from_root(ancestor), &keys, &mut out);
        out
    }

    fn collect_selected(
        &self,
        parent: NodeId,
        parent_path: &[usize],
        keys: &RangeKeys,
        out: &mut Vec<RangeNode>,
    ) {
        for (index, child) in self.children(parent).iter().enumerate() {
            if !keys.intersects(parent_path, index) {
                continue;
            }
            if keys.contains(parent_path, index) {
                out.push(RangeNode::Contained(*child));
            } else {
                out.push(RangeNode::Partial(*child));
            }
            let mut child_path = parent_path.to_vec();
            child_path.push(index);
            self.collect_selected(*child, &child_path, keys, out);
        }
    }

    /// Copy the range's contents into a detached fragment. The live tree is
    /// not modified; partially selected text nodes are sliced.
    pub fn clone_contents(&self, range: &DomRange) -> Self {
        let mut fragment = Self::fragment();
        let ancestor = self.common_ancestor(range);
        if let Some(NodeData::Text(text)) = self.get_node_data(ancestor) {
            let sliced = slice_chars(text, range.start.offset, range.end.offset);
            let node = fragment.create_text(&sliced);
            fragment.append_child(fragment.root(), node);
            return fragment;
        }
        let keys = RangeKeys::new(self, range);
        let root = fragment.root();
        self.clone_children(
            ancestor,
            &self.path_from_root(ancestor),
            range,
            &keys,
            &mut fragment,
            root,
        );
        fragment
    }

    fn clone_children(
        &self,
        parent: NodeId,
        parent_path: &[usize],
        range: &DomRange,
        keys: &RangeKeys,
        fragment: &mut Self,
        target: NodeId,
    ) {
        for (index, child) in self.children(parent).iter().enumerate() {
            if !keys.intersects(parent_path, index) {
                continue;
            }
            let data = match self.get_node_data(*child) {
                Some(NodeData::Text(text)) => {
                    let from = if range.start.node == *child {
                        range.start.offset
                    } else {
                        0
                    };
                    let to = if range.end.node == *child {
                        range.end.offset
                    } else {
                        usize::MAX
                    };
                    NodeData::Text(slice_chars(text, from, to))
                }
                Some(other) => other.clone(),
                None => continue,
            };
            let copy = fragment.create_node(data);
            fragment.append_child(target, copy);
            let mut child_path = parent_path.to_vec();
            child_path.push(index);
            self.clone_children(*child, &child_path, range, keys, fragment, copy);
        }
    }

    /// Plain text of the range, skipping text nodes whose parent element's
    /// lowercased tag name is in `reject_tags`.
    ///
    /// Works on a cloned fragment, so the live tree is untouched. Whitespace
    /// is preserved as-is.
    pub fn text_from_range(&self, range: &DomRange, reject_tags: &[&str]) -> String {
        let fragment = self.clone_contents(range);
        let mut text = String::new();
        for node in fragment.descendants(fragment.root()) {
            let Some(NodeData::Text(value)) = fragment.get_node_data(node) else {
                continue;
            };
            let rejected = fragment
                .parent(node)
                .and_then(|parent| fragment.element(parent))
                .is_some_and(|element| {
                    let tag = element.tag_name.to_ascii_lowercase();
                    reject_tags.contains(&tag.as_str())
                });
            if !rejected {
                text.push_str(value);
            }
        }
        text
    }
}

fn is_character_data(data: Option<&NodeData>) -> bool {
    matches!(data, Some(NodeData::Text(_) | NodeData::Comment(_)))
}

fn slice_chars(text: &str, from: usize, to: usize) -> String {
    text.chars()
        .skip(from)
        .take(to.saturating_sub(from))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let para = tree.create_element("p");
        let head = tree.create_text("Hello ");
        let em = tree.create_element("em");
        let inner = tree.create_text("brave");
        let tail = tree.create_text(" world");
        tree.append_child(tree.root(), para);
        tree.append_child(para, head);
        tree.append_child(para, em);
        tree.append_child(em, inner);
        tree.append_child(para, tail);
        (tree, head, inner, tail)
    }

    #[test]
    fn boundary_points_follow_document_order() {
        let (tree, head, inner, _) = sample();
        let para = tree.parent(head).unwrap();
        assert_eq!(
            tree.compare_points(BoundaryPoint::new(head, 5), BoundaryPoint::new(inner, 0)),
            Ordering::Less
        );
        // (p, 1) sits before the <em> and therefore before anything inside it.
        assert_eq!(
            tree.compare_points(BoundaryPoint::new(para, 1), BoundaryPoint::new(inner, 0)),
            Ordering::Less
        );
        assert_eq!(
            tree.compare_points(BoundaryPoint::new(para, 2), BoundaryPoint::new(inner, 3)),
            Ordering::Greater
        );
    }

    #[test]
    fn partial_range_slices_edge_text_nodes() {
        let (tree, head, _, tail) = sample();
        let range = DomRange::new(BoundaryPoint::new(head, 3), BoundaryPoint::new(tail, 3));
        assert_eq!(tree.text_from_range(&range, &[]), "lo brave wo");
        assert_eq!(tree.text_from_range(&range, &["em"]), "lo  wo");
    }

    #[test]
    fn range_inside_one_text_node() {
        let (tree, _, inner, _) = sample();
        let range = DomRange::new(BoundaryPoint::new(inner, 1), BoundaryPoint::new(inner, 4));
        assert_eq!(tree.common_ancestor(&range), inner);
        // The fragment holds a bare text node, so its parent is not an element.
        assert_eq!(tree.text_from_range(&range, &["em"]), "rav");
        assert_eq!(tree.selected_nodes(&range), vec![RangeNode::Partial(inner)]);
    }

    #[test]
    fn selected_nodes_marks_contained_and_partial() {
        let (tree, head, inner, tail) = sample();
        let em = tree.parent(inner).unwrap();
        let range = DomRange::new(BoundaryPoint::new(head, 2), BoundaryPoint::new(tail, 1));
        assert_eq!(
            tree.selected_nodes(&range),
            vec![
                RangeNode::Partial(head),
                RangeNode::Contained(em),
                RangeNode::Contained(inner),
                RangeNode::Partial(tail),
            ]
        );
    }

    #[test]
    fn collapsed_range_yields_no_text() {
        let (tree, head, _, _) = sample();
        let range = DomRange::collapsed_at(BoundaryPoint::new(head, 2));
        assert!(range.is_collapsed());
        assert_eq!(tree.text_from_range(&range, &[]), "");
    }
}
