//! DOM tree structure and node data.

use std::collections::HashMap;

/// Unique identifier for a DOM node within one [`DomTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// The root node of every tree: a `Document` for parsed trees, a
/// `DocumentFragment` for cloned range contents.
pub const ROOT_NODE_ID: NodeId = NodeId::from_raw(0);

/// Data stored for each DOM node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Document,
    DocumentFragment,
    Element(ElementData),
    Text(String),
    Comment(String),
}

impl NodeData {
    /// Lowercased tag name when this is an element.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::Element(element) => Some(element.tag_name.as_str()),
            Self::Document | Self::DocumentFragment | Self::Text(_) | Self::Comment(_) => None,
        }
    }
}

/// Data for an element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub tag_name: String,
    pub attributes: HashMap<String, String>,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attributes: HashMap::new(),
        }
    }

    pub fn set_attribute(&mut self, name: String, value: String) {
        self.attributes.insert(name, value);
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Update streamed by the HTML tree builder and replayed into a [`DomTree`].
#[derive(Debug, Clone)]
pub enum DomUpdate {
    CreateNode { id: NodeId, data: NodeData },
    AppendChild { parent: NodeId, child: NodeId },
    /// Append character data, merging into a trailing text child when present.
    AppendText { parent: NodeId, id: NodeId, text: String },
    InsertBefore { sibling: NodeId, child: NodeId },
    /// Insert character data before `sibling`, merging into a preceding text
    /// sibling when present.
    InsertTextBefore { sibling: NodeId, id: NodeId, text: String },
    Detach { node: NodeId },
    ReparentChildren { from: NodeId, to: NodeId },
}

/// DOM tree that stores node relationships and node data in side tables.
#[derive(Debug, Clone)]
pub struct DomTree {
    next_id: u64,
    node_data: HashMap<NodeId, NodeData>,
    parents: HashMap<NodeId, NodeId>,
    children: HashMap<NodeId, Vec<NodeId>>,
}

impl DomTree {
    /// Create a tree holding only an empty `Document` root.
    pub fn new() -> Self {
        Self::with_root(NodeData::Document)
    }

    /// Create a tree holding only an empty `DocumentFragment` root.
    pub fn fragment() -> Self {
        Self::with_root(NodeData::DocumentFragment)
    }

    fn with_root(root: NodeData) -> Self {
        let mut tree = Self {
            next_id: 0,
            node_data: HashMap::new(),
            parents: HashMap::new(),
            children: HashMap::new(),
        };
        let root_id = tree.create_node(root);
        debug_assert_eq!(root_id, ROOT_NODE_ID);
        tree
    }

    pub const fn root(&self) -> NodeId {
        ROOT_NODE_ID
    }

    /// Allocate a fresh node with the given data. The node starts detached.
    pub fn create_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::from_raw(self.next_id);
        self.next_id += 1;
        self.node_data.insert(id, data);
        id
    }

    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.create_node(NodeData::Element(ElementData::new(tag_name)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.create_node(NodeData::Text(text.to_owned()))
    }

    /// Get data for a node.
    pub fn get_node_data(&self, node: NodeId) -> Option<&NodeData> {
        self.node_data.get(&node)
    }

    /// Get mutable data for a node.
    pub fn get_node_data_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.node_data.get_mut(&node)
    }

    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match self.node_data.get(&node) {
            Some(NodeData::Element(element)) => Some(element),
            _ => None,
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|element| element.attribute(name))
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(NodeData::Element(element)) = self.node_data.get_mut(&node) {
            element.set_attribute(name.to_owned(), value.to_owned());
        }
    }

    /// Establish parent-child relationship, detaching the child first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.parents.insert(child, parent);
        self.children.entry(parent).or_default().push(child);
    }

    /// Insert `child` immediately before `sibling` under the sibling's parent.
    pub fn insert_before(&mut self, sibling: NodeId, child: NodeId) {
        let Some(parent) = self.parent(sibling) else {
            return;
        };
        self.detach(child);
        let siblings = self.children.entry(parent).or_default();
        let index = siblings
            .iter()
            .position(|candidate| *candidate == sibling)
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        self.parents.insert(child, parent);
    }

    /// Remove a node from its parent. The node and its subtree stay allocated.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parents.remove(&node) else {
            return;
        };
        if let Some(siblings) = self.children.get_mut(&parent) {
            siblings.retain(|candidate| *candidate != node);
        }
    }

    /// Get parent of a node.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(&node).copied()
    }

    /// The child of `node`'s parent immediately before it.
    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|candidate| *candidate == node)?;
        index.checked_sub(1).and_then(|prev| siblings.get(prev).copied())
    }

    fn text_mut(&mut self, node: NodeId) -> Option<&mut String> {
        match self.get_node_data_mut(node) {
            Some(NodeData::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Get children of a node.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.children.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Apply a streamed update from the tree builder.
    pub fn apply(&mut self, update: DomUpdate) {
        match update {
            DomUpdate::CreateNode { id, data } => {
                self.next_id = self.next_id.max(id.as_u64() + 1);
                self.node_data.insert(id, data);
            }
            DomUpdate::AppendChild { parent, child } => self.append_child(parent, child),
            DomUpdate::AppendText { parent, id, text } => {
                let trailing = self.children(parent).last().copied();
                let merged = match trailing {
                    Some(node) => self.text_mut(node),
                    None => None,
                };
                if let Some(existing) = merged {
                    existing.push_str(&text);
                    return;
                }
                self.next_id = self.next_id.max(id.as_u64() + 1);
                self.node_data.insert(id, NodeData::Text(text));
                self.append_child(parent, id);
            }
            DomUpdate::InsertBefore { sibling, child } => self.insert_before(sibling, child),
            DomUpdate::InsertTextBefore { sibling, id, text } => {
                let previous = self.previous_sibling(sibling);
                let merged = match previous {
                    Some(node) => self.text_mut(node),
                    None => None,
                };
                if let Some(existing) = merged {
                    existing.push_str(&text);
                    return;
                }
                self.next_id = self.next_id.max(id.as_u64() + 1);
                self.node_data.insert(id, NodeData::Text(text));
                self.insert_before(sibling, id);
            }
            DomUpdate::Detach { node } => self.detach(node),
            DomUpdate::ReparentChildren { from, to } => {
                for child in self.children(from).to_vec() {
                    self.append_child(to, child);
                }
            }
        }
    }

    /// Ancestors of `node`, nearest first, excluding `node` itself.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(node),
        }
    }

    /// Descendants of `root` in document (pre-)order, excluding `root`.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(root).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// First element under `root` (document order) with the given tag name.
    pub fn find_element(&self, root: NodeId, tag_name: &str) -> Option<NodeId> {
        self.descendants(root).find(|node| {
            self.get_node_data(*node)
                .and_then(NodeData::tag_name)
                .is_some_and(|tag| tag.eq_ignore_ascii_case(tag_name))
        })
    }

    /// All elements under `root` with the given tag name, in document order.
    pub fn elements_by_tag(&self, root: NodeId, tag_name: &str) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|node| {
                self.get_node_data(*node)
                    .and_then(NodeData::tag_name)
                    .is_some_and(|tag| tag.eq_ignore_ascii_case(tag_name))
            })
            .collect()
    }

    /// Concatenated character data of every text node under `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        if let Some(NodeData::Text(text)) = self.get_node_data(node) {
            return text.clone();
        }
        let mut out = String::new();
        for descendant in self.descendants(node) {
            if let Some(NodeData::Text(text)) = self.get_node_data(descendant) {
                out.push_str(text);
            }
        }
        out
    }

    /// Graft a copy of `sub` (rooted at its `Document`) under the `frame`
    /// element, as the frame's content document. Returns the id of the copied
    /// `Document` node in this tree.
    pub fn embed_document(&mut self, frame: NodeId, sub: &Self) -> NodeId {
        let document = self.import_subtree(sub, sub.root());
        self.append_child(frame, document);
        log::trace!(target: "folio_dom", "embedded document {document:?} under frame {frame:?}");
        document
    }

    fn import_subtree(&mut self, source: &Self, node: NodeId) -> NodeId {
        let data = source
            .get_node_data(node)
            .cloned()
            .unwrap_or(NodeData::DocumentFragment);
        let copy = self.create_node(data);
        for child in source.children(node) {
            let child_copy = self.import_subtree(source, *child);
            self.append_child(copy, child_copy);
        }
        copy
    }

    /// The element whose content document contains `node`, if any.
    ///
    /// Walks up to the nearest `Document` node; a document with a parent is an
    /// embedded one and its parent is the owning frame element.
    pub fn embedding_frame(&self, node: NodeId) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if matches!(self.get_node_data(candidate), Some(NodeData::Document)) {
                return self
                    .parent(candidate)
                    .filter(|parent| self.element(*parent).is_some());
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Child indices leading from the tree root down to `node`.
    pub(crate) fn path_from_root(&self, node: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            let index = self
                .children(parent)
                .iter()
                .position(|child| *child == current)
                .unwrap_or(0);
            path.push(index);
            current = parent;
        }
        path.reverse();
        path
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the ancestors of a node.
pub struct Ancestors<'tree> {
    tree: &'tree DomTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct Descendants<'tree> {
    tree: &'tree DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_text_merges_adjacent_character_data() {
        let mut tree = DomTree::new();
        let para = tree.create_element("P");
        tree.append_child(tree.root(), para);
        tree.apply(DomUpdate::AppendText {
            parent: para,
            id: NodeId::from_raw(40),
            text: "Hel".to_owned(),
        });
        tree.apply(DomUpdate::AppendText {
            parent: para,
            id: NodeId::from_raw(41),
            text: "lo".to_owned(),
        });
        assert_eq!(tree.children(para).len(), 1);
        assert_eq!(tree.text_content(para), "Hello");
        assert_eq!(tree.element(para).map(|el| el.tag_name.as_str()), Some("p"));
    }

    #[test]
    fn text_inserted_before_a_sibling_merges_backwards() {
        let mut tree = DomTree::new();
        let table = tree.create_element("table");
        tree.append_child(tree.root(), table);
        tree.apply(DomUpdate::InsertTextBefore {
            sibling: table,
            id: NodeId::from_raw(50),
            text: "fost".to_owned(),
        });
        tree.apply(DomUpdate::InsertTextBefore {
            sibling: table,
            id: NodeId::from_raw(51),
            text: "ered".to_owned(),
        });
        assert_eq!(tree.children(tree.root()).len(), 2);
        let text = tree.children(tree.root())[0];
        assert_eq!(tree.get_node_data(text), Some(&NodeData::Text("fostered".to_owned())));
        assert_eq!(tree.previous_sibling(table), Some(text));
        assert_eq!(tree.previous_sibling(text), None);
    }

    #[test]
    fn insert_before_keeps_sibling_order() {
        let mut tree = DomTree::new();
        let first = tree.create_text("a");
        let last = tree.create_text("c");
        let middle = tree.create_text("b");
        tree.append_child(tree.root(), first);
        tree.append_child(tree.root(), last);
        tree.insert_before(last, middle);
        assert_eq!(tree.children(tree.root()), &[first, middle, last]);
        assert_eq!(tree.path_from_root(last), vec![2]);
    }
}
