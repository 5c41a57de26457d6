//! HTML parsing: an html5ever `TreeSink` that streams [`DomUpdate`]s.

use crate::tree::{DomTree, DomUpdate, ElementData, NodeData, NodeId, ROOT_NODE_ID};
use anyhow::{Context as _, Result};
use html5ever::tendril::TendrilSink as _;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute, ExpandedName, LocalName, Namespace, ParseOpts, QualName, parse_document};
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::sync::mpsc;
use tendril::StrTendril;

/// Handle given to html5ever for every node it creates.
///
/// Elements carry their qualified name so the tree builder can inspect the
/// stack of open elements; other nodes carry an empty name.
#[derive(Clone, Debug)]
pub struct SinkHandle {
    id: NodeId,
    name: QualName,
}

impl SinkHandle {
    fn unnamed(id: NodeId) -> Self {
        Self {
            id,
            name: QualName::new(None, Namespace::from(""), LocalName::from("")),
        }
    }

    pub const fn id(&self) -> NodeId {
        self.id
    }
}

/// Streaming tree builder: implements `TreeSink` and sends updates via channel.
pub struct TreeBuilder {
    next_id: Cell<u64>,
    document: SinkHandle,
    /// Nodes that currently have a parent, for foster parenting.
    attached: RefCell<HashSet<NodeId>>,
    tx: mpsc::Sender<DomUpdate>,
}

impl TreeBuilder {
    /// Create a new tree builder that streams updates to the given channel.
    pub fn new(tx: mpsc::Sender<DomUpdate>) -> Self {
        let builder = Self {
            next_id: Cell::new(ROOT_NODE_ID.as_u64() + 1),
            document: SinkHandle::unnamed(ROOT_NODE_ID),
            attached: RefCell::new(HashSet::new()),
            tx,
        };
        builder.send_update(DomUpdate::CreateNode {
            id: ROOT_NODE_ID,
            data: NodeData::Document,
        });
        builder
    }

    fn create_node(&self) -> NodeId {
        let id = NodeId::from_raw(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        id
    }

    fn send_update(&self, update: DomUpdate) {
        // The receiver lives for the whole parse; a closed channel only means
        // the caller dropped the result.
        if self.tx.send(update).is_err() {
            log::trace!(target: "folio_dom", "dom update receiver dropped");
        }
    }
}

impl TreeSink for TreeBuilder {
    type Handle = SinkHandle;
    type Output = ();
    type ElemName<'a> = ExpandedName<'a>;

    fn finish(self) -> Self::Output {}

    fn parse_error(&self, msg: Cow<'static, str>) {
        log::trace!(target: "folio_dom", "html parse error: {msg}");
    }

    fn get_document(&self) -> Self::Handle {
        self.document.clone()
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> ExpandedName<'a> {
        target.name.expanded()
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let id = self.create_node();
        let mut element = ElementData::new(&name.local);
        for attr in attrs {
            element.set_attribute(attr.name.local.to_string(), attr.value.to_string());
        }
        self.send_update(DomUpdate::CreateNode {
            id,
            data: NodeData::Element(element),
        });
        SinkHandle { id, name }
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        let id = self.create_node();
        self.send_update(DomUpdate::CreateNode {
            id,
            data: NodeData::Comment(text.to_string()),
        });
        SinkHandle::unnamed(id)
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        let id = self.create_node();
        self.send_update(DomUpdate::CreateNode {
            id,
            data: NodeData::Comment(data.to_string()),
        });
        SinkHandle::unnamed(id)
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        match child {
            NodeOrText::AppendNode(node) => {
                self.attached.borrow_mut().insert(node.id);
                self.send_update(DomUpdate::AppendChild {
                    parent: parent.id,
                    child: node.id,
                });
            }
            NodeOrText::AppendText(text) => {
                let id = self.create_node();
                self.send_update(DomUpdate::AppendText {
                    parent: parent.id,
                    id,
                    text: text.to_string(),
                });
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self.attached.borrow().contains(&element.id);
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        target.clone()
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.id == y.id
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        match new_node {
            NodeOrText::AppendNode(node) => {
                self.attached.borrow_mut().insert(node.id);
                self.send_update(DomUpdate::InsertBefore {
                    sibling: sibling.id,
                    child: node.id,
                });
            }
            NodeOrText::AppendText(text) => {
                let id = self.create_node();
                self.send_update(DomUpdate::InsertTextBefore {
                    sibling: sibling.id,
                    id,
                    text: text.to_string(),
                });
            }
        }
    }

    fn add_attrs_if_missing(&self, _target: &Self::Handle, _attrs: Vec<Attribute>) {
        // Only reached for duplicate <html>/<body> tags; attributes are not
        // consulted for geometry or text.
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.attached.borrow_mut().remove(&target.id);
        self.send_update(DomUpdate::Detach { node: target.id });
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        self.send_update(DomUpdate::ReparentChildren {
            from: node.id,
            to: new_parent.id,
        });
    }
}

/// Parse an HTML document into a [`DomTree`].
///
/// # Errors
/// Returns an error if html5ever fails to read the input.
pub fn parse_html(html: &str) -> Result<DomTree> {
    let (tx, rx) = mpsc::channel();
    parse_document(TreeBuilder::new(tx), ParseOpts::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .context("failed to read HTML input")?;

    let mut tree = DomTree::new();
    for update in rx.try_iter() {
        tree.apply(update);
    }
    log::debug!(
        target: "folio_dom",
        "parsed {} bytes of HTML into {} nodes",
        html.len(),
        tree.descendants(tree.root()).count()
    );
    Ok(tree)
}
