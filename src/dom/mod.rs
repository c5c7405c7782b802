//! In-memory document tree with structural mutation notifications.
//!
//! The host document is modeled as an arena of nodes under a single root.
//! Attaching or detaching a subtree publishes a [`MutationBatch`] to every
//! observer, which is the contract the enhancement watcher is built on.
//! Nodes carry optional behavior bindings; a node accepts at most one
//! binding, and detaching a subtree clears the bindings inside it so a
//! reinserted element is eligible for rebinding.

use crate::consts;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::broadcast;

pub mod selector;
pub use selector::Selector;

/// Identity of a node within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Visibility mode of an input node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    /// Content is masked.
    Password,
    /// Content is readable.
    Text,
}

/// Behavior attached to a node, invoked on activation.
pub type BindingFn = Arc<dyn Fn(&mut Document, NodeId) + Send + Sync>;

/// One batch of structural changes, as delivered to observers.
#[derive(Debug, Clone)]
pub struct MutationBatch {
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
}

pub(crate) struct Node {
    pub(crate) tag: String,
    pub(crate) classes: BTreeSet<String>,
    text: String,
    input_type: Option<InputType>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    binding: Option<BindingFn>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: BTreeSet::new(),
            text: String::new(),
            input_type: None,
            parent: None,
            children: Vec::new(),
            binding: None,
        }
    }
}

/// An observable document tree.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    mutations: broadcast::Sender<MutationBatch>,
}

impl Document {
    /// An empty document with a `body` root.
    pub fn new() -> Self {
        let (mutations, _) = broadcast::channel(consts::dom::MUTATION_QUEUE_SIZE);
        Self {
            nodes: vec![Node::new("body")],
            root: NodeId(0),
            mutations,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Subscribe to structural mutation batches.
    pub fn observe(&self) -> broadcast::Receiver<MutationBatch> {
        self.mutations.subscribe()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag));
        id
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        self.nodes[id.0].classes.insert(class.to_string());
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id.0].text = text.to_string();
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn set_input_type(&mut self, id: NodeId, input_type: InputType) {
        self.nodes[id.0].input_type = Some(input_type);
    }

    pub fn input_type(&self, id: NodeId) -> Option<InputType> {
        self.nodes[id.0].input_type
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// True if the node is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.nodes[current.0].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Attach `child` (and its subtree) under `parent`. A child that is
    /// already attached elsewhere is detached first, which clears its
    /// bindings. Attaching into a detached parent emits nothing; the whole
    /// subtree is reported once it becomes reachable from the root.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if child == self.root || self.in_subtree_of(parent, child) {
            return;
        }
        if self.nodes[child.0].parent.is_some() {
            self.detach(child);
        }

        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);

        if self.is_attached(parent) {
            let mut added = Vec::new();
            self.collect_subtree(child, &mut added);
            let _ = self.mutations.send(MutationBatch {
                added,
                removed: Vec::new(),
            });
        }
    }

    /// Unlink a node (and its subtree) from its parent. Bindings inside the
    /// subtree are cleared; the nodes themselves survive for reinsertion.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent else {
            return;
        };
        let was_attached = self.is_attached(id);

        self.nodes[parent.0].children.retain(|c| *c != id);
        self.nodes[id.0].parent = None;

        let mut removed = Vec::new();
        self.collect_subtree(id, &mut removed);
        for node in &removed {
            self.nodes[node.0].binding = None;
        }
        if was_attached {
            let _ = self.mutations.send(MutationBatch {
                added: Vec::new(),
                removed,
            });
        }
    }

    /// Attach a behavior to a node. Refuses (returns false) if the node
    /// already has one, so callers can bind idempotently.
    pub fn bind(&mut self, id: NodeId, binding: BindingFn) -> bool {
        if self.nodes[id.0].binding.is_some() {
            return false;
        }
        self.nodes[id.0].binding = Some(binding);
        true
    }

    pub fn is_bound(&self, id: NodeId) -> bool {
        self.nodes[id.0].binding.is_some()
    }

    /// Run the node's binding, if any. Activating an unbound node is a no-op.
    pub fn activate(&mut self, id: NodeId) {
        let binding = self.nodes[id.0].binding.clone();
        if let Some(binding) = binding {
            binding(self, id);
        }
    }

    /// All attached nodes matching `selector`, in document order.
    pub fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        let mut matches = Vec::new();
        self.visit(self.root, &mut |id, node| {
            if selector.matches(node) {
                matches.push(id);
            }
        });
        matches
    }

    /// First descendant of `ancestor` matching `selector`, in document order.
    pub fn find_descendant(&self, ancestor: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut found = None;
        for &child in &self.nodes[ancestor.0].children {
            self.visit(child, &mut |id, node| {
                if found.is_none() && selector.matches(node) {
                    found = Some(id);
                }
            });
            if found.is_some() {
                break;
            }
        }
        found
    }

    fn visit(&self, id: NodeId, f: &mut impl FnMut(NodeId, &Node)) {
        f(id, &self.nodes[id.0]);
        for &child in &self.nodes[id.0].children {
            self.visit(child, f);
        }
    }

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for child in &self.nodes[id.0].children {
            self.collect_subtree(*child, out);
        }
    }

    /// True if `node` lies inside the subtree rooted at `ancestor`.
    fn in_subtree_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == ancestor {
                return true;
            }
            match self.nodes[current.0].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    fn noop_binding() -> BindingFn {
        Arc::new(|_, _| {})
    }

    #[test]
    fn attaching_a_subtree_emits_one_batch() {
        let mut doc = Document::new();
        let mut rx = doc.observe();

        let wrapper = doc.create_element("div");
        let input = doc.create_element("input");
        doc.append_child(wrapper, input);
        // Still detached: nothing observable happened yet.
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

        doc.append_child(doc.root(), wrapper);
        let batch = rx.try_recv().expect("attach should emit a batch");
        assert_eq!(batch.added, vec![wrapper, input]);
        assert!(batch.removed.is_empty());
    }

    #[test]
    fn detaching_clears_bindings_in_the_subtree() {
        let mut doc = Document::new();
        let wrapper = doc.create_element("div");
        let toggle = doc.create_element("span");
        doc.append_child(wrapper, toggle);
        doc.append_child(doc.root(), wrapper);

        assert!(doc.bind(toggle, noop_binding()));
        doc.detach(wrapper);
        assert!(!doc.is_bound(toggle));

        doc.append_child(doc.root(), wrapper);
        assert!(doc.bind(toggle, noop_binding()));
    }

    #[test]
    fn second_binding_is_refused() {
        let mut doc = Document::new();
        let toggle = doc.create_element("span");
        doc.append_child(doc.root(), toggle);

        assert!(doc.bind(toggle, noop_binding()));
        assert!(!doc.bind(toggle, noop_binding()));
    }

    #[test]
    fn activating_an_unbound_node_is_a_noop() {
        let mut doc = Document::new();
        let toggle = doc.create_element("span");
        doc.append_child(doc.root(), toggle);
        doc.activate(toggle);
    }

    #[test]
    fn query_skips_detached_nodes() {
        let mut doc = Document::new();
        let attached = doc.create_element("input");
        doc.append_child(doc.root(), attached);
        let _detached = doc.create_element("input");

        let selector: Selector = "input".parse().expect("selector should parse");
        assert_eq!(doc.query_all(&selector), vec![attached]);
    }

    #[test]
    fn find_descendant_searches_nested_children() {
        let mut doc = Document::new();
        let wrapper = doc.create_element("div");
        let field = doc.create_element("div");
        let input = doc.create_element("input");
        doc.append_child(field, input);
        doc.append_child(wrapper, field);
        doc.append_child(doc.root(), wrapper);

        let selector: Selector = "input".parse().expect("selector should parse");
        assert_eq!(doc.find_descendant(wrapper, &selector), Some(input));
        assert_eq!(doc.find_descendant(input, &selector), None);
    }

    #[test]
    fn appending_an_ancestor_into_its_descendant_is_refused() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner);
        doc.append_child(doc.root(), outer);

        doc.append_child(inner, outer);
        assert_eq!(doc.parent(outer), Some(doc.root()));
    }
}
