//! Tree operations: insert, remove, clear, deep import, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId, NodeKind};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// A DOM forest backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is O(1).
/// Nodes inserted without a parent are top-level and kept in insertion order.
#[derive(Debug, Clone)]
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    roots: Vec<NodeId>,
}

impl Dom {
    /// Create an empty DOM.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            roots: Vec::new(),
        }
    }

    /// Insert a top-level node (no parent).
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.roots.push(id);
        id
    }

    /// Insert a node as the last child of `parent`.
    ///
    /// If `parent` does not exist the node is inserted at the top level.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        if !self.nodes.contains_key(parent) {
            return self.insert(data);
        }
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.parent.insert(id, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        id
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        match self.parent.remove(id) {
            Some(parent_id) => {
                if let Some(siblings) = self.children.get_mut(parent_id) {
                    siblings.retain(|&child| child != id);
                }
            }
            None => self.roots.retain(|&root| root != id),
        }

        // Collect all descendants (BFS) to remove them.
        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_root_data = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }

        removed_root_data
    }

    /// Remove every child of `id`, keeping `id` itself.
    pub fn clear_children(&mut self, id: NodeId) {
        let kids = self.children(id).to_vec();
        for child in kids {
            self.remove(child);
        }
    }

    /// Replace the children of `id` with a single text node.
    ///
    /// An empty string leaves the node with no children.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if !self.nodes.contains_key(id) {
            return;
        }
        self.clear_children(id);
        if !text.is_empty() {
            self.insert_child(id, NodeData::text(text));
        }
    }

    /// Concatenated text of `id` and all its descendants, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        self.walk_depth_first(id)
            .into_iter()
            .filter_map(|node| match &self.nodes.get(node)?.kind {
                NodeKind::Text(text) => Some(text.as_str()),
                NodeKind::Element(_) => None,
            })
            .collect()
    }

    /// Deep-copy the subtree rooted at `src_id` in `src` into this DOM.
    ///
    /// The copy becomes the last child of `parent`, or a top-level node when
    /// `parent` is `None`. Returns the id of the copied root, or `None` if
    /// `src_id` does not exist in `src`.
    pub fn import(&mut self, parent: Option<NodeId>, src: &Dom, src_id: NodeId) -> Option<NodeId> {
        let data = src.get(src_id)?.clone();
        let copied = match parent {
            Some(parent) => self.insert_child(parent, data),
            None => self.insert(data),
        };
        for &child in src.children(src_id) {
            self.import(Some(copied), src, child);
        }
        Some(copied)
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no children
    /// or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Top-level nodes in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Walk from `id` up to the top level, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// Number of nodes in the DOM.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the DOM is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the DOM contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start` (document order).
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a small test tree:
    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Dom, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::element("div").with_id("root"));
        let a = dom.insert_child(root, NodeData::element("section").with_class("left"));
        let b = dom.insert_child(root, NodeData::element("section").with_class("right"));
        let c = dom.insert_child(a, NodeData::element("button"));
        let d = dom.insert_child(a, NodeData::text("label"));
        (dom, root, a, b, c, d)
    }

    #[test]
    fn insert_tracks_roots_in_order() {
        let mut dom = Dom::new();
        let first = dom.insert(NodeData::element("p"));
        let second = dom.insert(NodeData::element("p"));
        assert_eq!(dom.roots(), &[first, second]);
    }

    #[test]
    fn insert_child_parent_relationship() {
        let (dom, root, a, _b, c, _d) = build_tree();
        assert_eq!(dom.parent(a), Some(root));
        assert_eq!(dom.parent(c), Some(a));
        assert_eq!(dom.parent(root), None);
        assert_eq!(dom.roots(), &[root]);
    }

    #[test]
    fn insert_child_of_missing_parent_goes_top_level() {
        let (mut dom, root, ..) = build_tree();
        let stale = dom.insert(NodeData::element("i"));
        dom.remove(stale);
        let orphan = dom.insert_child(stale, NodeData::element("b"));
        assert_eq!(dom.roots(), &[root, orphan]);
    }

    #[test]
    fn ancestors() {
        let (dom, root, a, _b, c, _d) = build_tree();
        assert_eq!(dom.ancestors(c), vec![a, root]);
        assert!(dom.ancestors(root).is_empty());
    }

    #[test]
    fn remove_subtree() {
        let (mut dom, root, a, b, c, d) = build_tree();
        dom.remove(a);
        assert!(!dom.contains(a));
        assert!(!dom.contains(c));
        assert!(!dom.contains(d));
        assert_eq!(dom.children(root), &[b]);
        assert_eq!(dom.len(), 2);
    }

    #[test]
    fn remove_top_level() {
        let (mut dom, root, ..) = build_tree();
        dom.remove(root);
        assert!(dom.is_empty());
        assert!(dom.roots().is_empty());
    }

    #[test]
    fn remove_nonexistent() {
        let mut dom = Dom::new();
        let id = dom.insert(NodeData::element("x"));
        dom.remove(id);
        assert!(dom.remove(id).is_none());
    }

    #[test]
    fn clear_children_keeps_node() {
        let (mut dom, _root, a, _b, c, d) = build_tree();
        dom.clear_children(a);
        assert!(dom.contains(a));
        assert!(!dom.contains(c));
        assert!(!dom.contains(d));
        assert!(dom.children(a).is_empty());
    }

    #[test]
    fn set_text_replaces_children() {
        let (mut dom, _root, a, ..) = build_tree();
        dom.set_text(a, "<b>hi</b>");
        assert_eq!(dom.children(a).len(), 1);
        assert_eq!(dom.text_content(a), "<b>hi</b>");
    }

    #[test]
    fn set_text_empty_clears() {
        let (mut dom, _root, a, ..) = build_tree();
        dom.set_text(a, "");
        assert!(dom.children(a).is_empty());
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let mut dom = Dom::new();
        let p = dom.insert(NodeData::element("p"));
        dom.insert_child(p, NodeData::text("one "));
        let b = dom.insert_child(p, NodeData::element("b"));
        dom.insert_child(b, NodeData::text("two"));
        assert_eq!(dom.text_content(p), "one two");
    }

    #[test]
    fn import_copies_subtree() {
        let (src, _root, a, ..) = build_tree();
        let mut dst = Dom::new();
        let host = dst.insert(NodeData::element("body"));
        let copied = dst.import(Some(host), &src, a).unwrap();
        assert_eq!(dst.parent(copied), Some(host));
        assert_eq!(dst.children(copied).len(), 2);
        assert_eq!(dst.text_content(copied), "label");
        // Source is untouched.
        assert_eq!(src.len(), 5);
    }

    #[test]
    fn walk_depth_first() {
        let (dom, root, a, b, c, d) = build_tree();
        assert_eq!(dom.walk_depth_first(root), vec![root, a, c, d, b]);
    }

    #[test]
    fn default_impl() {
        let dom = Dom::default();
        assert!(dom.is_empty());
        assert!(dom.roots().is_empty());
    }
}
