//! DOM queries: by id, by selector within a scope or across the document.

use super::node::NodeId;
use super::selector::Selector;
use super::tree::Dom;

impl Dom {
    /// Find the first node whose `id` field matches the given string.
    ///
    /// Searches every top-level tree in document order.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.roots()
            .iter()
            .flat_map(|&root| self.walk_depth_first(root))
            .find(|&node| self.get(node).and_then(|d| d.id.as_deref()) == Some(id))
    }

    /// First descendant of `scope` (excluding `scope` itself) matching
    /// `selector`, in document order.
    ///
    /// An empty selector matches nothing.
    pub fn select_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        if selector.is_empty() {
            return None;
        }
        self.walk_depth_first(scope)
            .into_iter()
            .skip(1)
            .find(|&node| selector.matches(self, node))
    }

    /// Every node matching `selector`, top-level nodes included, in
    /// document order.
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.roots()
            .iter()
            .flat_map(|&root| self.walk_depth_first(root))
            .filter(|&node| selector.matches(self, node))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::NodeData;
    use crate::dom::selector::Selector;
    use crate::dom::tree::Dom;

    /// Build a test tree for queries:
    /// ```text
    ///   div#root.modal
    ///     div.modal-header
    ///       h5.modal-title
    ///     div.modal-body
    ///       p "first"
    ///       p "second"
    /// ```
    fn build_query_tree() -> Dom {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::element("div").with_id("root").with_class("modal"));
        let header = dom.insert_child(root, NodeData::element("div").with_class("modal-header"));
        dom.insert_child(header, NodeData::element("h5").with_class("modal-title"));
        let body = dom.insert_child(root, NodeData::element("div").with_class("modal-body"));
        let p1 = dom.insert_child(body, NodeData::element("p"));
        dom.insert_child(p1, NodeData::text("first"));
        let p2 = dom.insert_child(body, NodeData::element("p"));
        dom.insert_child(p2, NodeData::text("second"));
        dom
    }

    fn sel(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    #[test]
    fn query_by_id_found() {
        let dom = build_query_tree();
        let id = dom.query_by_id("root").unwrap();
        assert!(dom.get(id).unwrap().has_class("modal"));
    }

    #[test]
    fn query_by_id_not_found() {
        let dom = build_query_tree();
        assert!(dom.query_by_id("nonexistent").is_none());
    }

    #[test]
    fn select_first_is_document_order() {
        let dom = build_query_tree();
        let root = dom.roots()[0];
        let first = dom.select_first(root, &sel("div.modal-body p")).unwrap();
        assert_eq!(dom.text_content(first), "first");
    }

    #[test]
    fn select_first_excludes_scope() {
        let dom = build_query_tree();
        let root = dom.roots()[0];
        assert!(dom.select_first(root, &sel("div.modal")).is_none());
    }

    #[test]
    fn select_first_no_match_is_none() {
        let dom = build_query_tree();
        let root = dom.roots()[0];
        assert!(dom.select_first(root, &sel("div.modal-footer")).is_none());
        assert!(dom.select_first(root, &sel("")).is_none());
    }

    #[test]
    fn select_includes_top_level_nodes() {
        let dom = build_query_tree();
        assert_eq!(dom.select(&sel("div")).len(), 3);
        assert_eq!(dom.select(&sel("div.modal > div.modal-body > p")).len(), 2);
    }

    #[test]
    fn query_on_empty_dom() {
        let dom = Dom::new();
        assert!(dom.query_by_id("x").is_none());
        assert!(dom.select(&sel("*")).is_empty());
    }
}
