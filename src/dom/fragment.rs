//! Fragment: an owned, detached DOM subtree (one or more top-level nodes).

use std::fmt;

use super::html::{self, ParseError};
use super::node::{NodeData, NodeId};
use super::selector::{Selector, SelectorError};
use super::tree::Dom;

/// An owned piece of DOM that is not attached to any document.
///
/// Fragments are what callers hand in as content (`Fragment::parse`) and what
/// the modal builder hands back as a finished instance. Two fragments compare
/// equal when they serialize to the same HTML.
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    dom: Dom,
}

impl Fragment {
    /// Create an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fragment holding a single element.
    pub fn element(data: NodeData) -> Self {
        let mut dom = Dom::new();
        dom.insert(data);
        Self { dom }
    }

    /// Parse an HTML string into a fragment.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut dom = Dom::new();
        html::parse_into(&mut dom, input)?;
        Ok(Self { dom })
    }

    /// Wrap an existing DOM. Its top-level nodes become the fragment's roots.
    pub fn from_dom(dom: Dom) -> Self {
        Self { dom }
    }

    /// Read access to the underlying DOM.
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Mutable access to the underlying DOM.
    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    /// Top-level nodes in order.
    pub fn roots(&self) -> &[NodeId] {
        self.dom.roots()
    }

    /// The first top-level node, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.dom.roots().first().copied()
    }

    /// Data of the first top-level node.
    pub fn root_data(&self) -> Option<&NodeData> {
        self.root().and_then(|id| self.dom.get(id))
    }

    /// Mutable data of the first top-level node.
    pub fn root_data_mut(&mut self) -> Option<&mut NodeData> {
        let root = self.root()?;
        self.dom.get_mut(root)
    }

    /// Whether the fragment has no nodes.
    pub fn is_empty(&self) -> bool {
        self.dom.is_empty()
    }

    /// First node matching `locator`, searching each top-level node and then
    /// its descendants, in document order.
    pub fn find(&self, locator: &str) -> Result<Option<NodeId>, SelectorError> {
        Ok(self.find_all(locator)?.into_iter().next())
    }

    /// Every node matching `locator`, in document order.
    pub fn find_all(&self, locator: &str) -> Result<Vec<NodeId>, SelectorError> {
        Ok(self.dom.select(&Selector::parse(locator)?))
    }

    /// Concatenated text of the whole fragment.
    pub fn text(&self) -> String {
        self.roots()
            .iter()
            .map(|&root| self.dom.text_content(root))
            .collect()
    }

    /// Serialize the fragment to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for &root in self.roots() {
            html::write_node(&self.dom, root, &mut out);
        }
        out
    }
}

impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        self.to_html() == other.to_html()
    }
}

impl Eq for Fragment {}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}
