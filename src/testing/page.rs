//! HeadlessPage: an in-memory document body implementing [`Host`].
//!
//! Attached instances become top-level nodes of the page body. Visibility
//! commands are recorded in order and reflected on the instance root as the
//! `show` class, the way the behavior framework marks an open modal.

use crate::dom::{Dom, Fragment, NodeId, Selector, SelectorError};
use crate::host::{Host, VisibilityCommand};

/// Class the behavior framework puts on a visible modal.
pub const SHOW_CLASS: &str = "show";

/// A headless document body.
#[derive(Debug, Clone)]
pub struct HeadlessPage {
    body: Dom,
    commands: Vec<(String, VisibilityCommand)>,
    ready: bool,
}

impl HeadlessPage {
    /// An empty, ready page.
    pub fn new() -> Self {
        Self {
            body: Dom::new(),
            commands: Vec::new(),
            ready: true,
        }
    }

    /// A page without the behavior framework loaded. Constructing a modal on
    /// it fails.
    pub fn unavailable() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    /// The page body.
    pub fn body(&self) -> &Dom {
        &self.body
    }

    /// Every visibility command received, oldest first.
    pub fn commands(&self) -> &[(String, VisibilityCommand)] {
        &self.commands
    }

    /// Root of the attached instance carrying `dom_id`.
    pub fn instance(&self, dom_id: &str) -> Option<NodeId> {
        self.body.query_by_id(dom_id)
    }

    /// Whether an instance carrying `dom_id` is attached.
    pub fn is_attached(&self, dom_id: &str) -> bool {
        self.instance(dom_id).is_some()
    }

    /// Number of instances attached to the body.
    pub fn attached_count(&self) -> usize {
        self.body.roots().len()
    }

    /// Whether the attached instance `dom_id` is marked visible.
    pub fn is_visible(&self, dom_id: &str) -> bool {
        self.instance(dom_id)
            .and_then(|node| self.body.get(node))
            .is_some_and(|data| data.has_class(SHOW_CLASS))
    }

    /// Every body node matching `locator`, in document order.
    pub fn find_all(&self, locator: &str) -> Result<Vec<NodeId>, SelectorError> {
        Ok(self.body.select(&Selector::parse(locator)?))
    }

    /// First body node matching `locator`.
    pub fn find(&self, locator: &str) -> Result<Option<NodeId>, SelectorError> {
        Ok(self.find_all(locator)?.into_iter().next())
    }

    /// Serialize the body.
    pub fn to_html(&self) -> String {
        Fragment::from_dom(self.body.clone()).to_html()
    }
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for HeadlessPage {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn attach(&mut self, instance: &Fragment) {
        for &top in instance.roots() {
            self.body.import(None, instance.dom(), top);
        }
    }

    fn detach(&mut self, dom_id: &str) {
        if let Some(node) = self.instance(dom_id) {
            self.body.remove(node);
        }
    }

    fn request(&mut self, dom_id: &str, command: VisibilityCommand) {
        self.commands.push((dom_id.to_owned(), command));
        let Some(data) = self.instance(dom_id).and_then(|node| self.body.get_mut(node)) else {
            tracing::trace!(dom_id, ?command, "command for a detached instance");
            return;
        };
        match command {
            VisibilityCommand::Show => {
                data.add_class(SHOW_CLASS);
                data.remove_attr("aria-hidden");
            }
            VisibilityCommand::Hide => {
                data.remove_class(SHOW_CLASS);
                data.set_attr("aria-hidden", Some("true".into()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeData;

    fn instance(id: &str) -> Fragment {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::element("div").with_id(id).with_class("modal"));
        dom.insert_child(root, NodeData::element("button").with_class("btn"));
        Fragment::from_dom(dom)
    }

    #[test]
    fn attach_and_detach() {
        let mut page = HeadlessPage::new();
        page.attach(&instance("m-1"));
        page.attach(&instance("m-2"));
        assert_eq!(page.attached_count(), 2);
        page.detach("m-1");
        assert!(!page.is_attached("m-1"));
        assert!(page.is_attached("m-2"));
        assert_eq!(page.body().len(), 2);
    }

    #[test]
    fn detach_unknown_is_noop() {
        let mut page = HeadlessPage::new();
        page.attach(&instance("m-1"));
        page.detach("nope");
        assert_eq!(page.attached_count(), 1);
    }

    #[test]
    fn commands_toggle_visibility() {
        let mut page = HeadlessPage::new();
        page.attach(&instance("m-1"));
        page.request("m-1", VisibilityCommand::Show);
        assert!(page.is_visible("m-1"));
        page.request("m-1", VisibilityCommand::Hide);
        assert!(!page.is_visible("m-1"));
        assert_eq!(
            page.commands(),
            &[
                ("m-1".to_owned(), VisibilityCommand::Show),
                ("m-1".to_owned(), VisibilityCommand::Hide),
            ]
        );
    }

    #[test]
    fn command_for_detached_instance_is_recorded() {
        let mut page = HeadlessPage::new();
        page.request("ghost", VisibilityCommand::Show);
        assert_eq!(page.commands().len(), 1);
        assert!(!page.is_visible("ghost"));
    }

    #[test]
    fn readiness() {
        assert!(HeadlessPage::new().is_ready());
        assert!(!HeadlessPage::unavailable().is_ready());
    }

    #[test]
    fn find_searches_attached_instances() {
        let mut page = HeadlessPage::new();
        page.attach(&instance("m-1"));
        assert!(page.find("div.modal > button.btn").unwrap().is_some());
        assert!(page.find("span").unwrap().is_none());
    }
}
