//! Modal builder: structural mutations over one in-progress instance.
//!
//! [`ModalBuilder`] owns a fresh copy of the dialog skeleton and exposes four
//! primitives addressed by [`ModalSection`]: add class, remove class, set
//! text, and append (optionally clearing first). Every primitive consumes and
//! returns the builder so calls chain; [`ModalBuilder::create`] hands over the
//! finished fragment.
//!
//! A region that cannot be found turns the operation into a no-op.

use crate::dom::{Fragment, NodeId, Selector};
use crate::template;

// ---------------------------------------------------------------------------
// ModalSection
// ---------------------------------------------------------------------------

/// An addressable region of the dialog skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalSection {
    /// The whole instance (its root element).
    Base,
    /// `div.modal-dialog`: sizing and centering classes go here.
    Dialog,
    /// `div.modal-content`: the footer is appended here.
    Content,
    /// `div.modal-header`: holds the title and the close (×) button.
    Header,
    /// `div.modal-header h5.modal-title`: the title text.
    HeaderTitle,
    /// `div.modal-body`: the body content.
    Body,
}

impl ModalSection {
    /// The structural locator for this region. `Base` is the empty root
    /// sentinel.
    pub fn locator(self) -> &'static str {
        match self {
            ModalSection::Base => "",
            ModalSection::Dialog => "div.modal-dialog",
            ModalSection::Content => "div.modal-content",
            ModalSection::Header => "div.modal-header",
            ModalSection::HeaderTitle => "div.modal-header h5.modal-title",
            ModalSection::Body => "div.modal-body",
        }
    }
}

// ---------------------------------------------------------------------------
// ModalBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a single modal instance.
#[derive(Debug)]
pub struct ModalBuilder {
    modal: Fragment,
}

impl ModalBuilder {
    /// Start from a fresh dialog skeleton whose root carries the generated id
    /// for `id`.
    pub fn new(id: u32) -> Self {
        let mut modal = template::dialog();
        if let Some(root) = modal.root_data_mut() {
            root.id = Some(template::dom_id(id));
        }
        Self { modal }
    }

    /// Add one or more whitespace-separated classes to `section`.
    /// An empty or blank `class` changes nothing.
    pub fn add_class(mut self, section: ModalSection, class: &str) -> Self {
        if let Some(node) = self.resolve(section) {
            if let Some(data) = self.modal.dom_mut().get_mut(node) {
                for name in class.split_whitespace() {
                    data.add_class(name);
                }
            }
        }
        self
    }

    /// Remove one or more whitespace-separated classes from `section`.
    /// An empty or blank `class` changes nothing.
    pub fn remove_class(mut self, section: ModalSection, class: &str) -> Self {
        if let Some(node) = self.resolve(section) {
            if let Some(data) = self.modal.dom_mut().get_mut(node) {
                for name in class.split_whitespace() {
                    data.remove_class(name);
                }
            }
        }
        self
    }

    /// Replace the text of `section`. `text` is never interpreted as markup.
    pub fn set_text(mut self, section: ModalSection, text: &str) -> Self {
        if let Some(node) = self.resolve(section) {
            self.modal.dom_mut().set_text(node, text);
        }
        self
    }

    /// Append a copy of `content` to `section`, clearing the region's
    /// children first when `empty_first` is set.
    pub fn append(mut self, section: ModalSection, empty_first: bool, content: &Fragment) -> Self {
        if let Some(node) = self.resolve(section) {
            let dom = self.modal.dom_mut();
            if empty_first {
                dom.clear_children(node);
            }
            for &top in content.roots() {
                dom.import(Some(node), content.dom(), top);
            }
        }
        self
    }

    /// Finish building and take the instance.
    pub fn create(self) -> Fragment {
        self.modal
    }

    fn resolve(&self, section: ModalSection) -> Option<NodeId> {
        let root = self.modal.root()?;
        if section == ModalSection::Base {
            return Some(root);
        }
        match Selector::parse(section.locator()) {
            Ok(selector) => self.modal.dom().select_first(root, &selector),
            Err(err) => {
                tracing::warn!(?section, %err, "unparseable section locator");
                None
            }
        }
    }
}
