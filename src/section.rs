//! Section store: pending per-region configuration, keyed by a closed set.
//!
//! Each [`SectionKey`] has exactly one payload type, carried by the matching
//! [`Section`] variant, so a title can never be stored where a flag belongs.

use std::collections::BTreeMap;

use crate::dom::{Fragment, ParseError};

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// A caller-supplied content token: raw HTML or a pre-built fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Markup, parsed when the content is used.
    Html(String),
    /// Already-parsed nodes. Used as-is (copied) without re-parsing.
    Fragment(Fragment),
}

impl Content {
    /// Resolve to a fragment, parsing if needed.
    pub fn to_fragment(&self) -> Result<Fragment, ParseError> {
        match self {
            Content::Html(html) => Fragment::parse(html),
            Content::Fragment(fragment) => Ok(fragment.clone()),
        }
    }

    /// Resolve to a fragment, consuming the token.
    pub fn into_fragment(self) -> Result<Fragment, ParseError> {
        match self {
            Content::Html(html) => Fragment::parse(&html),
            Content::Fragment(fragment) => Ok(fragment),
        }
    }
}

impl From<&str> for Content {
    fn from(html: &str) -> Self {
        Content::Html(html.to_owned())
    }
}

impl From<String> for Content {
    fn from(html: String) -> Self {
        Content::Html(html)
    }
}

impl From<Fragment> for Content {
    fn from(fragment: Fragment) -> Self {
        Content::Fragment(fragment)
    }
}

// ---------------------------------------------------------------------------
// SectionKey / Section
// ---------------------------------------------------------------------------

/// Identifies a configurable region of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKey {
    HeaderTitle,
    HeaderShowCloseButton,
    Body,
    Footer,
}

impl SectionKey {
    /// Dotted name, as used in log output.
    pub fn name(self) -> &'static str {
        match self {
            SectionKey::HeaderTitle => "HEADER.TITLE",
            SectionKey::HeaderShowCloseButton => "HEADER.SHOW_CLOSE_BUTTON",
            SectionKey::Body => "BODY",
            SectionKey::Footer => "FOOTER",
        }
    }
}

/// A stored section value. The variant determines the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Header title text.
    HeaderTitle(String),
    /// Whether the header gets a close (×) button.
    HeaderShowCloseButton(bool),
    /// Body content, replacing the template placeholder.
    Body(Fragment),
    /// Footer buttons, in order.
    Footer(Vec<Content>),
}

impl Section {
    /// The key this value is stored under.
    pub fn key(&self) -> SectionKey {
        match self {
            Section::HeaderTitle(_) => SectionKey::HeaderTitle,
            Section::HeaderShowCloseButton(_) => SectionKey::HeaderShowCloseButton,
            Section::Body(_) => SectionKey::Body,
            Section::Footer(_) => SectionKey::Footer,
        }
    }
}

// ---------------------------------------------------------------------------
// SectionStore
// ---------------------------------------------------------------------------

/// Ordered map from [`SectionKey`] to [`Section`]. Last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionStore {
    sections: BTreeMap<SectionKey, Section>,
}

impl SectionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `section` under its key, replacing any previous value.
    pub fn add(&mut self, section: Section) {
        self.sections.insert(section.key(), section);
    }

    /// Whether a value is stored for `key`.
    pub fn has(&self, key: SectionKey) -> bool {
        self.sections.contains_key(&key)
    }

    /// The stored value, or `None` if absent.
    pub fn get(&self, key: SectionKey) -> Option<&Section> {
        self.sections.get(&key)
    }

    /// Whether `key` holds a boolean `true`. Any other value reads as false.
    pub fn is_true(&self, key: SectionKey) -> bool {
        matches!(self.get(key), Some(Section::HeaderShowCloseButton(true)))
    }

    /// Remove the value for `key`. Returns whether one existed.
    pub fn remove(&mut self, key: SectionKey) -> bool {
        self.sections.remove(&key).is_some()
    }

    /// Header title, if set.
    pub fn title(&self) -> Option<&str> {
        match self.get(SectionKey::HeaderTitle) {
            Some(Section::HeaderTitle(title)) => Some(title),
            _ => None,
        }
    }

    /// Body fragment, if set.
    pub fn body(&self) -> Option<&Fragment> {
        match self.get(SectionKey::Body) {
            Some(Section::Body(body)) => Some(body),
            _ => None,
        }
    }

    /// Footer buttons, if set.
    pub fn footer(&self) -> Option<&[Content]> {
        match self.get(SectionKey::Footer) {
            Some(Section::Footer(buttons)) => Some(buttons),
            _ => None,
        }
    }

    /// Number of stored sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Stored sections in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    /// Names of the stored sections in key order.
    pub fn names(&self) -> Vec<&'static str> {
        self.sections.keys().map(|key| key.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_get() {
        let mut store = SectionStore::new();
        store.add(Section::HeaderTitle("Hello".into()));
        assert!(store.has(SectionKey::HeaderTitle));
        assert_eq!(
            store.get(SectionKey::HeaderTitle),
            Some(&Section::HeaderTitle("Hello".into()))
        );
        assert_eq!(store.title(), Some("Hello"));
    }

    #[test]
    fn absent_key_is_none() {
        let store = SectionStore::new();
        assert!(!store.has(SectionKey::Body));
        assert_eq!(store.get(SectionKey::Body), None);
        assert_eq!(store.body(), None);
    }

    #[test]
    fn add_overwrites() {
        let mut store = SectionStore::new();
        store.add(Section::HeaderTitle("one".into()));
        store.add(Section::HeaderTitle("two".into()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.title(), Some("two"));
    }

    #[test]
    fn is_true_only_for_true_flag() {
        let mut store = SectionStore::new();
        assert!(!store.is_true(SectionKey::HeaderShowCloseButton));
        store.add(Section::HeaderShowCloseButton(false));
        assert!(!store.is_true(SectionKey::HeaderShowCloseButton));
        store.add(Section::HeaderShowCloseButton(true));
        assert!(store.is_true(SectionKey::HeaderShowCloseButton));
    }

    #[test]
    fn is_true_on_non_boolean_is_false() {
        let mut store = SectionStore::new();
        store.add(Section::HeaderTitle("true".into()));
        assert!(!store.is_true(SectionKey::HeaderTitle));
    }

    #[test]
    fn remove_reports_presence() {
        let mut store = SectionStore::new();
        store.add(Section::Footer(vec![]));
        assert!(store.remove(SectionKey::Footer));
        assert!(!store.remove(SectionKey::Footer));
        assert!(store.is_empty());
    }

    #[test]
    fn iter_is_key_ordered() {
        let mut store = SectionStore::new();
        store.add(Section::Footer(vec!["<button>A</button>".into()]));
        store.add(Section::HeaderTitle("T".into()));
        store.add(Section::HeaderShowCloseButton(true));
        assert_eq!(
            store.names(),
            vec!["HEADER.TITLE", "HEADER.SHOW_CLOSE_BUTTON", "FOOTER"]
        );
        let keys: Vec<_> = store.iter().map(Section::key).collect();
        assert_eq!(
            keys,
            vec![
                SectionKey::HeaderTitle,
                SectionKey::HeaderShowCloseButton,
                SectionKey::Footer
            ]
        );
    }

    #[test]
    fn content_resolves_both_forms() {
        let html: Content = "<b>x</b>".into();
        let built: Content = Fragment::parse("<b>x</b>").unwrap().into();
        assert_eq!(html.to_fragment().unwrap(), built.to_fragment().unwrap());
    }

    #[test]
    fn content_reports_bad_markup() {
        let content = Content::from(String::from("<b>x"));
        assert!(content.into_fragment().is_err());
    }
}
