//! Node types: NodeId, NodeKind, NodeData.

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// What a node is: an element with a tag name, or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An element such as `div` or `button`. Tag names are stored lowercase.
    Element(String),
    /// A text node. Stored unescaped; escaping happens on serialization.
    Text(String),
}

/// Data associated with a single DOM node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Element or text.
    pub kind: NodeKind,
    /// Optional unique id (the `id` attribute, CSS `#id` selector).
    pub id: Option<String>,
    /// CSS classes (the `class` attribute, `.class` selector), in insertion order.
    pub classes: Vec<String>,
    /// Remaining attributes in source order. `None` values are boolean
    /// attributes written without `=`, e.g. `<button data-close>`.
    pub attributes: Vec<(String, Option<String>)>,
}

impl NodeData {
    /// Create an element node with the given tag name.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Element(tag.into().to_ascii_lowercase()),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text(text.into()),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a single CSS class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add multiple CSS classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            let class = class.into();
            if !self.classes.contains(&class) {
                self.classes.push(class);
            }
        }
        self
    }

    /// Set an attribute with a value (builder).
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, Some(value.into()));
        self
    }

    /// Set a boolean attribute with no value (builder).
    pub fn with_flag(mut self, name: &str) -> Self {
        self.set_attr(name, None);
        self
    }

    /// Tag name if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(tag) => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Whether this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    /// Check whether this node has a given CSS class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a CSS class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a CSS class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Whether an attribute is present (with or without a value).
    ///
    /// `id` and `class` are answered from their dedicated fields.
    pub fn has_attr(&self, name: &str) -> bool {
        match name {
            "id" => self.id.is_some(),
            "class" => !self.classes.is_empty(),
            _ => self.attributes.iter().any(|(n, _)| n == name),
        }
    }

    /// Value of an attribute. Boolean attributes read as `Some("")`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            _ => self
                .attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_deref().unwrap_or("")),
        }
    }

    /// Set (or overwrite) an attribute, keeping its original position if it
    /// already existed.
    ///
    /// `id` and `class` are routed to their dedicated fields.
    pub fn set_attr(&mut self, name: &str, value: Option<String>) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "id" => self.id = value,
            "class" => {
                self.classes.clear();
                for class in value.as_deref().unwrap_or("").split_whitespace() {
                    self.add_class(class);
                }
            }
            _ => match self.attributes.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => self.attributes.push((name, value)),
            },
        }
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        match name {
            "id" => self.id.take().is_some(),
            "class" => {
                let had = !self.classes.is_empty();
                self.classes.clear();
                had
            }
            _ => {
                let before = self.attributes.len();
                self.attributes.retain(|(n, _)| n != name);
                self.attributes.len() != before
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_defaults() {
        let data = NodeData::element("DIV");
        assert_eq!(data.tag(), Some("div"));
        assert!(data.id.is_none());
        assert!(data.classes.is_empty());
        assert!(data.attributes.is_empty());
        assert!(data.is_element());
    }

    #[test]
    fn text_node_has_no_tag() {
        let data = NodeData::text("hello");
        assert_eq!(data.tag(), None);
        assert!(!data.is_element());
    }

    #[test]
    fn builder_with_classes_dedup() {
        let data = NodeData::element("div").with_class("a").with_classes(["a", "b"]);
        assert_eq!(data.classes, vec!["a", "b"]);
    }

    #[test]
    fn add_class_idempotent() {
        let mut data = NodeData::element("div");
        data.add_class("foo");
        data.add_class("foo");
        assert_eq!(data.classes.len(), 1);
    }

    #[test]
    fn remove_class_noop() {
        let mut data = NodeData::element("div");
        data.remove_class("nonexistent");
        assert!(data.classes.is_empty());
    }

    #[test]
    fn flag_attribute_reads_as_empty() {
        let data = NodeData::element("button").with_flag("data-close");
        assert!(data.has_attr("data-close"));
        assert_eq!(data.attr("data-close"), Some(""));
    }

    #[test]
    fn set_attr_overwrites_in_place() {
        let mut data = NodeData::element("button")
            .with_attr("type", "button")
            .with_attr("data-dismiss", "x");
        data.set_attr("type", Some("submit".into()));
        assert_eq!(
            data.attributes,
            vec![
                ("type".to_owned(), Some("submit".to_owned())),
                ("data-dismiss".to_owned(), Some("x".to_owned())),
            ]
        );
    }

    #[test]
    fn id_and_class_route_to_fields() {
        let mut data = NodeData::element("div");
        data.set_attr("id", Some("main".into()));
        data.set_attr("class", Some("  modal  fade ".into()));
        assert_eq!(data.id.as_deref(), Some("main"));
        assert_eq!(data.classes, vec!["modal", "fade"]);
        assert!(data.attributes.is_empty());
    }

    #[test]
    fn remove_attr_reports_presence() {
        let mut data = NodeData::element("button").with_flag("data-close");
        assert!(data.remove_attr("data-close"));
        assert!(!data.remove_attr("data-close"));
        assert!(!data.has_attr("data-close"));
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
