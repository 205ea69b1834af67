//! Template catalog: the structural skeletons a modal is assembled from.
//!
//! Templates are built node by node rather than parsed, so producing one can
//! never fail. Each call returns a fresh fragment the caller owns.

use crate::dom::{Dom, Fragment, NodeData};

/// Prefix of generated instance ids: `dynmodal-<n>`.
pub const DOM_ID_PREFIX: &str = "dynmodal";

/// Caller-facing marker on a footer button meaning "this button also closes".
pub const CLOSE_MARKER: &str = "data-close";

/// Attribute the behavior framework reads to find dismiss triggers.
pub const DISMISS_ATTR: &str = "data-dismiss";

/// Value of [`DISMISS_ATTR`] for modal dismissal.
pub const DISMISS_VALUE: &str = "modal";

/// Attribute naming the instance a dismiss trigger closes (`#dynmodal-<n>`).
pub const TARGET_ATTR: &str = "data-target";

/// Transition class on the root; removed to disable animation.
pub const FADE_CLASS: &str = "fade";

/// Dialog class for vertical centering.
pub const CENTERED_CLASS: &str = "modal-dialog-centered";

/// Title shown until `set_header_title` is used.
pub const DEFAULT_TITLE: &str = "Default Title";

/// The generated id for instance `id`.
pub fn dom_id(id: u32) -> String {
    format!("{DOM_ID_PREFIX}-{id}")
}

/// The base dialog skeleton: root, dialog, content, header (with title) and
/// body (with placeholder text). The footer is added at build time.
pub fn dialog() -> Fragment {
    let mut dom = Dom::new();
    let root = dom.insert(
        NodeData::element("div")
            .with_classes(["modal", FADE_CLASS])
            .with_attr("tabindex", "-1")
            .with_attr("role", "dialog")
            .with_attr("aria-hidden", "true"),
    );
    let dialog = dom.insert_child(
        root,
        NodeData::element("div")
            .with_class("modal-dialog")
            .with_attr("role", "document"),
    );
    let content = dom.insert_child(dialog, NodeData::element("div").with_class("modal-content"));

    let header = dom.insert_child(content, NodeData::element("div").with_class("modal-header"));
    let title = dom.insert_child(header, NodeData::element("h5").with_class("modal-title"));
    dom.insert_child(title, NodeData::text(DEFAULT_TITLE));

    let body = dom.insert_child(content, NodeData::element("div").with_class("modal-body"));
    let intro = dom.insert_child(body, NodeData::element("p"));
    dom.insert_child(
        intro,
        NodeData::text("This is the default body placeholder for dynmodal modals."),
    );
    dom.insert_child(body, NodeData::element("br"));
    let usage = dom.insert_child(body, NodeData::element("p"));
    dom.insert_child(
        usage,
        NodeData::text("Use Modal::set_body to change the contents of this section."),
    );

    Fragment::from_dom(dom)
}

/// The header close (×) button.
pub fn header_close_button() -> Fragment {
    let mut dom = Dom::new();
    let button = dom.insert(
        NodeData::element("button")
            .with_class("close")
            .with_attr("type", "button")
            .with_attr(DISMISS_ATTR, DISMISS_VALUE)
            .with_attr("aria-label", "Close"),
    );
    let glyph = dom.insert_child(button, NodeData::element("span").with_attr("aria-hidden", "true"));
    dom.insert_child(glyph, NodeData::text("\u{d7}"));
    Fragment::from_dom(dom)
}

/// The empty footer container.
pub fn footer() -> Fragment {
    Fragment::element(NodeData::element("div").with_class("modal-footer"))
}

/// The footer button used when no buttons were configured.
pub fn footer_close_button() -> Fragment {
    let mut dom = Dom::new();
    let button = dom.insert(
        NodeData::element("button")
            .with_classes(["btn", "btn-primary"])
            .with_attr("type", "button")
            .with_attr(DISMISS_ATTR, DISMISS_VALUE),
    );
    dom.insert_child(button, NodeData::text("Close"));
    Fragment::from_dom(dom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_id_format() {
        assert_eq!(dom_id(1), "dynmodal-1");
        assert_eq!(dom_id(42), "dynmodal-42");
    }

    #[test]
    fn dialog_has_every_region() {
        let dialog = dialog();
        for locator in [
            "div.modal-dialog",
            "div.modal-content",
            "div.modal-header",
            "div.modal-header h5.modal-title",
            "div.modal-body",
        ] {
            assert!(dialog.find(locator).unwrap().is_some(), "missing {locator}");
        }
        assert!(dialog.find("div.modal-footer").unwrap().is_none());
    }

    #[test]
    fn dialog_root_fades() {
        let dialog = dialog();
        let root = dialog.root_data().unwrap();
        assert!(root.has_class("modal"));
        assert!(root.has_class(FADE_CLASS));
        assert_eq!(root.attr("role"), Some("dialog"));
    }

    #[test]
    fn templates_are_fresh_copies() {
        let mut first = dialog();
        first.root_data_mut().unwrap().remove_class(FADE_CLASS);
        assert!(dialog().root_data().unwrap().has_class(FADE_CLASS));
    }

    #[test]
    fn close_buttons_dismiss() {
        for button in [header_close_button(), footer_close_button()] {
            assert_eq!(button.root_data().unwrap().attr(DISMISS_ATTR), Some(DISMISS_VALUE));
        }
    }

    #[test]
    fn template_markup() {
        insta::assert_snapshot!(
            header_close_button().to_html(),
            @r#"<button class="close" type="button" data-dismiss="modal" aria-label="Close"><span aria-hidden="true">×</span></button>"#
        );
        insta::assert_snapshot!(
            footer_close_button().to_html(),
            @r#"<button class="btn btn-primary" type="button" data-dismiss="modal">Close</button>"#
        );
    }
}
