//! Controller configuration: options, sizes, lifecycle hooks.
//!
//! [`ModalOptions`] is plain data and can be loaded from JSON. [`Hooks`] holds
//! the lifecycle callbacks, which cannot be serialized. Both are fixed once the
//! controller is constructed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dom::Fragment;
use crate::error::ModalError;
use crate::modal::Modal;

// ---------------------------------------------------------------------------
// ModalSize
// ---------------------------------------------------------------------------

/// Dialog width preset.
///
/// In serialized options either the name (`"small"`) or the structural class
/// (`"modal-sm"`) is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalSize {
    #[default]
    #[serde(alias = "")]
    Default,
    #[serde(alias = "modal-sm")]
    Small,
    #[serde(alias = "modal-lg")]
    Large,
}

impl ModalSize {
    /// Every size, for exhaustive checks.
    pub const ALL: [ModalSize; 3] = [ModalSize::Default, ModalSize::Small, ModalSize::Large];

    /// The structural class applied to the dialog region. Empty for `Default`.
    pub fn class(self) -> &'static str {
        match self {
            ModalSize::Default => "",
            ModalSize::Small => "modal-sm",
            ModalSize::Large => "modal-lg",
        }
    }
}

// ---------------------------------------------------------------------------
// ModalOptions
// ---------------------------------------------------------------------------

/// Structural options for a modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ModalOptions {
    /// Center the dialog vertically in the viewport.
    pub center_vertically: bool,
    /// Open and close without the fade transition.
    pub remove_animation: bool,
    /// Width preset.
    pub size: ModalSize,
}

impl ModalOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object. Missing keys take their defaults;
    /// unknown keys are an error.
    pub fn from_json(input: &str) -> Result<Self, ModalError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Set vertical centering (builder).
    pub fn with_center_vertically(mut self, center: bool) -> Self {
        self.center_vertically = center;
        self
    }

    /// Set whether the fade transition is removed (builder).
    pub fn with_remove_animation(mut self, remove: bool) -> Self {
        self.remove_animation = remove;
        self
    }

    /// Set the width preset (builder).
    pub fn with_size(mut self, size: ModalSize) -> Self {
        self.size = size;
        self
    }
}

// ---------------------------------------------------------------------------
// Hooks
// ---------------------------------------------------------------------------

/// Called after `build()` with the controller.
pub type BuiltHook<H> = Box<dyn FnMut(&Modal<H>)>;
/// Called once the host confirms the modal is fully shown, with its id and instance.
pub type ShownHook = Box<dyn FnMut(u32, &Fragment)>;
/// Called once the host confirms the modal is fully hidden, with its id.
pub type HiddenHook = Box<dyn FnMut(u32)>;

/// Optional lifecycle callbacks.
pub struct Hooks<H> {
    pub(crate) on_built: Option<BuiltHook<H>>,
    pub(crate) on_shown: Option<ShownHook>,
    pub(crate) on_hidden: Option<HiddenHook>,
}

impl<H> Hooks<H> {
    /// No callbacks.
    pub fn new() -> Self {
        Self {
            on_built: None,
            on_shown: None,
            on_hidden: None,
        }
    }

    /// Set the built callback (builder).
    pub fn on_built(mut self, f: impl FnMut(&Modal<H>) + 'static) -> Self {
        self.on_built = Some(Box::new(f));
        self
    }

    /// Set the shown callback (builder).
    pub fn on_shown(mut self, f: impl FnMut(u32, &Fragment) + 'static) -> Self {
        self.on_shown = Some(Box::new(f));
        self
    }

    /// Set the hidden callback (builder).
    pub fn on_hidden(mut self, f: impl FnMut(u32) + 'static) -> Self {
        self.on_hidden = Some(Box::new(f));
        self
    }
}

impl<H> Default for Hooks<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for Hooks<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_built", &self.on_built.is_some())
            .field("on_shown", &self.on_shown.is_some())
            .field("on_hidden", &self.on_hidden.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ModalOptions::new();
        assert!(!options.center_vertically);
        assert!(!options.remove_animation);
        assert_eq!(options.size, ModalSize::Default);
    }

    #[test]
    fn builder_methods() {
        let options = ModalOptions::new()
            .with_center_vertically(true)
            .with_remove_animation(true)
            .with_size(ModalSize::Large);
        assert!(options.center_vertically);
        assert!(options.remove_animation);
        assert_eq!(options.size, ModalSize::Large);
    }

    #[test]
    fn size_classes() {
        assert_eq!(ModalSize::Default.class(), "");
        assert_eq!(ModalSize::Small.class(), "modal-sm");
        assert_eq!(ModalSize::Large.class(), "modal-lg");
    }

    #[test]
    fn from_json_merges_over_defaults() {
        let options = ModalOptions::from_json(r#"{"centerVertically": true}"#).unwrap();
        assert_eq!(options, ModalOptions::new().with_center_vertically(true));
    }

    #[test]
    fn from_json_accepts_names_and_classes() {
        let by_name = ModalOptions::from_json(r#"{"size": "small"}"#).unwrap();
        let by_class = ModalOptions::from_json(r#"{"size": "modal-sm"}"#).unwrap();
        let empty = ModalOptions::from_json(r#"{"size": ""}"#).unwrap();
        assert_eq!(by_name.size, ModalSize::Small);
        assert_eq!(by_class.size, ModalSize::Small);
        assert_eq!(empty.size, ModalSize::Default);
    }

    #[test]
    fn from_json_rejects_unknown_keys() {
        let err = ModalOptions::from_json(r#"{"backdrop": "static"}"#).unwrap_err();
        assert!(matches!(err, ModalError::Config(_)));
    }

    #[test]
    fn from_json_rejects_unknown_size() {
        assert!(ModalOptions::from_json(r#"{"size": "modal-xl"}"#).is_err());
    }

    #[test]
    fn hooks_debug_shows_presence() {
        let hooks: Hooks<crate::testing::HeadlessPage> = Hooks::new().on_hidden(|_| {});
        let debug = format!("{hooks:?}");
        assert!(debug.contains("on_hidden: true"));
        assert!(debug.contains("on_built: false"));
    }
}
