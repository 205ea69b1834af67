//! Pilot: drive a modal on a headless page the way the behavior framework
//! would.
//!
//! The controller only issues commands; the Pilot answers them. `settle()`
//! replays every command the page has received since the last call and
//! delivers the transition events the framework would fire once each
//! transition finishes. `click()` simulates a user activating an element, so
//! dismiss triggers in the built markup can be exercised end to end.

use crate::dom::SelectorError;
use crate::error::ModalError;
use crate::host::{Host, TransitionEvent, VisibilityCommand};
use crate::modal::Modal;
use crate::options::{Hooks, ModalOptions};
use crate::template;

use super::page::HeadlessPage;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless modal driver for testing.
///
/// # Examples
///
/// ```
/// use dynmodal::testing::Pilot;
///
/// let mut pilot = Pilot::new().unwrap();
/// pilot.modal_mut().set_header_title("Hello");
/// pilot.modal_mut().build_and_show().unwrap();
/// pilot.settle();
/// assert!(pilot.page().is_visible("dynmodal-1"));
///
/// pilot.click("[data-dismiss]").unwrap();
/// assert_eq!(pilot.modal().id(), 2);
/// ```
#[derive(Debug)]
pub struct Pilot {
    modal: Modal<HeadlessPage>,
    processed: usize,
}

impl Pilot {
    /// A default modal on an empty page.
    pub fn new() -> Result<Self, ModalError> {
        Self::with_options(ModalOptions::default(), Hooks::default())
    }

    /// A modal with `options` and `hooks` on an empty page.
    pub fn with_options(
        options: ModalOptions,
        hooks: Hooks<HeadlessPage>,
    ) -> Result<Self, ModalError> {
        Ok(Self::from_modal(Modal::new(HeadlessPage::new(), options, hooks)?))
    }

    /// Drive an existing controller.
    pub fn from_modal(modal: Modal<HeadlessPage>) -> Self {
        let processed = modal.host().commands().len();
        Self { modal, processed }
    }

    // ── Framework simulation ─────────────────────────────────────────

    /// Complete every transition requested since the last call.
    ///
    /// A show completes with `Shown`; a hide fires `Hide` and then `Hidden`.
    /// Commands for an instance other than the current one are dropped.
    pub fn settle(&mut self) {
        while self.processed < self.modal.host().commands().len() {
            let (dom_id, command) = self.modal.host().commands()[self.processed].clone();
            self.processed += 1;
            if dom_id != self.modal.dom_id() {
                tracing::trace!(%dom_id, ?command, "dropping command for a stale instance");
                continue;
            }
            match command {
                VisibilityCommand::Show => {
                    self.deliver(TransitionEvent::Shown);
                }
                VisibilityCommand::Hide => {
                    self.deliver(TransitionEvent::Hide);
                    self.deliver(TransitionEvent::Hidden);
                }
            }
        }
    }

    /// Simulate a user dismiss gesture (backdrop click, Escape) on the
    /// current instance: `Hide`, then `Hidden`.
    pub fn dismiss(&mut self) {
        self.settle();
        let dom_id = self.modal.dom_id();
        if !self.modal.host().is_visible(&dom_id) {
            return;
        }
        self.modal.host_mut().request(&dom_id, VisibilityCommand::Hide);
        self.settle();
    }

    /// Click the first element on the page matching `locator`.
    ///
    /// A dismiss trigger closes the instance it targets (its `data-target`,
    /// or the enclosing modal). Returns whether the click dismissed the
    /// current instance.
    pub fn click(&mut self, locator: &str) -> Result<bool, SelectorError> {
        self.settle();
        let page = self.modal.host();
        let Some(node) = page.find(locator)? else {
            return Ok(false);
        };
        let Some(data) = page.body().get(node) else {
            return Ok(false);
        };
        if data.attr(template::DISMISS_ATTR) != Some(template::DISMISS_VALUE) {
            return Ok(false);
        }

        let target = match data.attr(template::TARGET_ATTR) {
            Some(target) => target.trim_start_matches('#').to_owned(),
            None => page
                .body()
                .ancestors(node)
                .into_iter()
                .filter_map(|ancestor| page.body().get(ancestor))
                .find(|ancestor| ancestor.has_class("modal"))
                .and_then(|modal| modal.id.clone())
                .unwrap_or_default(),
        };
        if target != self.modal.dom_id() {
            return Ok(false);
        }
        self.dismiss();
        Ok(true)
    }

    fn deliver(&mut self, event: TransitionEvent) {
        self.modal.handle_event(event);
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Borrow the controller.
    pub fn modal(&self) -> &Modal<HeadlessPage> {
        &self.modal
    }

    /// Borrow the controller mutably.
    pub fn modal_mut(&mut self) -> &mut Modal<HeadlessPage> {
        &mut self.modal
    }

    /// Borrow the page.
    pub fn page(&self) -> &HeadlessPage {
        self.modal.host()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
