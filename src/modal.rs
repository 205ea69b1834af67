//! Modal controller: configuration in, built instance out, show/hide lifecycle.
//!
//! [`Modal`] collects section configuration, turns it into a sequence of
//! [`ModalBuilder`] calls on `build()`, and drives the show/hide lifecycle
//! through a [`Host`].
//!
//! Transitions are asynchronous. `show()` and `hide()` only issue commands and
//! register one-shot continuations; the host later reports progress through
//! [`Modal::handle_event`], which runs the continuation registered for that
//! event. At most one continuation is held per event, so a repeated `show()`
//! or `hide()` before completion replaces the pending continuation instead of
//! stacking a second one.
//!
//! ```text
//!  Unbuilt ──build──▶ Built ──show──▶ Showing ──Shown──▶ Shown
//!     ▲                                                    │
//!     └──────────── Hidden ◀── Hiding ◀── hide / Hide ─────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::builder::{ModalBuilder, ModalSection};
use crate::dom::{Fragment, NodeId};
use crate::error::ModalError;
use crate::host::{Host, TransitionEvent, VisibilityCommand};
use crate::options::{Hooks, ModalOptions};
use crate::section::{Content, Section, SectionKey, SectionStore};
use crate::template;

// ---------------------------------------------------------------------------
// ModalState
// ---------------------------------------------------------------------------

/// Where a controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalState {
    /// No instance exists.
    Unbuilt,
    /// An instance exists but has not been shown.
    Built,
    /// Show was requested; waiting for the host to confirm.
    Showing,
    /// The host confirmed the instance is fully visible.
    Shown,
    /// A hide is in progress; waiting for the host to confirm.
    Hiding,
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

/// What to do when a transition event arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    /// A hide started outside the controller; follow it with `hide(false)`.
    Dismiss,
    /// Run the shown hook.
    AnnounceShown,
    /// Run the hidden hook, detach, discard, advance the id.
    Finalize,
}

/// One-shot continuations keyed by event. Registering again replaces.
#[derive(Debug, Default)]
struct Subscriptions {
    pending: BTreeMap<TransitionEvent, Continuation>,
}

impl Subscriptions {
    fn once(&mut self, event: TransitionEvent, continuation: Continuation) {
        if self.pending.insert(event, continuation).is_some() {
            tracing::trace!(%event, "replaced pending continuation");
        }
    }

    fn take(&mut self, event: TransitionEvent) -> Option<Continuation> {
        self.pending.remove(&event)
    }

    fn events(&self) -> Vec<TransitionEvent> {
        self.pending.keys().copied().collect()
    }

    fn clear(&mut self) {
        self.pending.clear();
    }
}

// ---------------------------------------------------------------------------
// Modal
// ---------------------------------------------------------------------------

/// Controller for one modal widget.
pub struct Modal<H> {
    host: H,
    options: ModalOptions,
    hooks: Hooks<H>,
    sections: SectionStore,
    /// Identifier of the current (or next) instance. Starts at 1.
    id: u32,
    instance: Option<Fragment>,
    attached: bool,
    state: ModalState,
    subscriptions: Subscriptions,
}

impl<H: Host> Modal<H> {
    /// Create a controller on `host`.
    ///
    /// Fails with [`ModalError::Initialization`] if the host is not ready.
    pub fn new(host: H, options: ModalOptions, hooks: Hooks<H>) -> Result<Self, ModalError> {
        if !host.is_ready() {
            return Err(ModalError::Initialization(
                "the host document is not ready to accept modals".into(),
            ));
        }
        Ok(Self {
            host,
            options,
            hooks,
            sections: SectionStore::new(),
            id: 1,
            instance: None,
            attached: false,
            state: ModalState::Unbuilt,
            subscriptions: Subscriptions::default(),
        })
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Set the body from a producer, called once, right away.
    ///
    /// The produced content is HTML (parsed leniently, with optional end tags
    /// and stray `<` recovered) or an already-built [`Fragment`]. Broken tag
    /// syntax fails with [`ModalError::InvalidArgument`].
    pub fn set_body<F, C>(&mut self, producer: F) -> Result<&mut Self, ModalError>
    where
        F: FnOnce() -> C,
        C: Into<Content>,
    {
        let body = producer()
            .into()
            .into_fragment()
            .map_err(|err| ModalError::content("body", err))?;
        self.sections.add(Section::Body(body));
        Ok(self)
    }

    /// Set the footer buttons. Stored as given and parsed on `build()`.
    ///
    /// A button carrying `data-close` will also dismiss the modal. An empty
    /// list keeps the default close button.
    pub fn set_footer<I>(&mut self, buttons: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Content>,
    {
        let buttons = buttons.into_iter().map(Into::into).collect();
        self.sections.add(Section::Footer(buttons));
        self
    }

    /// Set the header title text.
    pub fn set_header_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.sections.add(Section::HeaderTitle(title.into()));
        self
    }

    /// Show or hide the header close (×) button. Hidden unless requested.
    pub fn set_show_close_button(&mut self, show: bool) -> &mut Self {
        self.sections.add(Section::HeaderShowCloseButton(show));
        self
    }

    // ── Build ────────────────────────────────────────────────────────

    /// Build an instance from the current options and sections, replacing any
    /// previous instance, then run the built hook.
    ///
    /// Continuations pending for the previous instance are dropped. Rebuilding
    /// while an instance is attached to the document leaves that copy
    /// attached; hide it first.
    pub fn build(&mut self) -> Result<&mut Self, ModalError> {
        let footer = self.footer()?;
        let options = self.options;

        let mut builder = ModalBuilder::new(self.id);
        if options.center_vertically {
            builder = builder.add_class(ModalSection::Dialog, template::CENTERED_CLASS);
        }
        if options.remove_animation {
            builder = builder.remove_class(ModalSection::Base, template::FADE_CLASS);
        }
        builder = builder.add_class(ModalSection::Dialog, options.size.class());

        if let Some(title) = self.sections.title() {
            builder = builder.set_text(ModalSection::HeaderTitle, title);
        }
        if self.sections.is_true(SectionKey::HeaderShowCloseButton) {
            builder = builder.append(ModalSection::Header, false, &template::header_close_button());
        }
        if let Some(body) = self.sections.body() {
            builder = builder.append(ModalSection::Body, true, body);
        }
        builder = builder.append(ModalSection::Content, false, &footer);

        if self.attached {
            tracing::warn!(
                dom_id = %self.dom_id(),
                "rebuilding while attached; the previous instance stays in the document"
            );
        }
        self.instance = Some(builder.create());
        self.attached = false;
        self.subscriptions.clear();
        self.state = ModalState::Built;
        tracing::debug!(id = self.id, sections = ?self.sections.names(), "modal built");

        if let Some(mut on_built) = self.hooks.on_built.take() {
            on_built(&*self);
            self.hooks.on_built = Some(on_built);
        }
        Ok(self)
    }

    /// `build()` followed by `show()`.
    pub fn build_and_show(&mut self) -> Result<(), ModalError> {
        self.build()?;
        self.show()
    }

    /// Assemble the footer: configured buttons with close markers rewritten
    /// into dismiss triggers, or the default close button.
    fn footer(&self) -> Result<Fragment, ModalError> {
        let mut footer = template::footer();
        let Some(container) = footer.root() else {
            return Ok(footer);
        };

        let buttons = match self.sections.footer() {
            Some(buttons) if !buttons.is_empty() => buttons
                .iter()
                .map(|button| {
                    let mut button = button
                        .to_fragment()
                        .map_err(|err| ModalError::content("footer button", err))?;
                    self.mark_dismiss(&mut button);
                    Ok(button)
                })
                .collect::<Result<Vec<_>, ModalError>>()?,
            _ => vec![template::footer_close_button()],
        };

        let dom = footer.dom_mut();
        for button in &buttons {
            for &top in button.roots() {
                dom.import(Some(container), button.dom(), top);
            }
        }
        Ok(footer)
    }

    /// Replace `data-close` on each top-level element with the dismiss
    /// trigger, targeted at this instance.
    fn mark_dismiss(&self, button: &mut Fragment) {
        let target = format!("#{}", self.dom_id());
        let tops: Vec<NodeId> = button.roots().to_vec();
        for top in tops {
            let Some(data) = button.dom_mut().get_mut(top) else {
                continue;
            };
            if data.remove_attr(template::CLOSE_MARKER) {
                data.set_attr(template::DISMISS_ATTR, Some(template::DISMISS_VALUE.into()));
                data.set_attr(template::TARGET_ATTR, Some(target.clone()));
            }
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Attach the instance and ask the host to show it.
    ///
    /// A host-initiated hide (a dismiss gesture) is routed into `hide(false)`;
    /// the shown hook runs once the host confirms visibility.
    pub fn show(&mut self) -> Result<(), ModalError> {
        let Some(instance) = self.instance.as_ref() else {
            return Err(ModalError::IllegalState(
                "build the modal before showing it".into(),
            ));
        };
        let dom_id = self.dom_id();
        if !self.attached {
            self.host.attach(instance);
            self.attached = true;
        }
        self.host.request(&dom_id, VisibilityCommand::Show);
        self.subscriptions.once(TransitionEvent::Hide, Continuation::Dismiss);
        self.subscriptions.once(TransitionEvent::Shown, Continuation::AnnounceShown);
        self.state = ModalState::Showing;
        tracing::debug!(%dom_id, "show requested");
        Ok(())
    }

    /// Hide the instance. With `force`, ask the host to start hiding; without
    /// it, a hide is assumed to be underway already.
    ///
    /// Once the host confirms, the hidden hook runs, the instance is detached
    /// and discarded, and the id advances.
    pub fn hide(&mut self, force: bool) -> Result<(), ModalError> {
        if self.instance.is_none() {
            return Err(ModalError::IllegalState(
                "build the modal before hiding it".into(),
            ));
        }
        let dom_id = self.dom_id();
        if force {
            self.host.request(&dom_id, VisibilityCommand::Hide);
        }
        self.subscriptions.once(TransitionEvent::Hidden, Continuation::Finalize);
        self.state = ModalState::Hiding;
        tracing::debug!(%dom_id, force, "hide requested");
        Ok(())
    }

    /// Deliver a transition event from the host.
    ///
    /// Runs and consumes the continuation registered for `event`. Returns
    /// whether one was registered.
    pub fn handle_event(&mut self, event: TransitionEvent) -> bool {
        let Some(continuation) = self.subscriptions.take(event) else {
            tracing::trace!(%event, "no continuation registered");
            return false;
        };
        tracing::debug!(%event, ?continuation, id = self.id, "transition event");
        match continuation {
            Continuation::Dismiss => {
                if let Err(err) = self.hide(false) {
                    tracing::warn!(%err, "dismiss arrived without an instance");
                }
            }
            Continuation::AnnounceShown => {
                self.state = ModalState::Shown;
                if let (Some(on_shown), Some(instance)) =
                    (self.hooks.on_shown.as_mut(), self.instance.as_ref())
                {
                    on_shown(self.id, instance);
                }
            }
            Continuation::Finalize => self.finalize(),
        }
        true
    }

    fn finalize(&mut self) {
        let id = self.id;
        if let Some(on_hidden) = self.hooks.on_hidden.as_mut() {
            on_hidden(id);
        }
        if self.instance.take().is_some() && self.attached {
            self.host.detach(&template::dom_id(id));
        }
        self.attached = false;
        self.subscriptions.clear();
        self.id += 1;
        self.state = ModalState::Unbuilt;
        tracing::debug!(id, next = self.id, "modal hidden and discarded");
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The current instance.
    pub fn modal(&self) -> Result<&Fragment, ModalError> {
        self.instance.as_ref().ok_or_else(|| {
            ModalError::IllegalState("build the modal before retrieving it".into())
        })
    }

    /// The current identifier. Advances only when a hide completes.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The generated DOM id for the current identifier.
    pub fn dom_id(&self) -> String {
        template::dom_id(self.id)
    }

    /// Lifecycle state.
    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Whether the current instance is attached to the host document.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Events that currently have a continuation registered.
    pub fn pending_events(&self) -> Vec<TransitionEvent> {
        self.subscriptions.events()
    }

    /// Stored section configuration.
    pub fn sections(&self) -> &SectionStore {
        &self.sections
    }

    /// Options fixed at construction.
    pub fn options(&self) -> &ModalOptions {
        &self.options
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: fmt::Debug> fmt::Debug for Modal<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modal")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("options", &self.options)
            .field("hooks", &self.hooks)
            .field("sections", &self.sections)
            .field("attached", &self.attached)
            .field("subscriptions", &self.subscriptions)
            .field("host", &self.host)
            .finish()
    }
}
