//! Host seam: the document a modal is attached to and the visibility
//! behavior that animates it.
//!
//! The controller issues [`VisibilityCommand`]s through [`Host::request`] and
//! returns immediately. The host reports progress later by passing
//! [`TransitionEvent`]s to [`Modal::handle_event`](crate::modal::Modal::handle_event).

use std::fmt;

use crate::dom::Fragment;

/// A command to the visibility behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityCommand {
    Show,
    Hide,
}

/// An asynchronous notification from the visibility behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransitionEvent {
    /// A hide has started, from a command or a user dismiss gesture.
    Hide,
    /// The modal is fully visible.
    Shown,
    /// The modal is fully hidden.
    Hidden,
}

impl TransitionEvent {
    /// The behavior framework's event name.
    pub fn name(self) -> &'static str {
        match self {
            TransitionEvent::Hide => "hide.bs.modal",
            TransitionEvent::Shown => "shown.bs.modal",
            TransitionEvent::Hidden => "hidden.bs.modal",
        }
    }
}

impl fmt::Display for TransitionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The environment a modal lives in.
pub trait Host {
    /// Whether the host can accept modals. Checked once at construction.
    fn is_ready(&self) -> bool {
        true
    }

    /// Attach a copy of `instance` to the document.
    fn attach(&mut self, instance: &Fragment);

    /// Remove the attached instance whose root carries `dom_id`.
    fn detach(&mut self, dom_id: &str);

    /// Ask the behavior to start a transition for the instance `dom_id`.
    fn request(&mut self, dom_id: &str, command: VisibilityCommand);
}
