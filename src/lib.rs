//! # dynmodal
//!
//! Section-based construction and lifecycle control for dialog overlays over a
//! retained DOM.
//!
//! Configure a [`Modal`] by section (header title, close button, body,
//! footer), call `build()` to assemble a fresh instance from the dialog
//! skeleton, then `show()` it on a [`Host`]. The host reports transitions back
//! through [`Modal::handle_event`]; when a hide completes the instance is
//! discarded and the controller's id advances, so the next build carries a new
//! `dynmodal-<n>` DOM id.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed DOM arena, HTML fragments, structural selectors
//! - **[`template`]**: The dialog skeleton and default buttons
//! - **[`builder`]**: Structural mutations addressed by modal region
//! - **[`section`]**: Pending per-section configuration
//! - **[`modal`]**: The controller: build, show, hide, transition events
//! - **[`host`]**: The seam to the document and the visibility behavior
//! - **[`options`]**: Options (JSON-loadable) and lifecycle hooks
//! - **[`testing`]**: Headless page and framework driver
//!
//! ```
//! use dynmodal::{Hooks, Modal, ModalOptions, ModalSize};
//! use dynmodal::testing::HeadlessPage;
//!
//! let options = ModalOptions::new().with_size(ModalSize::Large);
//! let mut modal = Modal::new(HeadlessPage::new(), options, Hooks::default())?;
//! modal
//!     .set_header_title("Delete file?")
//!     .set_footer(["<button class='btn btn-danger' data-close>Delete</button>"]);
//! modal.set_body(|| "<p>This cannot be undone.</p>")?;
//! modal.build_and_show()?;
//! assert!(modal.host().is_attached("dynmodal-1"));
//! # Ok::<(), dynmodal::ModalError>(())
//! ```

// Foundation
pub mod dom;
pub mod error;

// Assembly
pub mod builder;
pub mod section;
pub mod template;

// Control
pub mod host;
pub mod modal;
pub mod options;

// Headless support
pub mod testing;

pub use builder::{ModalBuilder, ModalSection};
pub use dom::Fragment;
pub use error::ModalError;
pub use host::{Host, TransitionEvent, VisibilityCommand};
pub use modal::{Modal, ModalState};
pub use options::{Hooks, ModalOptions, ModalSize};
pub use section::{Content, Section, SectionKey, SectionStore};
