//! Headless testing support: an in-memory page and a framework driver.
//!
//! [`HeadlessPage`] implements [`Host`](crate::host::Host) without a browser.
//! [`Pilot`] wraps a modal on such a page and answers its visibility commands
//! with the transition events a real behavior framework would fire.

pub mod page;
pub mod pilot;

pub use page::HeadlessPage;
pub use pilot::Pilot;
