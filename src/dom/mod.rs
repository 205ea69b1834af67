//! DOM arena: slotmap-backed node forest, HTML fragments, selector queries.

pub mod fragment;
pub mod html;
pub mod node;
pub mod query;
pub mod selector;
pub mod tree;

pub use fragment::Fragment;
pub use html::ParseError;
pub use node::{NodeData, NodeId, NodeKind};
pub use selector::{Selector, SelectorError};
pub use tree::Dom;
