//! Controller errors.

use crate::dom::ParseError;

/// Errors returned by [`Modal`](crate::modal::Modal) operations.
///
/// Every error is reported synchronously by the call that violated the
/// precondition; nothing is deferred into a transition callback.
#[derive(Debug, thiserror::Error)]
pub enum ModalError {
    /// The host environment could not support a modal at construction time.
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// The operation needs a built instance and there is none.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// Caller-supplied content could not be used.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A serialized options document was rejected.
    #[error("invalid options: {0}")]
    Config(#[from] serde_json::Error),
}

impl ModalError {
    pub(crate) fn content(what: &str, err: ParseError) -> Self {
        Self::InvalidArgument(format!("{what} is not valid HTML: {err}"))
    }
}
