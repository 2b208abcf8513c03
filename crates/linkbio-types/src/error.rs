use thiserror::Error;

/// Errors produced while constructing or validating records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("link title must not be empty")]
    EmptyTitle,

    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid identifier {0:?}")]
    InvalidId(String),
}
