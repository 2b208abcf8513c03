use linkbio_types::{LinkId, TypeError, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("username already exists: {username}")]
    DuplicateUsername { username: String },

    #[error("email already exists: {email}")]
    DuplicateEmail { email: String },

    /// Unknown email or wrong password; the two are deliberately not
    /// distinguished.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("user not found: {id}")]
    UserNotFound { id: UserId },

    #[error("link not found: {id}")]
    LinkNotFound { id: LinkId },

    #[error("invalid link data: {0}")]
    InvalidLinkData(TypeError),

    #[error("invalid user data: {reason}")]
    InvalidUserData { reason: String },

    #[error("no active user session")]
    NoActiveUser,

    #[error("config error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] linkbio_store::StoreError),
}

pub type CoreResult<T> = Result<T, CoreError>;
