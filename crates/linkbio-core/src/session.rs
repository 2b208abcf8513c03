//! Tracks which user is logged in.
//!
//! The session pointer lives in the store, so it survives restarts. A
//! pointer to a user that no longer resolves is treated as "logged out".

use linkbio_store::{KeyValueStore, StoreAdapter};
use linkbio_types::{User, UserPatch};
use tracing::{info, warn};

use crate::error::{CoreError, CoreResult};
use crate::repository::UserRepository;

pub struct SessionManager<'a, S> {
    adapter: &'a StoreAdapter<S>,
    users: UserRepository<'a, S>,
}

impl<'a, S: KeyValueStore> SessionManager<'a, S> {
    pub fn new(adapter: &'a StoreAdapter<S>) -> Self {
        Self {
            adapter,
            users: UserRepository::new(adapter),
        }
    }

    /// Authenticate by email and start a session for the matched user.
    pub fn login(&self, email: &str, password: &str) -> CoreResult<User> {
        let user = self.users.validate_credentials(email, password)?;
        self.adapter.write_session_user_id(Some(&user.id))?;
        info!(user = %user.id, username = %user.username, "logged in");
        Ok(user)
    }

    /// Create a user and start a session for it.
    pub fn register(&self, username: &str, email: &str, password: &str) -> CoreResult<User> {
        let user = self.users.create_user(username, email, password)?;
        self.adapter.write_session_user_id(Some(&user.id))?;
        info!(user = %user.id, username = %user.username, "registered");
        Ok(user)
    }

    /// End the session. Logging out with no session is not an error.
    pub fn logout(&self) -> CoreResult<()> {
        self.adapter.write_session_user_id(None)?;
        info!("logged out");
        Ok(())
    }

    /// The logged-in user, if the session pointer resolves to one.
    pub fn current_session(&self) -> CoreResult<Option<User>> {
        let Some(id) = self.adapter.read_session_user_id()? else {
            return Ok(None);
        };
        let user = self.users.find_by_id(&id)?;
        if user.is_none() {
            warn!(user = %id, "session points at a missing user; treating as logged out");
        }
        Ok(user)
    }

    pub fn is_authenticated(&self) -> CoreResult<bool> {
        Ok(self.current_session()?.is_some())
    }

    /// The logged-in user, or `NoActiveUser`.
    pub fn require_current(&self) -> CoreResult<User> {
        self.current_session()?.ok_or(CoreError::NoActiveUser)
    }

    /// Apply a profile patch to the logged-in user.
    pub fn update_current_user(&self, patch: UserPatch) -> CoreResult<User> {
        let current = self.require_current()?;
        self.users.update_user(&current.id, patch)
    }
}
