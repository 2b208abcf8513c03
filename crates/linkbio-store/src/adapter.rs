//! The users/session adapter over a [`KeyValueStore`].

use linkbio_types::{User, UserId};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::keys::validate_key;
use crate::traits::KeyValueStore;

/// Key holding the JSON array of user records.
pub const USERS_KEY: &str = "users";

/// Key holding the bare id of the logged-in user.
pub const CURRENT_USER_KEY: &str = "current_user";

/// Reads and writes Linkbio's two logical keys through a backend store.
///
/// An optional namespace prefix is prepended to both key names, so several
/// applications can share one backend (`linktree_` yields `linktree_users`
/// and `linktree_current_user`).
#[derive(Debug)]
pub struct StoreAdapter<S> {
    store: S,
    users_key: String,
    session_key: String,
}

impl<S: KeyValueStore> StoreAdapter<S> {
    /// Wrap `store` using the unprefixed key names.
    pub fn new(store: S) -> Self {
        Self {
            store,
            users_key: USERS_KEY.to_string(),
            session_key: CURRENT_USER_KEY.to_string(),
        }
    }

    /// Wrap `store`, prefixing both key names with `prefix`.
    pub fn with_prefix(store: S, prefix: &str) -> StoreResult<Self> {
        let users_key = format!("{prefix}{USERS_KEY}");
        let session_key = format!("{prefix}{CURRENT_USER_KEY}");
        validate_key(&users_key)?;
        validate_key(&session_key)?;
        Ok(Self {
            store,
            users_key,
            session_key,
        })
    }

    /// The underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the full user collection.
    ///
    /// An absent key yields an empty collection. A value that does not parse
    /// as a user array is logged and also treated as empty.
    pub fn read_users(&self) -> StoreResult<Vec<User>> {
        let Some(bytes) = self.store.get(&self.users_key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_slice(&bytes) {
            Ok(users) => Ok(users),
            Err(e) => {
                warn!(key = %self.users_key, error = %e, "unparsable user collection; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Serialize and persist the full user collection, replacing the old one.
    pub fn write_users(&self, users: &[User]) -> StoreResult<()> {
        let bytes =
            serde_json::to_vec(users).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(&self.users_key, &bytes)?;
        debug!(count = users.len(), "user collection written");
        Ok(())
    }

    /// Read the session pointer.
    ///
    /// A stored value that is not a valid user id is logged and treated as
    /// no session.
    pub fn read_session_user_id(&self) -> StoreResult<Option<UserId>> {
        let Some(bytes) = self.store.get(&self.session_key)? else {
            return Ok(None);
        };
        let parsed = std::str::from_utf8(&bytes)
            .ok()
            .and_then(|raw| raw.parse::<UserId>().ok());
        if parsed.is_none() {
            warn!(key = %self.session_key, "malformed session pointer; treating as no session");
        }
        Ok(parsed)
    }

    /// Persist the session pointer. `None` removes the key entirely.
    pub fn write_session_user_id(&self, id: Option<&UserId>) -> StoreResult<()> {
        match id {
            Some(id) => {
                self.store.set(&self.session_key, id.to_string().as_bytes())?;
                debug!(user = %id, "session pointer written");
            }
            None => {
                let existed = self.store.remove(&self.session_key)?;
                debug!(existed, "session pointer cleared");
            }
        }
        Ok(())
    }
}
