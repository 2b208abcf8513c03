//! CRUD over the persisted user collection.
//!
//! [`UserRepository::update_user`] is the single mutation primitive: profile
//! edits and every link operation are expressed as a read-modify-write of
//! the stored record through it.

use linkbio_store::{KeyValueStore, StoreAdapter};
use linkbio_types::{User, UserId, UserPatch};
use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// User lookups and mutations over a [`StoreAdapter`].
pub struct UserRepository<'a, S> {
    adapter: &'a StoreAdapter<S>,
}

impl<S> Clone for UserRepository<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for UserRepository<'_, S> {}

impl<'a, S: KeyValueStore> UserRepository<'a, S> {
    pub fn new(adapter: &'a StoreAdapter<S>) -> Self {
        Self { adapter }
    }

    /// Register a new user.
    ///
    /// The password is accepted but not stored: this core performs no
    /// credential verification.
    pub fn create_user(&self, username: &str, email: &str, _password: &str) -> CoreResult<User> {
        let username = required("username", username)?;
        let email = required("email", email)?;

        let mut users = self.adapter.read_users()?;
        if users.iter().any(|u| u.username == username) {
            return Err(CoreError::DuplicateUsername { username });
        }
        if users.iter().any(|u| u.email == email) {
            return Err(CoreError::DuplicateEmail { email });
        }

        let user = User::new(username, email);
        users.push(user.clone());
        self.adapter.write_users(&users)?;

        debug!(user = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    /// Exact, case-sensitive username lookup. Needs no session.
    pub fn find_by_username(&self, username: &str) -> CoreResult<Option<User>> {
        Ok(self
            .adapter
            .read_users()?
            .into_iter()
            .find(|u| u.username == username))
    }

    pub fn find_by_id(&self, id: &UserId) -> CoreResult<Option<User>> {
        Ok(self.adapter.read_users()?.into_iter().find(|u| &u.id == id))
    }

    /// Like [`find_by_id`](Self::find_by_id), failing with `UserNotFound`.
    pub fn get(&self, id: &UserId) -> CoreResult<User> {
        self.find_by_id(id)?
            .ok_or_else(|| CoreError::UserNotFound { id: id.clone() })
    }

    pub fn list_users(&self) -> CoreResult<Vec<User>> {
        Ok(self.adapter.read_users()?)
    }

    /// Merge `patch` into the stored user and persist the collection.
    ///
    /// A new username or email must not belong to any other user. Fields the
    /// patch leaves unset keep their stored values.
    pub fn update_user(&self, id: &UserId, mut patch: UserPatch) -> CoreResult<User> {
        let mut users = self.adapter.read_users()?;
        let index = users
            .iter()
            .position(|u| &u.id == id)
            .ok_or_else(|| CoreError::UserNotFound { id: id.clone() })?;

        if let Some(username) = patch.username.take() {
            let username = required("username", &username)?;
            if users.iter().any(|u| &u.id != id && u.username == username) {
                return Err(CoreError::DuplicateUsername { username });
            }
            patch.username = Some(username);
        }
        if let Some(email) = patch.email.take() {
            let email = required("email", &email)?;
            if users.iter().any(|u| &u.id != id && u.email == email) {
                return Err(CoreError::DuplicateEmail { email });
            }
            patch.email = Some(email);
        }

        let Some(user) = users.get_mut(index) else {
            return Err(CoreError::UserNotFound { id: id.clone() });
        };
        patch.apply(user);
        let updated = user.clone();
        self.adapter.write_users(&users)?;

        debug!(user = %id, "user updated");
        Ok(updated)
    }

    /// Resolve a login email to its user.
    ///
    /// The password is not checked against any stored secret. Every failure
    /// is reported as the same `InvalidCredentials` error.
    pub fn validate_credentials(&self, email: &str, _password: &str) -> CoreResult<User> {
        let email = email.trim();
        self.adapter
            .read_users()?
            .into_iter()
            .find(|u| u.email == email)
            .ok_or(CoreError::InvalidCredentials)
    }
}

fn required(field: &str, value: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidUserData {
            reason: format!("{field} must not be empty"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkbio_store::InMemoryKeyValueStore;

    fn adapter() -> StoreAdapter<InMemoryKeyValueStore> {
        StoreAdapter::new(InMemoryKeyValueStore::new())
    }

    #[test]
    fn create_then_find_by_username() {
        let adapter = adapter();
        let repo = UserRepository::new(&adapter);
        let created = repo.create_user("alice", "alice@x.com", "pw").unwrap();

        let found = repo.find_by_username("alice").unwrap().unwrap();
        assert_eq!(found.username, "alice");
        assert_eq!(found, created);
        assert_eq!(found.display_name, "alice");
        assert!(found.links.is_empty());
    }

    #[test]
    fn duplicate_username_is_rejected_and_store_unchanged() {
        let adapter = adapter();
        let repo = UserRepository::new(&adapter);
        repo.create_user("bob", "bob@x.com", "pw").unwrap();

        let err = repo.create_user("bob", "bob@x.com", "pw").unwrap_err();
        assert!(matches!(err, CoreError::DuplicateUsername { .. }), "got {err}");
        assert_eq!(repo.list_users().unwrap().len(), 1);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let adapter = adapter();
        let repo = UserRepository::new(&adapter);
        repo.create_user("bob", "bob@x.com", "pw").unwrap();

        let err = repo.create_user("robert", "bob@x.com", "pw").unwrap_err();
        assert!(matches!(err, CoreError::DuplicateEmail { .. }), "got {err}");
        assert_eq!(repo.list_users().unwrap().len(), 1);
    }

    #[test]
    fn username_match_is_case_sensitive() {
        let adapter = adapter();
        let repo = UserRepository::new(&adapter);
        repo.create_user("alice", "alice@x.com", "pw").unwrap();
        repo.create_user("Alice", "alice2@x.com", "pw").unwrap();

        assert!(repo.find_by_username("ALICE").unwrap().is_none());
        assert_eq!(repo.list_users().unwrap().len(), 2);
    }

    #[test]
    fn blank_username_is_invalid() {
        let adapter = adapter();
        let repo = UserRepository::new(&adapter);
        let err = repo.create_user("  ", "a@x.com", "pw").unwrap_err();
        assert!(matches!(err, CoreError::InvalidUserData { .. }));
    }

    #[test]
    fn find_by_id() {
        let adapter = adapter();
        let repo = UserRepository::new(&adapter);
        let user = repo.create_user("alice", "alice@x.com", "pw").unwrap();
        assert_eq!(repo.find_by_id(&user.id).unwrap(), Some(user));
        assert!(repo.find_by_id(&UserId::new()).unwrap().is_none());
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let adapter = adapter();
        let repo = UserRepository::new(&adapter);
        let before = repo.create_user("alice", "alice@x.com", "pw").unwrap();

        let patch = UserPatch {
            bio: Some("x".into()),
            ..Default::default()
        };
        let after = repo.update_user(&before.id, patch).unwrap();

        assert_eq!(after.bio, "x");
        assert_eq!(after.id, before.id);
        assert_eq!(after.username, before.username);
        assert_eq!(after.email, before.email);
        assert_eq!(after.display_name, before.display_name);
        assert_eq!(after.profile_picture, before.profile_picture);
        assert_eq!(after.links, before.links);
        assert_eq!(repo.find_by_id(&before.id).unwrap(), Some(after));
    }

    #[test]
    fn update_unknown_user_fails() {
        let adapter = adapter();
        let repo = UserRepository::new(&adapter);
        let err = repo.update_user(&UserId::new(), UserPatch::default()).unwrap_err();
        assert!(matches!(err, CoreError::UserNotFound { .. }));
    }

    #[test]
    fn update_cannot_steal_username_or_email() {
        let adapter = adapter();
        let repo = UserRepository::new(&adapter);
        repo.create_user("alice", "alice@x.com", "pw").unwrap();
        let bob = repo.create_user("bob", "bob@x.com", "pw").unwrap();

        let err = repo
            .update_user(
                &bob.id,
                UserPatch {
                    username: Some("alice".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateUsername { .. }));

        let err = repo
            .update_user(
                &bob.id,
                UserPatch {
                    email: Some("alice@x.com".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateEmail { .. }));
        assert_eq!(repo.get(&bob.id).unwrap(), bob);
    }

    #[test]
    fn update_may_keep_own_username() {
        let adapter = adapter();
        let repo = UserRepository::new(&adapter);
        let alice = repo.create_user("alice", "alice@x.com", "pw").unwrap();
        let patch = UserPatch {
            username: Some("alice".into()),
            display_name: Some("Alice A.".into()),
            ..Default::default()
        };
        let updated = repo.update_user(&alice.id, patch).unwrap();
        assert_eq!(updated.display_name, "Alice A.");
    }

    #[test]
    fn validate_credentials_resolves_email() {
        let adapter = adapter();
        let repo = UserRepository::new(&adapter);
        let alice = repo.create_user("alice", "alice@x.com", "pw").unwrap();
        assert_eq!(repo.validate_credentials("alice@x.com", "pw").unwrap(), alice);
    }

    #[test]
    fn unknown_email_is_invalid_credentials() {
        let adapter = adapter();
        let repo = UserRepository::new(&adapter);
        let err = repo.validate_credentials("nobody@x.com", "pw").unwrap_err();
        assert!(matches!(err, CoreError::InvalidCredentials));
        assert_eq!(err.to_string(), "invalid email or password");
    }
}
