//! In-memory key-value store for testing and ephemeral use.
//!
//! [`InMemoryKeyValueStore`] stores all values in a `HashMap` protected by a
//! `RwLock`. It implements the full [`KeyValueStore`] trait and is the
//! injectable substitute for persistent storage in tests.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::keys::validate_key;
use crate::traits::KeyValueStore;

/// An in-memory implementation of [`KeyValueStore`].
///
/// Data is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryKeyValueStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read_entries()?.len())
    }

    /// Returns `true` if no key is stored.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read_entries()?.is_empty())
    }

    /// Sorted list of all stored keys.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.read_entries()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn read_entries(
        &self,
    ) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write_entries(
        &self,
    ) -> StoreResult<std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        validate_key(key)?;
        self.write_entries()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        Ok(self.write_entries()?.remove(key).is_some())
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        Ok(self.read_entries()?.contains_key(key))
    }
}
