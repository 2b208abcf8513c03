//! The [`KeyValueStore`] trait defining the persistence interface.
//!
//! Any backend (in-memory, filesystem, browser storage bridge) implements
//! this trait to hold Linkbio's persisted state.

use crate::error::StoreResult;

/// Synchronous byte-valued key-value store.
///
/// Implementations must be thread-safe (`Send + Sync`) and must make each
/// call atomic from the caller's perspective: a `set` either fully replaces
/// the value or leaves the previous value in place, and a completed write is
/// visible to every subsequent `get`.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Create or overwrite the value stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Delete `key`.
    ///
    /// Returns `Ok(true)` if the key existed and was removed, `Ok(false)` if
    /// it did not exist.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    /// Check whether `key` exists.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        (**self).contains(key)
    }
}
