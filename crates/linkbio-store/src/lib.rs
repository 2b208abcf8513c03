//! Synchronous key-value persistence for Linkbio.
//!
//! Linkbio keeps its entire state under two logical keys of a byte-valued
//! key-value store, the way a browser app keeps state in local storage:
//!
//! - `users` — a JSON array of every [`User`](linkbio_types::User) record
//! - `current_user` — the bare id of the logged-in user, absent when there
//!   is no session
//!
//! # Storage Backends
//!
//! All backends implement the [`KeyValueStore`] trait:
//!
//! - [`InMemoryKeyValueStore`] — `HashMap`-based store for tests and embedding
//! - [`FileKeyValueStore`] — one file per key, replaced atomically on write
//!
//! [`StoreAdapter`] layers the two logical keys on top of any backend.
//!
//! # Design Rules
//!
//! 1. Every write fully overwrites the previous value of its key.
//! 2. A write is visible to every subsequent read through the same store.
//! 3. No partially written value is ever observable.
//! 4. "No session" is represented by the absence of `current_user`, never
//!    by an empty or sentinel value.

pub mod adapter;
pub mod error;
pub mod file;
pub mod keys;
pub mod memory;
pub mod traits;

pub use adapter::{StoreAdapter, CURRENT_USER_KEY, USERS_KEY};
pub use error::{StoreError, StoreResult};
pub use file::FileKeyValueStore;
pub use keys::validate_key;
pub use memory::InMemoryKeyValueStore;
pub use traits::KeyValueStore;
