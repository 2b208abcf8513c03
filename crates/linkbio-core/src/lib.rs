//! Linkbio core: users, sessions, and ordered link collections.
//!
//! Provides the state management behind a link-in-bio page. A presentation
//! layer authenticates through the [`SessionManager`], renders public
//! profiles through the [`UserRepository`], and edits links through the
//! [`LinkManager`]. All three read and write through a single
//! [`StoreAdapter`](linkbio_store::StoreAdapter); [`Linkbio`] wires them
//! together over one backend.
//!
//! Every mutation is a read-modify-write of the full user collection, so the
//! last writer wins at collection granularity. There is no cross-process
//! locking.

pub mod config;
pub mod error;
pub mod links;
pub mod linkbio;
pub mod repository;
pub mod session;

pub use config::LinkbioConfig;
pub use error::{CoreError, CoreResult};
pub use links::{LinkManager, MoveDirection};
pub use linkbio::Linkbio;
pub use repository::UserRepository;
pub use session::SessionManager;

// Re-export key types
pub use linkbio_store::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StoreAdapter};
pub use linkbio_types::{Link, LinkId, LinkPatch, NewLink, User, UserId, UserPatch};
