//! Foundation types for Linkbio.
//!
//! This crate provides the records persisted by the Linkbio core and the
//! partial-update types used to mutate them. Every other Linkbio crate
//! depends on `linkbio-types`.
//!
//! # Key Types
//!
//! - [`UserId`] / [`LinkId`] — Opaque time-ordered identifiers (UUID v7)
//! - [`User`] — A profile owning an ordered collection of links
//! - [`Link`] — A single outbound link with its order index
//! - [`UserPatch`] / [`LinkPatch`] — Field-wise partial updates
//! - [`NewLink`] — Validated input for appending a link

pub mod error;
pub mod ids;
pub mod link;
pub mod user;

pub use error::TypeError;
pub use ids::{LinkId, UserId};
pub use link::{normalize_url, validate_title, validate_url, Link, LinkPatch, NewLink};
pub use user::{User, UserPatch};
