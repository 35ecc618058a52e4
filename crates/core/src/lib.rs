//! Domain logic for the Signworks backend.
//!
//! Everything in this crate is pure computation over in-memory data:
//! category hierarchy resolution, project image reconciliation, slug
//! generation, and the upload image transform. All I/O (database, object
//! store, HTTP) lives in the sibling crates.

pub mod category;
pub mod error;
pub mod media;
pub mod reconcile;
pub mod slug;
pub mod types;
