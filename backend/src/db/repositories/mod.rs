//! Concrete [`SnapshotRepository`](super::repository::SnapshotRepository) implementations.
//!
//! Only the in-memory backend ships with the crate; chain RPC and catalog
//! service clients implement the trait in the embedding application.

pub mod local;

pub use local::{LocalOperation, LocalRepository};
