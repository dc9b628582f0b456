//! Repository traits and error types for the collaborator layer.

pub mod error;
pub mod snapshot;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use snapshot::SnapshotRepository;
