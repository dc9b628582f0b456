//! Collaborator layer: where snapshots come from.
//!
//! The engine in [`crate::services`] is pure. Everything that talks to the
//! outside world (wallet holdings, the collection catalog, the event list,
//! the admin display policy, global mint counts) sits behind the
//! [`SnapshotRepository`] trait defined here.
//!
//! - `repository`: the trait and its error type
//! - `repositories::local`: in-memory backend for tests and offline runs
//! - `factory`: backend selection from env or config
//! - `services`: snapshot assembly, degrading failed fetches to defaults
//!
//! # Usage
//!
//! ```no_run
//! use mintscope::db::{services, RepositoryFactory, RepositoryType};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::create(RepositoryType::Local)?;
//!     let snapshot = services::load_snapshot(repo.as_ref(), "0xwallet").await;
//!     println!("{} assets", snapshot.assets.len());
//!     Ok(())
//! }
//! ```

pub mod factory;
pub mod repositories;
pub mod repository;
pub mod services;


// ==================== Loading ====================

pub use services::{
    health_check, load_activity_stats, load_calendar_projection, load_snapshot,
    load_snapshot_filtered,
};

// ==================== Backends ====================

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::{LocalOperation, LocalRepository};
pub use repository::{ErrorContext, RepositoryError, RepositoryResult, SnapshotRepository};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Process-wide backend, set at most once.
static REPOSITORY: OnceLock<Arc<dyn SnapshotRepository>> = OnceLock::new();

/// Install the backend named by `REPOSITORY_TYPE`, unless one is already set.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo_type = RepositoryType::from_env();
    let repo = RepositoryFactory::create(repo_type).context("building repository from REPOSITORY_TYPE")?;
    if REPOSITORY.set(repo).is_ok() {
        log::info!("Initialized {:?} repository", repo_type);
    }
    Ok(())
}

/// Install `repo` as the process-wide backend; fails if one is already set.
pub fn install_repository(repo: Arc<dyn SnapshotRepository>) -> Result<()> {
    REPOSITORY
        .set(repo)
        .map_err(|_| anyhow::anyhow!("Repository already initialized"))
}

/// The process-wide backend, installing the env-selected one on first use.
pub fn get_repository() -> Result<&'static Arc<dyn SnapshotRepository>> {
    if REPOSITORY.get().is_none() {
        init_repository()?;
    }

    REPOSITORY
        .get()
        .context("repository slot empty after initialization")
}
