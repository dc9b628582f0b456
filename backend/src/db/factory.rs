//! Picks a [`SnapshotRepository`] backend from the environment or a
//! `mintscope.toml` file.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
use super::repository::{RepositoryError, RepositoryResult, SnapshotRepository};
use crate::config::EngineConfig;

/// Backends this crate can build on its own.
///
/// Network-backed repositories live outside this crate and are injected
/// directly as `Arc<dyn SnapshotRepository>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RepositoryType {
    /// [`LocalRepository`], everything in memory.
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Case-insensitive; `local`, `memory` and `in-memory` are synonyms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" | "in-memory" => Ok(Self::Local),
            other => Err(format!("unsupported repository backend '{}'", other)),
        }
    }
}

impl RepositoryType {
    /// Reads `REPOSITORY_TYPE`; unknown or missing values fall back to `Local`.
    pub fn from_env() -> Self {
        match std::env::var("REPOSITORY_TYPE") {
            Ok(val) => val.parse().unwrap_or_else(|err| {
                log::warn!("{}; falling back to local repository", err);
                Self::Local
            }),
            Err(_) => Self::Local,
        }
    }
}

/// Builds shared repository handles.
///
/// # Example
/// ```
/// use mintscope::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Local).unwrap();
/// # let _ = repo;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Build the backend named by `repo_type`.
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn SnapshotRepository>> {
        let repo = match repo_type {
            RepositoryType::Local => Self::create_local(),
        };
        Ok(repo)
    }

    /// Empty in-memory backend.
    pub fn create_local() -> Arc<dyn SnapshotRepository> {
        Arc::new(LocalRepository::default())
    }

    /// Backend named by `REPOSITORY_TYPE`.
    pub fn from_env() -> RepositoryResult<Arc<dyn SnapshotRepository>> {
        Self::create(RepositoryType::from_env())
    }

    /// Backend named by the `[repository]` table of an engine config.
    pub fn from_engine_config(config: &EngineConfig) -> RepositoryResult<Arc<dyn SnapshotRepository>> {
        let repo_type = config
            .repository
            .repo_type
            .parse::<RepositoryType>()
            .map_err(RepositoryError::configuration)?;
        Self::create(repo_type)
    }

    /// Backend named by a `mintscope.toml` file.
    ///
    /// Unreadable files and unknown backend names both surface as
    /// [`RepositoryError::Configuration`].
    pub fn from_config_file(path: impl AsRef<Path>) -> RepositoryResult<Arc<dyn SnapshotRepository>> {
        let config = EngineConfig::from_file(path)
            .map_err(|e| RepositoryError::configuration(e.to_string()))?;
        Self::from_engine_config(&config)
    }
}
