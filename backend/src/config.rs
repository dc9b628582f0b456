//! Engine configuration file support.
//!
//! This module provides utilities for reading engine configuration from
//! TOML configuration files. Every field has a default, so an empty file
//! (or no file at all) yields the documented behaviour.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::DatePolicy;
use crate::services::buckets::{
    BucketWindows, MAX_DAILY_DAYS, MAX_MONTHLY_MONTHS, MAX_WEEKLY_WEEKS,
};

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No mintscope.toml found in standard locations")]
    NotFound,
}

/// Engine configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub buckets: BucketWindows,
    #[serde(default)]
    pub dates: DatePolicy,
    #[serde(default)]
    pub repository: RepositorySettings,
}

/// Collaborator backend selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

fn default_repo_type() -> String {
    "local".to_string()
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

impl EngineConfig {
    /// Load engine configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(EngineConfig)` if the file parses and validates
    /// * `Err(ConfigError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load engine configuration from the default location.
    ///
    /// Searches for `mintscope.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("mintscope.toml"),
            PathBuf::from("backend/mintscope.toml"),
            PathBuf::from("../mintscope.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading engine configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Reject windows that are empty or longer than the bucketizer supports.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = &self.buckets;
        let checks = [
            ("daily_days", windows.daily_days, MAX_DAILY_DAYS),
            ("weekly_weeks", windows.weekly_weeks, MAX_WEEKLY_WEEKS),
            ("monthly_months", windows.monthly_months, MAX_MONTHLY_MONTHS),
        ];
        for (name, value, max) in checks {
            if value == 0 || value > max {
                return Err(ConfigError::Invalid(format!(
                    "buckets.{} must be between 1 and {}, got {}",
                    name, max, value
                )));
            }
        }
        Ok(())
    }
}
