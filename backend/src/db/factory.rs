//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating record sources based on runtime
//! configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use super::repositories::{JsonFileRepository, LocalRepository};
use super::repository::{ContentRepository, RepositoryError, RepositoryResult};
use crate::config::{AnalyticsConfig, RECORDS_FILE_ENV};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
    /// JSON file on disk
    File,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("local", "file" or "json").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            "file" | "json" => Ok(Self::File),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Without it, defaults to File when
    /// `RECORDS_FILE` is present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var(RECORDS_FILE_ENV).is_ok() {
            Self::File
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating record source instances.
///
/// # Example
/// ```
/// use creator_analytics::db::{RepositoryFactory, RepositoryType};
///
/// let local = RepositoryFactory::create(RepositoryType::Local, None).unwrap();
/// let missing = RepositoryFactory::create(RepositoryType::File, None);
/// assert!(missing.is_err());
/// # let _ = local;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `file_path` - Records file (required for `File`)
    pub fn create(
        repo_type: RepositoryType,
        file_path: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn ContentRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::File => {
                let path = file_path.ok_or_else(|| {
                    RepositoryError::configuration("File repository requires a records file path")
                })?;
                Ok(Self::create_json_file(path))
            }
        }
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn ContentRepository> {
        Arc::new(LocalRepository::new())
    }

    pub fn create_json_file(path: impl Into<PathBuf>) -> Arc<dyn ContentRepository> {
        Arc::new(JsonFileRepository::new(path))
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` and `RECORDS_FILE`.
    pub fn from_env() -> RepositoryResult<Arc<dyn ContentRepository>> {
        let path = std::env::var(RECORDS_FILE_ENV).ok().map(PathBuf::from);
        Self::create(RepositoryType::from_env(), path.as_deref())
    }

    /// Create repository from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn ContentRepository>> {
        let config = AnalyticsConfig::from_file(config_path)?;
        Self::from_config(&config)
    }

    /// Create repository from an already loaded configuration.
    pub fn from_config(config: &AnalyticsConfig) -> RepositoryResult<Arc<dyn ContentRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        log::info!("Creating {:?} repository", repo_type);
        Self::create(repo_type, config.file.path.as_deref())
    }
}
