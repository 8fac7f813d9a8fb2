//! Configuration management for ChatVault
//!
//! This module handles loading, parsing, and validating configuration
//! from a YAML file, environment variables, and CLI overrides.

use crate::error::{Result, StoreError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
///
/// Takes precedence over both the config file and the platform default,
/// which makes it easy to point the binary at a test directory without
/// touching the user's application data.
pub const DATA_DIR_ENV: &str = "CHATVAULT_DATA_DIR";

/// Main configuration structure for ChatVault
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage location settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Session behavior settings
    #[serde(default)]
    pub session: SessionConfig,
}

/// Storage location configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding both backend stores
    ///
    /// Defaults to the platform data directory when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Session behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Assistant greeting seeded into every new session
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

fn default_greeting() -> String {
    crate::session::DEFAULT_GREETING.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults when no file exists
    pub fn load(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Ok(Self::default())
        }
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| StoreError::Config(format!("Failed to parse config: {}", e)).into())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.session.greeting.trim().is_empty() {
            return Err(StoreError::Config("greeting cannot be empty".to_string()).into());
        }

        Ok(())
    }

    /// Resolve the data directory for both storage backends
    ///
    /// Resolution order: `CHATVAULT_DATA_DIR`, then the config file, then
    /// the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::BackendUnavailable` when the platform exposes
    /// no data directory and no override is set.
    pub fn data_dir(&self) -> std::result::Result<PathBuf, StoreError> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }

        ProjectDirs::from("com", "chatvault", "chatvault")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                StoreError::BackendUnavailable("Could not determine data directory".to_string())
            })
    }

    /// Path of the primary (SQLite) database file
    pub fn primary_db_path(&self) -> std::result::Result<PathBuf, StoreError> {
        Ok(self.data_dir()?.join("sessions.db"))
    }

    /// Path of the fallback (sled) store directory
    pub fn fallback_db_path(&self) -> std::result::Result<PathBuf, StoreError> {
        Ok(self.data_dir()?.join("fallback-kv"))
    }
}
