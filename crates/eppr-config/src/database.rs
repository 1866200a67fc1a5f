//! Store location configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Default store file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "db/eppr.db";

fn default_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL store file. Created on provisioning if absent.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// The configured store path.
    #[must_use]
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }

    /// Reject values that can never name a store file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty or whitespace-only path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
