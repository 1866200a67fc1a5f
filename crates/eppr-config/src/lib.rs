//! # eppr-config
//!
//! Layered configuration loading for EPPR using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`EPPR_*` prefix, `__` as separator)
//! 2. Project-level `.eppr/config.toml`
//! 3. User-level `~/.config/eppr/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `EPPR_DATABASE__PATH` -> `database.path` and
//! `EPPR_GENERAL__DEFAULT_LIMIT` -> `general.default_limit`.
//!
//! # Usage
//!
//! ```no_run
//! use eppr_config::EpprConfig;
//!
//! let config = EpprConfig::load_with_dotenv().expect("config");
//! println!("store: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;

pub use database::{DEFAULT_DB_PATH, DatabaseConfig};
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EpprConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl EpprConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.database.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support from the working directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".eppr/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("EPPR_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("eppr").join("config.toml"))
    }
}
