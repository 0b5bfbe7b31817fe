//! # sim-config
//!
//! Layered configuration loading for simdesk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SIMDESK_*` prefix, `__` as separator)
//! 2. Project-level `.simdesk/config.toml`
//! 3. User-level `~/.config/simdesk/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SIMDESK_DATABASE__URL` -> `database.url`,
//! `SIMDESK_GENERAL__DEFAULT_PER_PAGE` -> `general.default_per_page`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use sim_config::SimConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = SimConfig::load_with_dotenv().expect("config");
//!
//! // Or without dotenvy (env vars must already be set):
//! let config = SimConfig::load().expect("config");
//!
//! if config.database.is_remote() {
//!     println!("Remote database: {}", config.database.url);
//! }
//! ```

mod database;
mod error;
mod general;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SimConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SimConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`SimConfig::load_with_dotenv`] if you
    /// need `.env` file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`SIMDESK_*` prefix)
    /// 2. `.simdesk/config.toml` (project-local)
    /// 3. `~/.config/simdesk/config.toml` (user-global)
    /// 4. Default values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if extraction fails and
    /// `ConfigError::InvalidValue` if a loaded value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for composition
    /// roots and tests.
    ///
    /// # Errors
    ///
    /// Same as [`SimConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".simdesk/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("SIMDESK_").split("__"));

        figment
    }

    /// Reject values a later layer cannot sensibly consume.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when `general.default_per_page`
    /// is zero or when exactly one of `database.url` / `database.auth_token`
    /// is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.default_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_per_page".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.database.url.is_empty() != self.database.auth_token.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.url".to_string(),
                reason: "remote mode requires both url and auth_token".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("simdesk").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        // In tests/build: CARGO_MANIFEST_DIR points to the crate dir.
        // Walk up to find workspace root's .env.
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}
