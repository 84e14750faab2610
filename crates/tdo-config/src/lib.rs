//! # tdo-config
//!
//! Layered configuration loading for tdo using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. `TODOIST_API_TOKEN` (the API token only)
//! 2. Environment variables (`TDO_*` prefix, `__` as separator)
//! 3. Project-level `.tdo/config.toml`
//! 4. User-level `~/.config/tdo/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TDO_API__TIMEOUT_SECS` -> `api.timeout_secs`,
//! `TDO_GENERAL__DEFAULT_FORMAT` -> `general.default_format`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tdo_config::TdoConfig;
//!
//! let config = TdoConfig::load_with_dotenv().expect("config");
//! let settings = config.settings().expect("token must be set");
//! println!("REST endpoint: {}", settings.api.rest_base_url);
//! ```

mod api;
mod error;
mod general;

pub use api::{ApiConfig, ApiSettings, DEFAULT_REST_BASE_URL, DEFAULT_SYNC_BASE_URL};
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "TODOIST_API_TOKEN";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TdoConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Everything a network command needs, validated once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub general: GeneralConfig,
}

impl TdoConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`TdoConfig::load_with_dotenv`] if you
    /// need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".tdo/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables
        figment = figment.merge(Env::prefixed("TDO_").split("__"));

        // Layer 4: The conventional token variable (highest priority)
        figment.merge(
            Env::raw()
                .only(&[TOKEN_ENV_VAR])
                .map(|_| "api.token".into()),
        )
    }

    /// Validate the loaded configuration for commands that talk to the API.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingCredential`] without a token,
    /// [`ConfigError::InvalidValue`] for malformed values.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        self.general.validate()?;
        Ok(Settings {
            api: self.api.settings()?,
            general: self.general.clone(),
        })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tdo").join("config.toml"))
    }
}
