//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// No API token in the environment or any config file.
    #[error(
        "No API token configured. Set TODOIST_API_TOKEN (or TDO_API__TOKEN, or `token` under [api] in .tdo/config.toml)"
    )]
    MissingCredential,

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

