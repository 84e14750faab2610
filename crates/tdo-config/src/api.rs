//! Task service API configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_REST_BASE_URL: &str = "https://api.todoist.com/rest/v2";
pub const DEFAULT_SYNC_BASE_URL: &str = "https://api.todoist.com/sync/v9";

fn default_rest_base_url() -> String {
    DEFAULT_REST_BASE_URL.to_string()
}

fn default_sync_base_url() -> String {
    DEFAULT_SYNC_BASE_URL.to_string()
}

/// Default per-request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

/// Default number of retries after a transient failure.
const fn default_max_retries() -> u32 {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Personal API token. Usually supplied through `TODOIST_API_TOKEN`.
    #[serde(default)]
    pub token: String,

    /// Base URL of the REST read endpoints.
    #[serde(default = "default_rest_base_url")]
    pub rest_base_url: String,

    /// Base URL of the sync command endpoint.
    #[serde(default = "default_sync_base_url")]
    pub sync_base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after a timeout, connection error, 429, or 5xx. `0` disables.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            rest_base_url: default_rest_base_url(),
            sync_base_url: default_sync_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl ApiConfig {
    /// Check if a token is present.
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Validate into the immutable settings the HTTP client is built from.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingCredential`] without a token,
    /// [`ConfigError::InvalidValue`] for a non-http base URL or a zero timeout.
    pub fn settings(&self) -> Result<ApiSettings, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::MissingCredential);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }

        Ok(ApiSettings {
            token: self.token.trim().to_string(),
            rest_base_url: validate_base_url("api.rest_base_url", &self.rest_base_url)?,
            sync_base_url: validate_base_url("api.sync_base_url", &self.sync_base_url)?,
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
        })
    }
}

fn validate_base_url(field: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.into(),
            reason: format!("'{raw}' is not an http(s) URL"),
        })
    }
}

/// Validated, immutable API settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub token: String,
    /// Without trailing slash.
    pub rest_base_url: String,
    /// Without trailing slash.
    pub sync_base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("token", &"<redacted>")
            .field("rest_base_url", &self.rest_base_url)
            .field("sync_base_url", &self.sync_base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}
