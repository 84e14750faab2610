//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default result limit.
const fn default_limit() -> u32 {
    50
}

fn default_format() -> String {
    String::from("text")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list/search commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Output format when `--format` is not given: `text` or `json`.
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_format: default_format(),
        }
    }
}

impl GeneralConfig {
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for an unknown format or a zero limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.default_format.as_str(), "text" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "general.default_format".into(),
                reason: format!("'{}' is not one of: text, json", self.default_format),
            });
        }
        if self.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 50);
        assert_eq!(config.default_format, "text");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_format() {
        let config = GeneralConfig {
            default_format: "yaml".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
