//! Translator configuration.
//!
//! Loaded from a JSON file. Every field has a default, so an empty object
//! (or no file at all) is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::acl::DEFAULT_ARTIFICIAL_PREFIX;

/// Levels accepted by `log_level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Settings of the translator and the `acl-translate` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Prefix of names invented for ACLs and entries read from the dataplane
    /// without a stored name.
    #[serde(default = "default_artificial_name_prefix")]
    pub artificial_name_prefix: String,

    /// Log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_artificial_name_prefix() -> String {
    DEFAULT_ARTIFICIAL_PREFIX.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            artificial_name_prefix: default_artificial_name_prefix(),
            log_level: default_log_level(),
            pretty: default_pretty(),
        }
    }
}

impl TranslatorConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.artificial_name_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "artificial_name_prefix must not be empty".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "log_level must be one of {}, got {}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        Ok(())
    }
}
