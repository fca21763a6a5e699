//! Configuration for the delivery ledger.
//!
//! Supports a YAML file and environment variable overrides.

use serde::Deserialize;
use std::path::Path;

/// Service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Order lifecycle options.
    pub lifecycle: LifecycleConfig,
    /// Logging options.
    pub logging: LoggingConfig,
}

/// Order lifecycle options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Require the admin capability for privileged operations.
    pub admin_gated: bool,
    /// Delete an order's menu items once the order is completed.
    pub consume_menu_items: bool,
}

/// Logging options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file
    /// 3. Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("FOOD_LEDGER_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(gated) = env_flag("FOOD_LEDGER_ADMIN_GATED")? {
            self.lifecycle.admin_gated = gated;
        }

        if let Some(consume) = env_flag("FOOD_LEDGER_CONSUME_MENU_ITEMS")? {
            self.lifecycle.consume_menu_items = consume;
        }

        if let Ok(filter) = std::env::var("FOOD_LEDGER_LOG") {
            self.logging.filter = filter;
        }

        Ok(())
    }
}

fn env_flag(name: &str) -> Result<Option<bool>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name.to_string(), value)),
        Err(_) => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    FileRead(String, String),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
