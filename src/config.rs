//! Ledger runtime configuration.
//!
//! Loaded from a TOML file; every field has a default so a partial (or missing) file is fine.
//!
//! ```toml
//! channel_buffer = 64
//! sale_marker = "Sale"
//! log_filter = "stock_ledger=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable naming the config file read by [`LedgerConfig::from_env`].
pub const CONFIG_PATH_ENV: &str = "STOCK_LEDGER_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "stock_ledger.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerConfig {
    /// Capacity of the ledger actor's request channel.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer: usize,

    /// Prefix of `notes` that marks an OUT transaction as a sale.
    #[serde(default = "default_sale_marker")]
    pub sale_marker: String,

    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_channel_buffer() -> usize {
    32
}

fn default_sale_marker() -> String {
    "Sale".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            channel_buffer: default_channel_buffer(),
            sale_marker: default_sale_marker(),
            log_filter: default_log_filter(),
        }
    }
}

impl LedgerConfig {
    /// Parse from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects a blank `sale_marker`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sale_marker.trim().is_empty() {
            return Err(ConfigError::Invalid("sale_marker must not be blank".into()));
        }
        Ok(())
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load from the path in `STOCK_LEDGER_CONFIG` (or `stock_ledger.toml`), falling back to
    /// defaults when it cannot be read.
    pub fn from_env() -> Self {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Using default ledger config ({}): {}", path, e);
            Self::default()
        })
    }
}
