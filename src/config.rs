//! Board configuration loaded from TOML.
//!
//! Every key is optional; missing keys fall back to compiled defaults.
//!
//! ```toml
//! [store]
//! position_column = true
//! owner_column = true
//!
//! [storage]
//! group_order_prefix = "groupOrder_"
//! auth_intent_key = "auth_trigger"
//! ```

use crate::board::domain::StoreCapabilities;
use crate::board::services::DEFAULT_GROUP_ORDER_PREFIX;
use camino::{Utf8Path, Utf8PathBuf};

/// Default client-local key of the auth intent flag.
pub const DEFAULT_AUTH_INTENT_KEY: &str = "auth_trigger";

/// Errors that can occur when loading board configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

/// `[storage]` section: client-local key names.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Prefix of the per-identity group order key.
    pub group_order_prefix: String,
    /// Key of the auth intent flag.
    pub auth_intent_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            group_order_prefix: DEFAULT_GROUP_ORDER_PREFIX.to_owned(),
            auth_intent_key: DEFAULT_AUTH_INTENT_KEY.to_owned(),
        }
    }
}

/// Fully resolved board configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Optional row-store columns.
    pub store: StoreCapabilities,
    /// Client-local storage keys.
    pub storage: StorageConfig,
}

impl BoardConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseToml`] for malformed TOML or mistyped
    /// values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::ReadFile {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}
