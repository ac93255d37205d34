//! Configuration for the store tools.
//!
//! Configuration is an optional TOML file. Every field has a default, so an
//! empty file (or no file at all) syncs every models.dev provider into the
//! current directory.
//!
//! # Example
//!
//! ```toml
//! root = "data"
//!
//! [sync]
//! providers = ["anthropic", "openai"]
//! slim = true
//!
//! [observability.logging]
//! level = "debug"
//! format = "json"
//! ```

mod observability;
mod sync;

use std::path::{Path, PathBuf};

pub use observability::*;
use serde::{Deserialize, Serialize};
pub use sync::*;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "modelstore.toml";

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Data store root containing `providers/`, `aliases/` and `index.json`.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Catalog sync settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Observability configuration (logging).
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            sync: SyncConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

impl StoreConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e, path.as_ref().to_path_buf()))?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration to use.
    ///
    /// An explicit path must exist. Without one, `modelstore.toml` in the
    /// working directory is used if present, otherwise defaults apply.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let cwd_config = PathBuf::from(DEFAULT_CONFIG_FILE);
        if cwd_config.exists() {
            return Self::from_file(cwd_config);
        }

        Ok(Self::default())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.sync.validate().map_err(ConfigError::Validation)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {1}: {0}")]
    Io(std::io::Error, std::path::PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::catalog::MODELS_DEV_API_URL;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = StoreConfig::from_str("").unwrap();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.sync.api_url, MODELS_DEV_API_URL);
        assert!(!config.sync.slim);
        assert!(config.sync.providers.is_empty());
        assert_eq!(config.observability.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_full_config() {
        let config = StoreConfig::from_str(
            r#"
            root = "data"

            [sync]
            api_url = "http://localhost:9000/api.json"
            providers = ["anthropic", "openai"]
            slim = true

            [observability.logging]
            level = "debug"
            format = "json"
            timestamps = false
            filter = "reqwest=info"
        "#,
        )
        .unwrap();

        assert_eq!(config.root, PathBuf::from("data"));
        assert_eq!(config.sync.providers, vec!["anthropic", "openai"]);
        assert!(config.sync.slim);
        assert_eq!(config.observability.logging.format, LogFormat::Json);
        assert!(!config.observability.logging.timestamps);
        assert_eq!(
            config.observability.logging.filter.as_deref(),
            Some("reqwest=info")
        );
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = StoreConfig::from_str("unknown = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_surfaces() {
        let err = StoreConfig::from_str(
            r#"
            [sync]
            api_url = "ftp://example.com/api.json"
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("modelstore.toml");
        std::fs::write(&path, "[sync]\nslim = true\n").unwrap();

        let config = StoreConfig::load(Some(&path)).unwrap();
        assert!(config.sync.slim);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = StoreConfig::load(Some(&temp.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_, _)));
    }
}
