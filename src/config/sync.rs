use serde::{Deserialize, Serialize};

use crate::{catalog::MODELS_DEV_API_URL, sync::SyncOptions};

/// Catalog sync configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// URL to fetch the catalog from.
    #[serde(default = "default_catalog_api_url")]
    pub api_url: String,

    /// Upstream provider ids to write. Empty writes every provider.
    #[serde(default)]
    pub providers: Vec<String>,

    /// Apply slim mode by default. The `--slim` flag forces it on.
    #[serde(default)]
    pub slim: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_url: default_catalog_api_url(),
            providers: Vec::new(),
            slim: false,
        }
    }
}

fn default_catalog_api_url() -> String {
    MODELS_DEV_API_URL.to_string()
}

impl SyncConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.is_empty() {
            return Err("sync.api_url must not be empty".into());
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(format!(
                "sync.api_url must be an http(s) URL, got '{}'",
                self.api_url
            ));
        }
        if self.providers.iter().any(|p| p.trim().is_empty()) {
            return Err("sync.providers must not contain empty ids".into());
        }
        Ok(())
    }

    /// Options for a sync run; `slim_flag` enables slim mode on top of the config.
    pub fn to_options(&self, slim_flag: bool) -> SyncOptions {
        SyncOptions {
            api_url: self.api_url.clone(),
            slim: self.slim || slim_flag,
            providers: self.providers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slim_flag_forces_slim() {
        let config = SyncConfig::default();
        assert!(!config.to_options(false).slim);
        assert!(config.to_options(true).slim);

        let config = SyncConfig {
            slim: true,
            ..Default::default()
        };
        assert!(config.to_options(false).slim);
    }

    #[test]
    fn test_validate_rejects_empty_provider_id() {
        let config = SyncConfig {
            providers: vec!["openai".into(), " ".into()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let config = SyncConfig {
            api_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(SyncConfig::default().validate().is_ok());
    }
}
