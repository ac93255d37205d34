//! Type definitions for the upstream models.dev catalog.
//!
//! Only the fields the sync tool reads are modelled; anything else in the
//! upstream payload is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The complete upstream catalog, mapping provider IDs to provider definitions.
pub type ModelCatalog = HashMap<String, CatalogProvider>;

/// A provider in the catalog with its models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProvider {
    /// Provider identifier (e.g., "anthropic", "openai")
    pub id: String,

    /// Human-readable provider name
    pub name: String,

    /// API base URL
    #[serde(default)]
    pub api: Option<String>,

    /// SDK package implementing the provider
    #[serde(default)]
    pub npm: Option<String>,

    /// Documentation URL
    #[serde(default)]
    pub doc: Option<String>,

    /// Models provided by this provider, keyed by model ID
    #[serde(default)]
    pub models: HashMap<String, CatalogModel>,
}

/// A model in the catalog with its capabilities and pricing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogModel {
    /// Model identifier (e.g., "claude-opus-4-5"). Empty when upstream omits it.
    #[serde(default)]
    pub id: String,

    /// Human-readable model name
    #[serde(default)]
    pub name: String,

    /// Model family (e.g., "claude-opus", "gpt-4")
    #[serde(default)]
    pub family: Option<String>,

    /// Whether the model supports image/file attachments
    #[serde(default)]
    pub attachment: bool,

    /// Whether the model supports reasoning/thinking mode
    #[serde(default)]
    pub reasoning: bool,

    /// Whether the model supports tool/function calling
    #[serde(default)]
    pub tool_call: bool,

    /// Model release date (YYYY-MM-DD format)
    #[serde(default)]
    pub release_date: Option<String>,

    /// Lifecycle status (e.g., "beta", "deprecated")
    #[serde(default)]
    pub status: Option<String>,

    /// Input modalities
    #[serde(default)]
    pub modalities: CatalogModalities,

    /// Pricing information (dollars per 1M tokens). `None` when upstream has no cost block.
    #[serde(default)]
    pub cost: Option<CatalogCost>,

    /// Context and output limits
    #[serde(default)]
    pub limit: Option<CatalogLimit>,
}

/// Input modalities for a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogModalities {
    /// Supported input modalities (e.g., "text", "image", "audio", "video", "pdf")
    #[serde(default)]
    pub input: Vec<String>,
}

/// Pricing information in dollars per 1M tokens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogCost {
    /// Input token cost ($/1M tokens)
    #[serde(default)]
    pub input: f64,

    /// Output token cost ($/1M tokens)
    #[serde(default)]
    pub output: f64,

    /// Cache read cost ($/1M tokens)
    #[serde(default)]
    pub cache_read: Option<f64>,

    /// Cache write cost ($/1M tokens)
    #[serde(default)]
    pub cache_write: Option<f64>,
}

/// Context and output limits for a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogLimit {
    /// Maximum context window size (tokens)
    #[serde(default)]
    pub context: Option<u64>,

    /// Maximum output tokens
    #[serde(default)]
    pub output: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_provider() {
        let json = r#"{
            "id": "anthropic",
            "name": "Anthropic",
            "npm": "@ai-sdk/anthropic",
            "doc": "https://docs.anthropic.com",
            "env": ["ANTHROPIC_API_KEY"],
            "models": {}
        }"#;

        let provider: CatalogProvider = serde_json::from_str(json).unwrap();
        assert_eq!(provider.id, "anthropic");
        assert_eq!(provider.name, "Anthropic");
        assert_eq!(provider.npm.as_deref(), Some("@ai-sdk/anthropic"));
        assert!(provider.api.is_none());
    }

    #[test]
    fn test_parse_catalog_model() {
        let json = r#"{
            "id": "claude-opus-4-5",
            "name": "Claude Opus 4.5",
            "family": "claude-opus",
            "attachment": true,
            "reasoning": true,
            "tool_call": true,
            "temperature": true,
            "knowledge": "2025-03-31",
            "release_date": "2025-11-24",
            "modalities": {
                "input": ["text", "image", "pdf"],
                "output": ["text"]
            },
            "cost": {
                "input": 5.0,
                "output": 25.0,
                "cache_read": 0.5,
                "cache_write": 6.25
            },
            "limit": {
                "context": 200000,
                "output": 64000
            }
        }"#;

        let model: CatalogModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.id, "claude-opus-4-5");
        assert_eq!(model.family.as_deref(), Some("claude-opus"));
        assert!(model.attachment);
        assert!(model.tool_call);
        assert!(model.status.is_none());
        let cost = model.cost.unwrap();
        assert_eq!(cost.input, 5.0);
        assert_eq!(cost.cache_write, Some(6.25));
        let limit = model.limit.unwrap();
        assert_eq!(limit.context, Some(200000));
        assert_eq!(limit.output, Some(64000));
        assert_eq!(model.modalities.input, vec!["text", "image", "pdf"]);
    }

    #[test]
    fn test_parse_model_with_missing_fields() {
        let json = r#"{
            "id": "test-model",
            "name": "Test Model"
        }"#;

        let model: CatalogModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.id, "test-model");
        assert!(!model.attachment);
        assert!(model.family.is_none());
        // Absent blocks stay absent rather than defaulting to zeros
        assert!(model.cost.is_none());
        assert!(model.limit.is_none());
    }
}
