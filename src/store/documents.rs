//! Document types written to and read from the data store.

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::CATALOG_SOURCE;

/// `$schema` pointer embedded in every provider document.
pub const MODEL_SCHEMA_POINTER: &str = "../schema/model.schema.json";

/// Schema version recorded in the index document.
pub const INDEX_SCHEMA_VERSION: &str = "1.0.0";

/// Currency code for all pricing figures.
pub const PRICING_CURRENCY: &str = "USD";

/// Default lifecycle status when upstream omits one.
pub const DEFAULT_STATUS: &str = "active";

/// A coarse cost/capability classification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Small, cost-optimized variants.
    Mini,
    /// General-purpose models.
    #[default]
    Pro,
    /// Flagship models.
    Max,
}

impl Tier {
    /// All tiers, in the order their names are accepted by the validator.
    pub const ALL: [Tier; 3] = [Tier::Mini, Tier::Pro, Tier::Max];

    /// Sort rank used when choosing family representatives: max < pro < mini.
    pub fn rank(self) -> u8 {
        match self {
            Tier::Max => 0,
            Tier::Pro => 1,
            Tier::Mini => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Mini => "mini",
            Tier::Pro => "pro",
            Tier::Max => "max",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean capability flags for a model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub vision: bool,
    #[serde(default)]
    pub tools: bool,
    #[serde(default)]
    pub streaming: bool,
    #[serde(default)]
    pub json_mode: bool,
    #[serde(default)]
    pub function_calling: bool,
    #[serde(default)]
    pub reasoning: bool,
}

/// Pricing in dollars per 1M tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub input: f64,
    pub output: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_read: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_write: Option<f64>,
    pub currency: String,
}

/// Token-count ceilings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output: Option<u64>,
}

/// One model variant as distributed by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,

    pub name: String,

    /// Lineage shared by successive variants (e.g. "claude-opus").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(default)]
    pub tier: Tier,

    #[serde(default)]
    pub capabilities: Capabilities,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<Limits>,

    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(default)]
    pub is_latest: bool,

    /// Curated annotation; preserved across syncs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Curated Chinese annotation; preserved across syncs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_zh: Option<String>,
}

impl Model {
    /// True when the model is flagged latest or mentions "latest" in its id or name.
    pub fn is_latest_like(&self) -> bool {
        self.is_latest || self.id.contains("latest") || self.name.to_lowercase().contains("latest")
    }

    /// The family name, treating an empty string as no family.
    pub fn family_key(&self) -> Option<&str> {
        self.family.as_deref().filter(|f| !f.is_empty())
    }
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// Identity and metadata of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

/// `providers/<id>.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDocument {
    #[serde(rename = "$schema", default = "default_schema_pointer")]
    pub schema: String,

    pub provider: ProviderInfo,

    pub models: Vec<Model>,

    /// RFC 3339 timestamp of the last write.
    pub updated_at: String,

    #[serde(default = "default_source")]
    pub source: String,
}

impl ProviderDocument {
    pub fn new(provider: ProviderInfo, models: Vec<Model>, updated_at: String) -> Self {
        Self {
            schema: default_schema_pointer(),
            provider,
            models,
            updated_at,
            source: default_source(),
        }
    }
}

fn default_schema_pointer() -> String {
    MODEL_SCHEMA_POINTER.to_string()
}

fn default_source() -> String {
    CATALOG_SOURCE.to_string()
}

/// Provenance pointers recorded in the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSources {
    /// Upstream catalog URL.
    pub api: String,
    /// Provider ids maintained by hand rather than synced.
    #[serde(default)]
    pub manual: Vec<String>,
}

/// `index.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    pub version: String,
    pub updated_at: String,
    pub providers: Vec<String>,
    pub total_models: usize,
    pub sources: IndexSources,
}

/// Hand-written annotations of one stored model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CuratedFields {
    pub description: Option<String>,
    pub description_zh: Option<String>,
}

/// Curated annotations keyed by model id.
pub type CuratedIndex = HashMap<String, CuratedFields>;

/// Collect curated annotations from a raw provider document.
///
/// Reads untyped JSON, so a hand edit anywhere else in the document (an
/// unknown tier, a partial pricing block) never hides curated text. Entries
/// without a non-empty string id are skipped.
pub fn curated_fields(doc: &Value) -> CuratedIndex {
    let Some(models) = doc.get("models").and_then(Value::as_array) else {
        return CuratedIndex::new();
    };

    models
        .iter()
        .filter_map(|model| {
            let id = model.get("id")?.as_str().filter(|id| !id.is_empty())?;
            let text = |field: &str| model.get(field).and_then(Value::as_str).map(str::to_string);
            Some((
                id.to_string(),
                CuratedFields {
                    description: text("description"),
                    description_zh: text("description_zh"),
                },
            ))
        })
        .collect()
}
