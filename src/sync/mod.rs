//! Catalog synchronization.
//!
//! A sync run is a single sequential pass:
//!
//! 1. Fetch the upstream catalog (fatal on any failure, no retry).
//! 2. For each selected provider, in id order: convert its models, merge
//!    curated fields from the stored document, optionally apply slim mode,
//!    sort, and write `providers/<id>.json`.
//! 3. Regenerate `index.json` from the provider documents on disk.
//!
//! Provider files are written progressively. If a write fails midway, files
//! already written keep their new content and the rest keep their old content.

mod convert;
mod merge;
mod slim;
mod tier;

use std::{cmp::Ordering, collections::HashSet, path::PathBuf, time::Instant};

use chrono::{SecondsFormat, Utc};
pub use convert::{convert_model, convert_models, convert_provider_info};
pub use merge::merge_curated_fields;
use reqwest::Client;
pub use slim::simplify_families;
pub use tier::{MAX_PATTERNS, MINI_PATTERNS, classify_tier};

use crate::{
    catalog::{CatalogError, CatalogProvider, MODELS_DEV_API_URL, ModelCatalog, fetch_catalog},
    store::{
        DataStore, INDEX_SCHEMA_VERSION, IndexDocument, IndexSources, Model, ProviderDocument,
        StoreError, provider_id_from_path,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Settings for one sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Upstream catalog URL.
    pub api_url: String,
    /// Reduce each family to at most two models.
    pub slim: bool,
    /// Upstream provider ids to write. Empty selects every provider.
    pub providers: Vec<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            api_url: MODELS_DEV_API_URL.to_string(),
            slim: false,
            providers: Vec::new(),
        }
    }
}

/// Outcome for a single provider document.
#[derive(Debug, Clone)]
pub struct ProviderSyncResult {
    pub provider_id: String,
    pub path: PathBuf,
    /// Models converted from upstream.
    pub models_fetched: usize,
    /// Models written after slim mode.
    pub models_written: usize,
}

/// Results from a single sync run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub providers: Vec<ProviderSyncResult>,
    pub index: IndexDocument,
    pub index_path: PathBuf,
    pub slim: bool,
    /// Duration of the run in milliseconds.
    pub duration_ms: u64,
}

impl SyncReport {
    pub fn models_written(&self) -> usize {
        self.providers.iter().map(|p| p.models_written).sum()
    }
}

/// Runs the fetch → convert → merge → simplify → write pipeline.
#[derive(Debug, Clone)]
pub struct Syncer {
    client: Client,
    store: DataStore,
    options: SyncOptions,
}

impl Syncer {
    pub fn new(client: Client, store: DataStore, options: SyncOptions) -> Self {
        Self {
            client,
            store,
            options,
        }
    }

    /// Run a single sync pass.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        let start = Instant::now();

        tracing::info!(
            api_url = %self.options.api_url,
            slim = self.options.slim,
            root = ?self.store.root(),
            "Starting catalog sync"
        );

        let catalog = fetch_catalog(&self.client, &self.options.api_url).await?;
        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let mut providers = Vec::new();
        for (key, provider) in self.selected_providers(&catalog) {
            let result = self.sync_provider(key, provider, &updated_at).await?;
            providers.push(result);
        }

        let index = self.build_index(&catalog, updated_at).await?;
        let index_path = self.store.write_index(&index).await?;

        let report = SyncReport {
            providers,
            index,
            index_path,
            slim: self.options.slim,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            providers = report.providers.len(),
            models = report.models_written(),
            duration_ms = report.duration_ms,
            "Catalog sync complete"
        );

        Ok(report)
    }

    /// Providers to write, sorted by catalog key.
    fn selected_providers<'a>(
        &self,
        catalog: &'a ModelCatalog,
    ) -> Vec<(&'a str, &'a CatalogProvider)> {
        for wanted in &self.options.providers {
            if !catalog.contains_key(wanted) {
                tracing::warn!(provider = %wanted, "Configured provider not found in catalog");
            }
        }

        let mut selected: Vec<_> = catalog
            .iter()
            .filter(|(key, _)| {
                self.options.providers.is_empty() || self.options.providers.contains(*key)
            })
            .map(|(key, provider)| (key.as_str(), provider))
            .collect();
        selected.sort_by_key(|(key, _)| *key);
        selected
    }

    async fn sync_provider(
        &self,
        key: &str,
        provider: &CatalogProvider,
        updated_at: &str,
    ) -> Result<ProviderSyncResult, SyncError> {
        let mut info = convert_provider_info(provider);
        info.id = document_id(key, provider).to_string();

        let fresh = convert_models(provider);
        let models_fetched = fresh.len();

        let merged = match self.store.load_curated(&info.id).await {
            Some(stored) => merge_curated_fields(fresh, &stored),
            None => fresh,
        };

        let mut models = if self.options.slim {
            simplify_families(merged)
        } else {
            merged
        };
        sort_models(&mut models);
        let models_written = models.len();

        let document = ProviderDocument::new(info, models, updated_at.to_string());
        let path = self.store.write_provider(&document).await?;

        tracing::info!(
            provider = %document.provider.id,
            models = models_written,
            fetched = models_fetched,
            "Wrote provider document"
        );

        Ok(ProviderSyncResult {
            provider_id: document.provider.id,
            path,
            models_fetched,
            models_written,
        })
    }

    /// Summarize every provider document on disk, including hand-maintained ones.
    async fn build_index(
        &self,
        catalog: &ModelCatalog,
        updated_at: String,
    ) -> Result<IndexDocument, SyncError> {
        let upstream: HashSet<&str> = catalog
            .iter()
            .map(|(key, provider)| document_id(key, provider))
            .collect();

        let mut providers = Vec::new();
        let mut manual = Vec::new();
        let mut total_models = 0;

        for path in self.store.provider_files().await? {
            let Some(id) = provider_id_from_path(&path) else {
                continue;
            };
            let Some(count) = self.store.model_count(&path).await else {
                tracing::warn!(path = ?path, "Skipping unreadable provider document in index");
                continue;
            };

            if !upstream.contains(id) {
                manual.push(id.to_string());
            }
            providers.push(id.to_string());
            total_models += count;
        }

        Ok(IndexDocument {
            version: INDEX_SCHEMA_VERSION.to_string(),
            updated_at,
            providers,
            total_models,
            sources: IndexSources {
                api: self.options.api_url.clone(),
                manual,
            },
        })
    }
}

/// File stem a catalog provider is written under: its declared id, or its
/// catalog key when the id is empty.
fn document_id<'a>(key: &'a str, provider: &'a CatalogProvider) -> &'a str {
    if provider.id.is_empty() {
        key
    } else {
        &provider.id
    }
}

/// Presentation order: newest release first, dated before undated, then by name.
pub fn sort_models(models: &mut [Model]) {
    models.sort_by(|a, b| match (&a.release_date, &b.release_date) {
        (Some(x), Some(y)) => y.cmp(x).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Capabilities, Tier};

    fn model(name: &str, date: Option<&str>) -> Model {
        Model {
            id: name.to_lowercase(),
            name: name.to_string(),
            family: None,
            tier: Tier::Pro,
            capabilities: Capabilities::default(),
            pricing: None,
            limits: None,
            status: "active".to_string(),
            release_date: date.map(str::to_string),
            is_latest: false,
            description: None,
            description_zh: None,
        }
    }

    #[test]
    fn test_sort_models_presentation_order() {
        let mut models = vec![
            model("Zeta", None),
            model("Old", Some("2023-01-01")),
            model("Alpha", None),
            model("New", Some("2025-01-01")),
            model("Also New", Some("2025-01-01")),
        ];
        sort_models(&mut models);

        let names: Vec<_> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Also New", "New", "Old", "Alpha", "Zeta"]);
    }

    #[test]
    fn test_default_options() {
        let options = SyncOptions::default();
        assert_eq!(options.api_url, MODELS_DEV_API_URL);
        assert!(!options.slim);
        assert!(options.providers.is_empty());
    }
}
