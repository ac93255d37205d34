//! Flat-file data store.
//!
//! Layout under the store root:
//!
//! ```text
//! providers/<provider-id>.json   provider documents (written by sync)
//! aliases/<proxy-id>.json        alias documents (hand-maintained)
//! index.json                     index document (written by sync)
//! schema/model.schema.json       informational JSON Schema
//! ```

mod documents;

use std::path::{Path, PathBuf};

pub use documents::*;
use serde::Serialize;

const PROVIDERS_DIR: &str = "providers";
const ALIASES_DIR: &str = "aliases";
const INDEX_FILE: &str = "index.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {1}: {0}")]
    Io(std::io::Error, PathBuf),

    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle on a data store directory.
#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
}

impl DataStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn providers_dir(&self) -> PathBuf {
        self.root.join(PROVIDERS_DIR)
    }

    pub fn aliases_dir(&self) -> PathBuf {
        self.root.join(ALIASES_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn provider_path(&self, provider_id: &str) -> PathBuf {
        self.providers_dir().join(format!("{provider_id}.json"))
    }

    /// Curated annotations from a previously written provider document.
    ///
    /// A missing file or one that is not JSON yields `None`; the caller
    /// proceeds as if no curated data existed. Any JSON document is read
    /// leniently, see [`curated_fields`].
    pub async fn load_curated(&self, provider_id: &str) -> Option<CuratedIndex> {
        let path = self.provider_path(provider_id);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(path = ?path, error = %e, "Unreadable provider document, ignoring");
                }
                return None;
            }
        };

        match serde_json::from_str::<serde_json::Value>(&contents) {
            Ok(doc) => Some(curated_fields(&doc)),
            Err(e) => {
                tracing::debug!(path = ?path, error = %e, "Malformed provider document, ignoring");
                None
            }
        }
    }

    /// Write a provider document, creating `providers/` if needed.
    pub async fn write_provider(&self, doc: &ProviderDocument) -> StoreResult<PathBuf> {
        let path = self.provider_path(&doc.provider.id);
        write_json(&path, doc).await?;
        Ok(path)
    }

    pub async fn write_index(&self, doc: &IndexDocument) -> StoreResult<PathBuf> {
        let path = self.index_path();
        write_json(&path, doc).await?;
        Ok(path)
    }

    /// Number of entries in a provider document's `models` array.
    ///
    /// Unreadable files, malformed JSON and a missing or non-array `models`
    /// field all yield `None`.
    pub async fn model_count(&self, path: &Path) -> Option<usize> {
        let contents = tokio::fs::read_to_string(path).await.ok()?;
        let value: serde_json::Value = serde_json::from_str(&contents).ok()?;
        value.get("models")?.as_array().map(Vec::len)
    }

    /// All `*.json` files in `providers/`, sorted by name.
    pub async fn provider_files(&self) -> StoreResult<Vec<PathBuf>> {
        list_json_files(&self.providers_dir()).await
    }

    /// All `*.json` files in `aliases/`, sorted by name.
    pub async fn alias_files(&self) -> StoreResult<Vec<PathBuf>> {
        list_json_files(&self.aliases_dir()).await
    }
}

/// Serialize `value` as pretty JSON with a trailing newline.
async fn write_json<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::Io(e, parent.to_path_buf()))?;
    }

    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');

    tokio::fs::write(path, json)
        .await
        .map_err(|e| StoreError::Io(e, path.to_path_buf()))
}

/// List `*.json` files in `dir`. A missing directory is an empty listing.
async fn list_json_files(dir: &Path) -> StoreResult<Vec<PathBuf>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::Io(e, dir.to_path_buf())),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| StoreError::Io(e, dir.to_path_buf()))?
    {
        let path = entry.path();
        let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
        if is_file && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Provider id for a provider document path (its file stem).
pub fn provider_id_from_path(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}
