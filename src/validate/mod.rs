//! Structural validation of the data store.
//!
//! Every provider, alias and index document is checked; a failing file never
//! stops the run. The store is valid when no file has errors. Nothing is
//! written.

mod rules;

use std::{
    fmt,
    path::{Path, PathBuf},
};

pub use rules::{validate_alias, validate_index, validate_provider};
use serde_json::Value;

use crate::store::{DataStore, StoreResult};

/// The kind of document a file holds, which selects its rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Provider,
    Alias,
    Index,
}

impl DocumentKind {
    fn check(self, doc: &Value) -> Vec<String> {
        match self {
            DocumentKind::Provider => validate_provider(doc),
            DocumentKind::Alias => validate_alias(doc),
            DocumentKind::Index => validate_index(doc),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Provider => f.write_str("provider"),
            DocumentKind::Alias => f.write_str("alias"),
            DocumentKind::Index => f.write_str("index"),
        }
    }
}

/// Validation outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path relative to the store root where possible.
    pub path: PathBuf,
    pub kind: DocumentKind,
    pub errors: Vec<String>,
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome for a whole store: providers, then aliases, then the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub files: Vec<FileReport>,
}

impl ValidationReport {
    pub fn valid_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_valid()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.files.len() - self.valid_count()
    }

    pub fn is_success(&self) -> bool {
        self.invalid_count() == 0
    }
}

/// Parse `contents` and apply the rules for `kind`.
///
/// A parse failure is reported as a single error.
pub fn validate_document(kind: DocumentKind, contents: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(contents) {
        Ok(doc) => kind.check(&doc),
        Err(e) => vec![format!("Invalid JSON: {e}")],
    }
}

/// Read and validate one file. An unreadable file is reported as invalid.
pub async fn validate_file(path: &Path, kind: DocumentKind) -> Vec<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => validate_document(kind, &contents),
        Err(e) => vec![format!("Failed to read file: {e}")],
    }
}

/// Validate every document in the store.
///
/// A missing `index.json` is skipped rather than reported.
pub async fn validate_store(store: &DataStore) -> StoreResult<ValidationReport> {
    let mut targets: Vec<(PathBuf, DocumentKind)> = Vec::new();
    targets.extend(
        store
            .provider_files()
            .await?
            .into_iter()
            .map(|p| (p, DocumentKind::Provider)),
    );
    targets.extend(
        store
            .alias_files()
            .await?
            .into_iter()
            .map(|p| (p, DocumentKind::Alias)),
    );

    let index_path = store.index_path();
    if tokio::fs::try_exists(&index_path).await.unwrap_or(false) {
        targets.push((index_path, DocumentKind::Index));
    } else {
        tracing::debug!(path = ?index_path, "No index document, skipping");
    }

    let mut report = ValidationReport::default();
    for (path, kind) in targets {
        let errors = validate_file(&path, kind).await;
        if errors.is_empty() {
            tracing::debug!(path = ?path, kind = %kind, "Document valid");
        } else {
            tracing::debug!(path = ?path, kind = %kind, errors = errors.len(), "Document invalid");
        }

        let relative = path
            .strip_prefix(store.root())
            .map(Path::to_path_buf)
            .unwrap_or(path);
        report.files.push(FileReport {
            path: relative,
            kind,
            errors,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_is_single_error() {
        let errors = validate_document(DocumentKind::Provider, "{ nope");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Invalid JSON"));
    }

    #[test]
    fn test_kind_selects_rules() {
        let alias = r#"{"provider": "p", "aliases": {}}"#;
        assert!(validate_document(DocumentKind::Alias, alias).is_empty());
        assert!(!validate_document(DocumentKind::Provider, alias).is_empty());
    }

    #[test]
    fn test_report_counts() {
        let report = ValidationReport {
            files: vec![
                FileReport {
                    path: "providers/a.json".into(),
                    kind: DocumentKind::Provider,
                    errors: Vec::new(),
                },
                FileReport {
                    path: "providers/b.json".into(),
                    kind: DocumentKind::Provider,
                    errors: vec!["Missing updated_at".into()],
                },
            ],
        };

        assert_eq!(report.valid_count(), 1);
        assert_eq!(report.invalid_count(), 1);
        assert!(!report.is_success());
        assert!(ValidationReport::default().is_success());
    }
}
