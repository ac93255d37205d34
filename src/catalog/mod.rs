//! Upstream model catalog from <https://models.dev>.
//!
//! The catalog is a single JSON snapshot mapping provider IDs to provider
//! objects, each carrying a map of model records. It is fetched once per sync
//! run; there is no authentication and no pagination.
//!
//! # Usage
//!
//! ```rust,ignore
//! use modelstore::catalog::{MODELS_DEV_API_URL, fetch_catalog};
//!
//! let client = reqwest::Client::new();
//! let catalog = fetch_catalog(&client, MODELS_DEV_API_URL).await?;
//! println!("{} providers", catalog.len());
//! ```

mod client;
mod types;

pub use client::{CatalogError, fetch_catalog, parse_catalog};
pub use types::{
    CatalogCost, CatalogLimit, CatalogModalities, CatalogModel, CatalogProvider, ModelCatalog,
};

/// Default upstream endpoint serving the full catalog.
pub const MODELS_DEV_API_URL: &str = "https://models.dev/api.json";

/// Provenance tag written into every provider document.
pub const CATALOG_SOURCE: &str = "models.dev";
