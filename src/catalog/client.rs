use reqwest::{Client, StatusCode};

use super::types::ModelCatalog;

/// Errors raised while retrieving the upstream catalog.
///
/// Every variant is fatal to a sync run; there is no retry.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to fetch catalog: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Catalog endpoint {url} returned HTTP {status}")]
    HttpStatus { status: StatusCode, url: String },

    #[error("Failed to decode catalog: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fetch the full catalog snapshot from `url`.
///
/// A network error or a non-success status aborts immediately. No timeout is
/// applied beyond the client's own configuration.
pub async fn fetch_catalog(client: &Client, url: &str) -> Result<ModelCatalog, CatalogError> {
    tracing::debug!(url = %url, "Fetching model catalog");

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(CatalogError::HttpStatus {
            status: response.status(),
            url: url.to_string(),
        });
    }

    let json = response.text().await?;
    let catalog = parse_catalog(&json)?;

    tracing::debug!(
        providers = catalog.len(),
        bytes = json.len(),
        "Fetched model catalog"
    );

    Ok(catalog)
}

/// Parse a catalog snapshot from its JSON text.
pub fn parse_catalog(json: &str) -> Result<ModelCatalog, CatalogError> {
    Ok(serde_json::from_str(json)?)
}
