//! Catalog service client.
//!
//! The catalog service owns product persistence; this module consumes its
//! read endpoint. Uses `reqwest` for HTTP and caches product lists with
//! `moka` (5-minute TTL).

mod conversions;
pub mod types;

pub use types::{Product, ProductDetails};

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::CatalogConfig;

use conversions::ProductRecord;

/// Sentinel category value meaning "no filter".
const CATEGORY_ALL: &str = "all";

const CACHE_CAPACITY: u64 = 100;
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Errors that can occur when fetching from the catalog service.
///
/// A failed fetch yields no partial product list; the presentation layer
/// offers a retry.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog returned a non-success status.
    #[error("catalog returned HTTP {0}")]
    Status(u16),

    /// Response body was not the expected product list.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the catalog service's read endpoint.
///
/// Product lists are cached for 5 minutes, keyed by category filter.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, Arc<Vec<Product>>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    /// List products, optionally filtered by category.
    ///
    /// `None` or the sentinel value `all` returns the unfiltered list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the catalog responds with a
    /// non-success status, or the body cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<Product>, CatalogError> {
        let filter = normalize_category(category);
        let cache_key = filter.unwrap_or(CATEGORY_ALL).to_ascii_lowercase();

        if let Some(products) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product list");
            return Ok(products.as_ref().clone());
        }

        let mut request = self
            .inner
            .client
            .get(format!("{}/api/products", self.inner.base_url));
        if let Some(category) = filter {
            request = request.query(&[("category", category)]);
        }

        let response = request.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status(status.as_u16()));
        }

        let records: Vec<ProductRecord> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })?;

        let products: Vec<Product> = records
            .into_iter()
            .map(conversions::convert_product)
            .collect();

        self.inner
            .cache
            .insert(cache_key, Arc::new(products.clone()))
            .await;

        Ok(products)
    }
}

/// Resolve the category filter, treating `all` and blank as "no filter".
fn normalize_category(category: Option<&str>) -> Option<&str> {
    match category {
        Some(c) if c.trim().is_empty() || c.eq_ignore_ascii_case(CATEGORY_ALL) => None,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_category_sentinel() {
        assert_eq!(normalize_category(None), None);
        assert_eq!(normalize_category(Some("all")), None);
        assert_eq!(normalize_category(Some("ALL")), None);
        assert_eq!(normalize_category(Some("")), None);
        assert_eq!(normalize_category(Some("  ")), None);
        assert_eq!(normalize_category(Some("apparel")), Some("apparel"));
    }
}
