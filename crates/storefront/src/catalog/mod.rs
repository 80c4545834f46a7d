//! Mock catalog API client.
//!
//! # Architecture
//!
//! - Plain REST GETs via `reqwest` - the upstream is a read-only mock API
//!   serving `/categorias` and `/produtos` as JSON arrays
//! - In-memory caching via `moka` for both lists (5 minute TTL)
//! - The upstream is treated as possibly slow and possibly failing; list
//!   callers degrade to an empty view on error rather than retrying

mod cache;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use stech_core::{Category, Product, ProductId};

use cache::{CacheKey, CacheValue};

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("catalog API returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Client for the mock catalog API.
///
/// Cheap to clone; categories and products are cached for 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client for `base_url`.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.as_str().trim_end_matches('/').to_owned(),
                cache,
            }),
        }
    }

    /// Fetch and decode a JSON array endpoint.
    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, CatalogError> {
        let url = format!("{}/{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!(
                %status,
                body = %body.chars().take(200).collect::<String>(),
                "catalog API returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(200).collect::<String>(),
                "failed to parse catalog API response"
            );
            CatalogError::Parse(e)
        })
    }

    /// Get the category list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories = self.fetch_list::<Category>("categorias").await?;

        self.inner
            .cache
            .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Get the product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products = self.fetch_list::<Product>("produtos").await?;

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a single product by ID.
    ///
    /// The mock API serves a small flat list, so detail lookups resolve from
    /// the (cached) product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: &ProductId) -> Result<Product, CatalogError> {
        self.get_products()
            .await?
            .into_iter()
            .find(|product| product.id == *product_id)
            .ok_or_else(|| CatalogError::NotFound(format!("Product not found: {product_id}")))
    }

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
