//! HTTP implementation of the catalog client.
//!
//! Talks JSON over REST: `GET {base}/products/{id}` and
//! `GET {base}/stock/{id}`. Product records are cached in-process with a
//! short TTL; stock is read fresh on every call.

use std::time::Duration;

use moka::future::Cache;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use bramble_core::ProductId;

use super::{CatalogError, ProductCatalog};
use crate::config::CatalogConfig;
use crate::models::{Product, StockRecord};

const PRODUCT_CACHE_CAPACITY: u64 = 1000;
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Client for the catalog service.
#[derive(Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<ProductId, Product>,
}

impl HttpCatalog {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the configured
    /// token is not a valid header value.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.token {
            let auth_value = format!("Bearer {}", token.expose_secret());
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value)
                    .map_err(|e| CatalogError::Parse(format!("Invalid token format: {e}")))?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(PRODUCT_CACHE_CAPACITY)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            cache,
        })
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}/{path}", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

impl ProductCatalog for HttpCatalog {
    #[instrument(skip(self), fields(id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        // Check cache
        if let Some(product) = self.cache.get(&id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product = match self.get_json::<Product>(&format!("products/{id}")).await {
            Ok(product) => product,
            Err(CatalogError::Api { status: 404, .. }) => return Err(CatalogError::NotFound(id)),
            Err(e) => return Err(e),
        };

        self.cache.insert(id, product.clone()).await;

        Ok(product)
    }

    // Never cached: quantity checks must see the latest available amount.
    #[instrument(skip(self), fields(id = %id))]
    async fn stock(&self, id: ProductId) -> Result<StockRecord, CatalogError> {
        match self.get_json::<StockRecord>(&format!("stock/{id}")).await {
            Err(CatalogError::Api { status: 404, .. }) => Err(CatalogError::NotFound(id)),
            other => other,
        }
    }
}
