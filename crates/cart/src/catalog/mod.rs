//! Catalog service client.
//!
//! The remote catalog is the source of truth for products and stock levels.
//! The store talks to it through the [`ProductCatalog`] trait so tests can
//! substitute a stub; [`HttpCatalog`] is the production implementation.
//!
//! Failure of any kind - network error, non-2xx status, unparseable body -
//! is a lookup failure; the store never distinguishes beyond the
//! [`CatalogError`] variants.

mod http;

pub use http::HttpCatalog;

use thiserror::Error;

use bramble_core::ProductId;

use crate::models::{Product, StockRecord};

/// Errors that can occur when interacting with the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// No product with this identifier exists in the catalog.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Failed to parse the response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Read access to the remote catalog.
pub trait ProductCatalog {
    /// Fetch a product record by identifier.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for unknown identifiers and the
    /// other variants for transport or decoding failures.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch the current stock level for a product.
    ///
    /// Implementations must not cache stock - callers rely on seeing the
    /// most recently observed amount.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for unknown identifiers and the
    /// other variants for transport or decoding failures.
    async fn stock(&self, id: ProductId) -> Result<StockRecord, CatalogError>;
}
