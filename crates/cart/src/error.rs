//! Unified error type for cart operations.
//!
//! Every store operation returns `Result<T, CartError>`; nothing is caught
//! and swallowed inside the store. Callers decide how to surface failures -
//! see [`crate::notice`] for the standard user-facing mapping.

use thiserror::Error;

use bramble_core::ProductId;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Errors a cart operation can return.
#[derive(Debug, Error)]
pub enum CartError {
    /// The operation targeted an identifier that is not in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// The requested quantity exceeds the available stock.
    #[error("requested {requested} of product {id}, only {available} in stock")]
    OutOfStock {
        /// Product the request was for.
        id: ProductId,
        /// Quantity the caller asked for.
        requested: u32,
        /// Stock observed at the time of the request.
        available: u32,
    },

    /// Remote catalog lookup failed.
    #[error("catalog lookup failed: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart snapshot failed.
    #[error("cart persistence failed: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_in_cart_display() {
        let err = CartError::NotInCart(ProductId::new(9));
        assert_eq!(err.to_string(), "product 9 is not in the cart");
    }

    #[test]
    fn test_out_of_stock_display() {
        let err = CartError::OutOfStock {
            id: ProductId::new(3),
            requested: 5,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "requested 5 of product 3, only 2 in stock"
        );
    }
}
