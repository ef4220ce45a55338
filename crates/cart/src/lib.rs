//! Bramble Cart - shopping-cart state container.
//!
//! Tracks selected products and quantities for a single storefront session,
//! persists the cart across restarts, and validates quantity changes against
//! available stock fetched from the remote catalog service.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the item list and is the only mutation path
//! - [`catalog`] - `ProductCatalog` trait plus the HTTP client for the
//!   catalog service (`GET /products/{id}`, `GET /stock/{id}`)
//! - [`storage`] - `CartStorage` trait plus file-backed and in-memory slots
//! - [`notice`] - maps operation errors to the user-facing messages; the
//!   store itself never renders notification text
//!
//! Every mutation commits atomically: the candidate list is built, the
//! snapshot is persisted, and only then is the in-memory list swapped.
//!
//! # Example
//!
//! ```rust,ignore
//! use bramble_cart::config::CartConfig;
//! use bramble_cart::store::CartStore;
//! use bramble_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let mut cart = CartStore::from_config(&config).await?;
//!
//! cart.add(ProductId::new(1)).await?;
//! cart.set_amount(ProductId::new(1), 3).await?;
//! println!("{} items, subtotal {}", cart.count(), cart.subtotal());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod notice;
pub mod storage;
pub mod store;

pub use error::{CartError, Result};
pub use store::CartStore;
