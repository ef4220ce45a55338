//! The cart state container.
//!
//! [`CartStore`] owns the ordered item list and is the only mutation path.
//! Every mutation follows the same shape: build the candidate list, persist
//! it, then swap it into memory. A failed lookup or write therefore leaves
//! both the in-memory list and the persisted slot at their previous values,
//! and readers never observe a half-applied update.

use tracing::{instrument, warn};

use bramble_core::{Price, ProductId};

use crate::catalog::{HttpCatalog, ProductCatalog};
use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::models::{CartItem, CartSnapshot, SNAPSHOT_VERSION};
use crate::storage::{CartStorage, FileStore, StorageError};

/// Shopping-cart state container for a single session.
///
/// Generic over the catalog and storage seams; production code uses
/// [`HttpCatalog`] and [`FileStore`] via [`CartStore::from_config`].
pub struct CartStore<C, S> {
    catalog: C,
    storage: S,
    slot: String,
    items: Vec<CartItem>,
}

impl CartStore<HttpCatalog, FileStore> {
    /// Build a store wired to the HTTP catalog and file-backed slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed from the
    /// configuration.
    pub async fn from_config(config: &CartConfig) -> Result<Self> {
        let catalog = HttpCatalog::new(&config.catalog)?;
        let storage = FileStore::new(&config.storage_dir);
        Ok(Self::open(catalog, storage, config.slot_key()).await)
    }
}

impl<C: ProductCatalog, S: CartStorage> CartStore<C, S> {
    /// Open a cart, restoring the item list from the persistence slot.
    ///
    /// An absent, unreadable, or malformed slot yields an empty cart - a
    /// broken snapshot is logged and discarded, never an error.
    pub async fn open(catalog: C, storage: S, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let items = Self::restore(&storage, &slot).await;

        Self {
            catalog,
            storage,
            slot,
            items,
        }
    }

    async fn restore(storage: &S, slot: &str) -> Vec<CartItem> {
        let payload = match storage.load(slot).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, slot, "failed to read cart slot, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<CartSnapshot>(&payload) {
            Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => snapshot.items,
            Ok(snapshot) => {
                warn!(
                    version = snapshot.version,
                    slot, "unsupported cart snapshot version, starting empty"
                );
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, slot, "malformed cart snapshot, starting empty");
                Vec::new()
            }
        }
    }

    // =========================================================================
    // Read-only views
    // =========================================================================

    /// Current items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total quantity across all items (the cart badge count).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product to the cart.
    ///
    /// A product already in the cart has its quantity incremented through
    /// the stock check; a new product is fetched from the catalog and
    /// appended with quantity 1 (no stock check on first add).
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutOfStock` if the incremented quantity exceeds
    /// available stock, `CartError::Catalog` if the lookup fails, and
    /// `CartError::Storage` if the snapshot cannot be persisted. The cart
    /// is unchanged on any error.
    #[instrument(skip(self))]
    pub async fn add(&mut self, id: ProductId) -> Result<()> {
        let current = self
            .items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.amount);

        if let Some(amount) = current {
            return self.set_amount(id, amount + 1).await;
        }

        let product = self.catalog.product(id).await?;

        let mut next = self.items.clone();
        next.push(CartItem::from(product));
        self.commit(next).await?;

        Ok(())
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if no item has this identifier and
    /// `CartError::Storage` if the snapshot cannot be persisted. The cart
    /// is unchanged on any error.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, id: ProductId) -> Result<()> {
        if !self.items.iter().any(|item| item.id == id) {
            return Err(CartError::NotInCart(id));
        }

        let next: Vec<CartItem> = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        self.commit(next).await?;

        Ok(())
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// A requested quantity below 1 is ignored. The current stock level is
    /// fetched and the request rejected if it exceeds the available amount.
    /// Setting the quantity of a product that is not in the cart does
    /// nothing - the stock check still runs first, matching the lookup
    /// order callers observe.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutOfStock` if `amount` exceeds available stock,
    /// `CartError::Catalog` if the stock lookup fails, and
    /// `CartError::Storage` if the snapshot cannot be persisted. The cart
    /// is unchanged on any error.
    #[instrument(skip(self))]
    pub async fn set_amount(&mut self, id: ProductId, amount: u32) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }

        let stock = self.catalog.stock(id).await?;
        if amount > stock.amount {
            return Err(CartError::OutOfStock {
                id,
                requested: amount,
                available: stock.amount,
            });
        }

        let Some(position) = self.items.iter().position(|item| item.id == id) else {
            return Ok(());
        };

        let mut next = self.items.clone();
        if let Some(item) = next.get_mut(position) {
            item.amount = amount;
        }
        self.commit(next).await?;

        Ok(())
    }

    /// Persist the candidate list, then swap it into memory.
    async fn commit(&mut self, next: Vec<CartItem>) -> std::result::Result<(), StorageError> {
        let snapshot = CartSnapshot::new(next);
        let payload = serde_json::to_string(&snapshot)?;
        self.storage.save(&self.slot, &payload).await?;
        self.items = snapshot.items;
        Ok(())
    }
}
