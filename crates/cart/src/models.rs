//! Cart domain models and the persisted snapshot format.
//!
//! [`Product`] and [`StockRecord`] mirror the catalog service wire format;
//! [`CartItem`] is what the store holds and what gets persisted. Display
//! fields (`title`, `price`, `image`) are opaque to the store - they are
//! carried for the UI and never interpreted here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bramble_core::{Price, ProductId};

/// Version tag written into every persisted snapshot.
///
/// Bump when the snapshot shape changes; older versions load as empty.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A product record as returned by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier, unique per product.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Display image URL, if the catalog provides one.
    pub image: Option<String>,
}

/// Available stock for a product, as returned by `GET /stock/{id}`.
///
/// Fetched on demand for every quantity change and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Catalog identifier the stock level belongs to.
    pub id: ProductId,
    /// Units currently available.
    pub amount: u32,
}

/// A product in the cart together with its requested quantity.
///
/// Invariant: `amount >= 1`. Items with a lower requested quantity never
/// enter the list - the store rejects or ignores such requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog identifier, unique within the cart.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Display image URL, if the catalog provides one.
    pub image: Option<String>,
    /// Requested quantity.
    pub amount: u32,
}

impl CartItem {
    /// Price of this line: unit price times requested quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.amount
    }
}

impl From<Product> for CartItem {
    /// A freshly added product always enters the cart with quantity 1.
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }
}

/// Envelope written to the persistence slot.
///
/// The whole cart is serialized on every successful mutation; partial
/// updates are never written.
#[derive(Debug, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Snapshot format version, see [`SNAPSHOT_VERSION`].
    pub version: u32,
    /// When this snapshot was written.
    pub saved_at: DateTime<Utc>,
    /// The full item list, in insertion order.
    pub items: Vec<CartItem>,
}

impl CartSnapshot {
    /// Wrap an item list in a current-version envelope.
    #[must_use]
    pub fn new(items: Vec<CartItem>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            items,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Trail Runner".to_string(),
            price: Price::new(Decimal::new(17990, 2)),
            image: Some("https://cdn.example.com/trail-runner.jpg".to_string()),
        }
    }

    #[test]
    fn test_new_item_has_amount_one() {
        let item = CartItem::from(sample_product());
        assert_eq!(item.amount, 1);
        assert_eq!(item.id, ProductId::new(1));
    }

    #[test]
    fn test_line_total_scales_with_amount() {
        let mut item = CartItem::from(sample_product());
        item.amount = 3;
        assert_eq!(item.line_total().amount(), Decimal::new(53970, 2));
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let snapshot = CartSnapshot::new(vec![CartItem::from(sample_product())]);
        let payload = serde_json::to_string(&snapshot).unwrap();

        let restored: CartSnapshot = serde_json::from_str(&payload).unwrap();
        assert_eq!(restored.version, SNAPSHOT_VERSION);
        assert_eq!(restored.items, snapshot.items);
    }

    #[test]
    fn test_product_deserializes_from_catalog_wire_format() {
        let payload = r#"{"id": 2, "title": "Canvas Tote", "price": 29.9, "image": null}"#;
        let product: Product = serde_json::from_str(payload).unwrap();
        assert_eq!(product.id, ProductId::new(2));
        assert_eq!(product.image, None);
    }
}
