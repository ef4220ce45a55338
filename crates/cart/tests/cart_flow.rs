//! End-to-end cart behavior against a stub catalog and in-memory slots.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use rust_decimal::Decimal;

use bramble_cart::CartError;
use bramble_cart::catalog::{CatalogError, ProductCatalog};
use bramble_cart::models::{Product, StockRecord};
use bramble_cart::notice::{Notice, Operation};
use bramble_cart::storage::{CartStorage, MemoryStore, StorageError};
use bramble_cart::store::CartStore;
use bramble_core::{Price, ProductId};

const SLOT: &str = "bramble:cart";

/// Catalog stub serving fixed product and stock tables.
#[derive(Debug, Clone, Default)]
struct StubCatalog {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, u32>,
}

impl StubCatalog {
    fn with(products: &[(i64, &str, Decimal)], stock: &[(i64, u32)]) -> Self {
        Self {
            products: products
                .iter()
                .map(|&(id, title, price)| {
                    let id = ProductId::new(id);
                    (
                        id,
                        Product {
                            id,
                            title: title.to_string(),
                            price: Price::new(price),
                            image: None,
                        },
                    )
                })
                .collect(),
            stock: stock
                .iter()
                .map(|&(id, amount)| (ProductId::new(id), amount))
                .collect(),
        }
    }
}

impl ProductCatalog for StubCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn stock(&self, id: ProductId) -> Result<StockRecord, CatalogError> {
        self.stock
            .get(&id)
            .copied()
            .map(|amount| StockRecord { id, amount })
            .ok_or(CatalogError::NotFound(id))
    }
}

/// Storage stub whose writes always fail.
#[derive(Debug, Clone, Default)]
struct FailStore;

impl CartStorage for FailStore {
    async fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn save(&self, _key: &str, _payload: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }
}

fn sneaker_catalog() -> StubCatalog {
    StubCatalog::with(
        &[
            (1, "Trail Runner", Decimal::new(17990, 2)),
            (2, "Canvas Tote", Decimal::new(2990, 2)),
            (3, "Wool Socks", Decimal::new(990, 2)),
        ],
        &[(1, 5), (2, 2), (3, 10)],
    )
}

fn amounts(cart: &CartStore<StubCatalog, MemoryStore>) -> Vec<(i64, u32)> {
    cart.items()
        .iter()
        .map(|item| (item.id.as_i64(), item.amount))
        .collect()
}

#[tokio::test]
async fn test_add_appends_new_item_with_amount_one() {
    let mut cart = CartStore::open(sneaker_catalog(), MemoryStore::new(), SLOT).await;

    cart.add(ProductId::new(1)).await.unwrap();

    assert_eq!(amounts(&cart), vec![(1, 1)]);
    assert_eq!(cart.items()[0].title, "Trail Runner");
}

#[tokio::test]
async fn test_add_same_product_increments_amount() {
    let mut cart = CartStore::open(sneaker_catalog(), MemoryStore::new(), SLOT).await;

    cart.add(ProductId::new(1)).await.unwrap();
    cart.add(ProductId::new(1)).await.unwrap();

    assert_eq!(amounts(&cart), vec![(1, 2)]);
}

#[tokio::test]
async fn test_add_increment_is_blocked_by_stock() {
    let catalog = StubCatalog::with(&[(1, "Trail Runner", Decimal::new(17990, 2))], &[(1, 1)]);
    let mut cart = CartStore::open(catalog, MemoryStore::new(), SLOT).await;

    cart.add(ProductId::new(1)).await.unwrap();
    let err = cart.add(ProductId::new(1)).await.unwrap_err();

    assert!(matches!(err, CartError::OutOfStock { .. }));
    assert_eq!(Notice::from_error(Operation::Add, &err), Notice::OutOfStock);
    assert_eq!(amounts(&cart), vec![(1, 1)]);
}

#[tokio::test]
async fn test_add_unknown_product_is_rejected() {
    let mut cart = CartStore::open(sneaker_catalog(), MemoryStore::new(), SLOT).await;

    let err = cart.add(ProductId::new(99)).await.unwrap_err();

    assert!(matches!(
        err,
        CartError::Catalog(CatalogError::NotFound(_))
    ));
    assert_eq!(Notice::from_error(Operation::Add, &err), Notice::AddFailed);
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_remove_deletes_only_that_item() {
    let mut cart = CartStore::open(sneaker_catalog(), MemoryStore::new(), SLOT).await;
    for id in [1, 2, 3] {
        cart.add(ProductId::new(id)).await.unwrap();
    }

    cart.remove(ProductId::new(2)).await.unwrap();

    assert_eq!(amounts(&cart), vec![(1, 1), (3, 1)]);
}

#[tokio::test]
async fn test_remove_absent_id_fails_without_mutation() {
    let mut cart = CartStore::open(sneaker_catalog(), MemoryStore::new(), SLOT).await;
    cart.add(ProductId::new(1)).await.unwrap();

    let err = cart.remove(ProductId::new(9)).await.unwrap_err();

    assert!(matches!(err, CartError::NotInCart(_)));
    assert_eq!(
        Notice::from_error(Operation::Remove, &err),
        Notice::RemoveFailed
    );
    assert_eq!(amounts(&cart), vec![(1, 1)]);
}

#[tokio::test]
async fn test_set_amount_zero_is_a_noop() {
    let storage = MemoryStore::new();
    let mut cart = CartStore::open(sneaker_catalog(), storage.clone(), SLOT).await;
    cart.add(ProductId::new(1)).await.unwrap();
    let persisted_before = storage.load(SLOT).await.unwrap();

    cart.set_amount(ProductId::new(1), 0).await.unwrap();

    assert_eq!(amounts(&cart), vec![(1, 1)]);
    // No write happened either
    assert_eq!(storage.load(SLOT).await.unwrap(), persisted_before);
}

#[tokio::test]
async fn test_set_amount_within_stock_updates_item() {
    // Stock for product 1 is 5
    let mut cart = CartStore::open(sneaker_catalog(), MemoryStore::new(), SLOT).await;
    cart.add(ProductId::new(1)).await.unwrap();

    cart.set_amount(ProductId::new(1), 3).await.unwrap();

    assert_eq!(amounts(&cart), vec![(1, 3)]);
}

#[tokio::test]
async fn test_set_amount_beyond_stock_is_rejected() {
    // Stock for product 2 is 2
    let mut cart = CartStore::open(sneaker_catalog(), MemoryStore::new(), SLOT).await;
    cart.add(ProductId::new(2)).await.unwrap();

    let err = cart.set_amount(ProductId::new(2), 3).await.unwrap_err();

    match &err {
        CartError::OutOfStock {
            requested,
            available,
            ..
        } => {
            assert_eq!(*requested, 3);
            assert_eq!(*available, 2);
        }
        other => panic!("expected OutOfStock, got {other}"),
    }
    assert_eq!(
        Notice::from_error(Operation::Update, &err),
        Notice::OutOfStock
    );
    assert_eq!(amounts(&cart), vec![(2, 1)]);
}

#[tokio::test]
async fn test_set_amount_for_absent_product_does_nothing() {
    let storage = MemoryStore::new();
    let mut cart = CartStore::open(sneaker_catalog(), storage.clone(), SLOT).await;

    cart.set_amount(ProductId::new(3), 2).await.unwrap();

    assert!(cart.is_empty());
    assert_eq!(storage.load(SLOT).await.unwrap(), None);
}

#[tokio::test]
async fn test_stock_lookup_failure_surfaces_as_update_failed() {
    // Product 1 exists but has no stock record, so stock lookups fail.
    // The first add of a new product performs no stock check, so it lands.
    let catalog = StubCatalog::with(&[(1, "Trail Runner", Decimal::new(17990, 2))], &[]);
    let mut cart = CartStore::open(catalog, MemoryStore::new(), SLOT).await;
    cart.add(ProductId::new(1)).await.unwrap();

    let err = cart.set_amount(ProductId::new(1), 2).await.unwrap_err();

    assert!(matches!(err, CartError::Catalog(_)));
    assert_eq!(
        Notice::from_error(Operation::Update, &err),
        Notice::UpdateFailed
    );
    assert_eq!(amounts(&cart), vec![(1, 1)]);
}

#[tokio::test]
async fn test_persisted_cart_round_trips() {
    let storage = MemoryStore::new();
    let catalog = sneaker_catalog();

    let mut cart = CartStore::open(catalog.clone(), storage.clone(), SLOT).await;
    cart.add(ProductId::new(1)).await.unwrap();
    cart.add(ProductId::new(3)).await.unwrap();
    cart.set_amount(ProductId::new(3), 4).await.unwrap();

    let reopened = CartStore::open(catalog, storage, SLOT).await;
    assert_eq!(reopened.items(), cart.items());
}

#[tokio::test]
async fn test_malformed_snapshot_starts_empty() {
    let storage = MemoryStore::new();
    storage.save(SLOT, "definitely not json").await.unwrap();

    let cart = CartStore::open(sneaker_catalog(), storage, SLOT).await;
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_unsupported_snapshot_version_starts_empty() {
    let storage = MemoryStore::new();
    storage
        .save(SLOT, r#"{"version": 99, "saved_at": "2026-01-01T00:00:00Z", "items": []}"#)
        .await
        .unwrap();

    let cart = CartStore::open(sneaker_catalog(), storage, SLOT).await;
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_failed_write_leaves_cart_unchanged() {
    let mut cart = CartStore::open(sneaker_catalog(), FailStore, SLOT).await;

    let err = cart.add(ProductId::new(1)).await.unwrap_err();

    assert!(matches!(err, CartError::Storage(_)));
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_count_and_subtotal_views() {
    let mut cart = CartStore::open(sneaker_catalog(), MemoryStore::new(), SLOT).await;
    cart.add(ProductId::new(1)).await.unwrap();
    cart.set_amount(ProductId::new(1), 2).await.unwrap();
    cart.add(ProductId::new(3)).await.unwrap();

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.count(), 3);
    // 2 * 179.90 + 1 * 9.90
    assert_eq!(cart.subtotal().amount(), Decimal::new(36970, 2));
}
