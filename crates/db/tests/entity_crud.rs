//! Integration tests for entity CRUD over the in-memory store.
//!
//! Exercises the store trait layer without a running Postgres:
//! - Create honours the caller-supplied id and defaults the lifecycle columns
//! - Duplicate ids are rejected without clobbering the existing row
//! - Update overwrites every mutable field and refreshes `modified_at`
//! - Lists are ordered by id and optionally filtered by status
//! - Writes never validate foreign keys

use assert_matches::assert_matches;
use musicstore_core::error::CoreError;
use musicstore_core::registry::EntityKind;
use musicstore_db::models::{
    CreateAlbum, CreateCatalog, CreateInventory, CreateProduct, CreateSupplier, Status,
    UpdateAlbum, UpdateProduct, UpdateSupplier,
};
use musicstore_db::store::{
    AlbumStore, CatalogStore, InventoryStore, LifecycleStore, ProductStore, SupplierStore,
};
use musicstore_db::{MemoryStore, StoreError};
use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_product(id: i64, name: &str) -> CreateProduct {
    CreateProduct {
        id,
        name: name.to_string(),
        price: Decimal::new(1999, 2),
        product_type_id: 1,
        catalog_id: 1,
        album_id: 1,
    }
}

fn new_supplier(id: i64, name: &str) -> CreateSupplier {
    CreateSupplier {
        id,
        name: name.to_string(),
        address: "742 Evergreen Terrace".to_string(),
        phone: "555-0100".to_string(),
        email: "orders@example.com".to_string(),
    }
}

fn new_catalog(id: i64, name: &str) -> CreateCatalog {
    CreateCatalog {
        id,
        name: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test: create honours the caller-supplied id and defaults lifecycle columns
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_product_defaults_lifecycle_columns() {
    let store = MemoryStore::new();

    let product = store
        .create_product(&new_product(1, "Abbey Road"))
        .await
        .unwrap();

    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Abbey Road");
    assert_eq!(product.price, Decimal::new(1999, 2));
    assert_eq!(product.status, Status::Active);
}

// ---------------------------------------------------------------------------
// Test: create then get round-trips every field
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let store = MemoryStore::new();

    let created = store
        .create_supplier(&new_supplier(7, "Vinyl Wholesale"))
        .await
        .unwrap();

    let fetched = store
        .get_supplier(7)
        .await
        .unwrap()
        .expect("supplier should exist");

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "Vinyl Wholesale");
    assert_eq!(fetched.address, "742 Evergreen Terrace");
    assert_eq!(fetched.email, "orders@example.com");
    assert_eq!(fetched.modified_at, created.modified_at);
}

// ---------------------------------------------------------------------------
// Test: duplicate id is rejected and the existing row survives
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_duplicate_id_is_rejected() {
    let store = MemoryStore::new();

    store.create_catalog(&new_catalog(3, "Rock")).await.unwrap();

    let err = store
        .create_catalog(&new_catalog(3, "Jazz"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        StoreError::Core(CoreError::DuplicateId {
            entity: "Catalog",
            id: 3
        })
    );

    // The original row is untouched.
    let kept = store.get_catalog(3).await.unwrap().unwrap();
    assert_eq!(kept.name, "Rock");
}

// ---------------------------------------------------------------------------
// Test: get of a missing id returns None
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_missing_returns_none() {
    let store = MemoryStore::new();

    assert!(store.get_product(99).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: update overwrites all fields and refreshes modified_at
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_overwrites_all_fields() {
    let store = MemoryStore::new();

    let created = store
        .create_product(&new_product(5, "Original Pressing"))
        .await
        .unwrap();

    let updated = store
        .update_product(
            5,
            &UpdateProduct {
                name: "Remastered".to_string(),
                price: Decimal::new(2499, 2),
                product_type_id: 2,
                catalog_id: 2,
                album_id: 2,
            },
        )
        .await
        .unwrap()
        .expect("product should exist");

    assert_eq!(updated.name, "Remastered");
    assert_eq!(updated.price, Decimal::new(2499, 2));
    assert_eq!(updated.product_type_id, 2);
    assert_eq!(updated.catalog_id, 2);
    assert_eq!(updated.album_id, 2);
    assert_eq!(updated.status, Status::Active);
    assert!(updated.modified_at >= created.modified_at);
}

// ---------------------------------------------------------------------------
// Test: update of a missing id returns None
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_missing_returns_none() {
    let store = MemoryStore::new();

    let result = store
        .update_supplier(
            404,
            &UpdateSupplier {
                name: "Ghost".to_string(),
                address: "Nowhere".to_string(),
                phone: "555-0199".to_string(),
                email: "ghost@example.com".to_string(),
            },
        )
        .await
        .unwrap();

    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Test: list is ordered by id regardless of insertion order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let store = MemoryStore::new();

    for id in [30, 10, 20] {
        store
            .create_catalog(&new_catalog(id, &format!("Catalog {id}")))
            .await
            .unwrap();
    }

    let catalogs = store.list_catalogs(None).await.unwrap();
    let ids: Vec<i64> = catalogs.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![10, 20, 30]);
}

// ---------------------------------------------------------------------------
// Test: list includes inactive rows and supports status filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_includes_inactive_and_filters_by_status() {
    let store = MemoryStore::new();

    for id in [1, 2, 3] {
        store
            .create_supplier(&new_supplier(id, &format!("Supplier {id}")))
            .await
            .unwrap();
    }
    let flipped = store
        .set_status(EntityKind::Supplier, 2, Status::Inactive)
        .await
        .unwrap();
    assert!(flipped);

    let all = store.list_suppliers(None).await.unwrap();
    assert_eq!(all.len(), 3);

    let active = store.list_suppliers(Some(Status::Active)).await.unwrap();
    let active_ids: Vec<i64> = active.iter().map(|s| s.id).collect();
    assert_eq!(active_ids, vec![1, 3]);

    let inactive = store.list_suppliers(Some(Status::Inactive)).await.unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].id, 2);
}

// ---------------------------------------------------------------------------
// Test: writes never validate foreign keys
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_accepts_unknown_foreign_keys() {
    let store = MemoryStore::new();

    // Inventory rows reference three other tables; none have to exist.
    let inventory = store
        .create_inventory(&CreateInventory {
            id: 1,
            location_id: 999,
            product_id: 999,
            stock_id: 999,
            quantity: 12,
        })
        .await
        .unwrap();

    assert_eq!(inventory.location_id, 999);
    assert_eq!(inventory.quantity, 12);
}

#[tokio::test]
async fn test_update_accepts_unknown_foreign_keys() {
    let store = MemoryStore::new();

    store
        .create_album(&CreateAlbum {
            id: 1,
            name: "Blue Train".to_string(),
            artist_id: 1,
        })
        .await
        .unwrap();

    let updated = store
        .update_album(
            1,
            &UpdateAlbum {
                name: "Blue Train".to_string(),
                artist_id: 404,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.artist_id, 404);
}

// ---------------------------------------------------------------------------
// Test: wire shape of a row (status letter, price as decimal string)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_row_serializes_with_status_letter_and_decimal_string() {
    let store = MemoryStore::new();

    let product = store
        .create_product(&new_product(1, "Kind of Blue"))
        .await
        .unwrap();

    let json = serde_json::to_value(&product).unwrap();
    assert_eq!(json["status"], "A");
    assert_eq!(json["price"], "19.99");
}
