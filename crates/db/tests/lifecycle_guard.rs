//! Integration tests for the deactivation guard and activation lifecycle.
//!
//! Covers both guard modes: the transactional path where the store decides
//! and flips the status under one lock, and the check-then-write path.
//! Verifies that:
//! - A kind with active dependents cannot be deactivated, with a reason
//!   naming the dependent kind and count
//! - Deactivating the dependents first unblocks the parent
//! - The artist guard walks through albums of any status but only counts
//!   active products
//! - Activation is never guarded and refreshes `modified_at`

use assert_matches::assert_matches;
use musicstore_core::error::CoreError;
use musicstore_core::lifecycle::GuardDecision;
use musicstore_core::registry::EntityKind;
use musicstore_db::guard;
use musicstore_db::models::{
    CreateAlbum, CreateArtist, CreateBuilding, CreateCatalog, CreateInventory, CreateLocation,
    CreateProduct, CreateSupplier, Status,
};
use musicstore_db::store::{
    AlbumStore, ArtistStore, BuildingStore, CatalogStore, DependencyStore, InventoryStore,
    LifecycleStore, LocationStore, ProductStore, SupplierStore,
};
use musicstore_db::{MemoryStore, StoreError};
use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_product(id: i64, album_id: i64) -> CreateProduct {
    CreateProduct {
        id,
        name: format!("Product {id}"),
        price: Decimal::new(1499, 2),
        product_type_id: 1,
        catalog_id: 1,
        album_id,
    }
}

fn new_inventory(id: i64, product_id: i64) -> CreateInventory {
    CreateInventory {
        id,
        location_id: 1,
        product_id,
        stock_id: 1,
        quantity: 5,
    }
}

fn new_artist(id: i64, name: &str) -> CreateArtist {
    CreateArtist {
        id,
        name: name.to_string(),
    }
}

fn new_album(id: i64, artist_id: i64) -> CreateAlbum {
    CreateAlbum {
        id,
        name: format!("Album {id}"),
        artist_id,
    }
}

// ---------------------------------------------------------------------------
// Test: a leaf kind deactivates unconditionally
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_deactivate_leaf_flips_status() {
    let store = MemoryStore::new();
    store.create_inventory(&new_inventory(1, 1)).await.unwrap();

    guard::deactivate(&store, EntityKind::Inventory, 1, true)
        .await
        .unwrap();

    let row = store.get_inventory(1).await.unwrap().unwrap();
    assert_eq!(row.status, Status::Inactive);
}

// ---------------------------------------------------------------------------
// Test: active dependents block deactivation in both guard modes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_product_blocked_by_active_inventory_transactional() {
    let store = MemoryStore::new();
    store.create_product(&new_product(1, 1)).await.unwrap();
    store.create_inventory(&new_inventory(1, 1)).await.unwrap();

    let err = guard::deactivate(&store, EntityKind::Product, 1, true)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::DependencyBlocked { reason }) => {
        assert_eq!(
            reason,
            "Cannot deactivate Product: 1 active Inventory record(s) reference it"
        );
    });

    // The row keeps its status.
    let product = store.get_product(1).await.unwrap().unwrap();
    assert_eq!(product.status, Status::Active);
}

#[tokio::test]
async fn test_product_blocked_by_active_inventory_check_then_write() {
    let store = MemoryStore::new();
    store.create_product(&new_product(1, 1)).await.unwrap();
    store.create_inventory(&new_inventory(1, 1)).await.unwrap();

    let err = guard::deactivate(&store, EntityKind::Product, 1, false)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::DependencyBlocked { reason }) => {
        assert_eq!(
            reason,
            "Cannot deactivate Product: 1 active Inventory record(s) reference it"
        );
    });
}

#[tokio::test]
async fn test_blocked_reason_counts_every_active_dependent() {
    let store = MemoryStore::new();
    store.create_product(&new_product(1, 1)).await.unwrap();
    store.create_inventory(&new_inventory(1, 1)).await.unwrap();
    store.create_inventory(&new_inventory(2, 1)).await.unwrap();

    let decision = guard::can_deactivate(&store, EntityKind::Product, 1)
        .await
        .unwrap();
    assert_matches!(decision, GuardDecision::Blocked { reason } => {
        assert_eq!(
            reason,
            "Cannot deactivate Product: 2 active Inventory record(s) reference it"
        );
    });
}

// ---------------------------------------------------------------------------
// Test: deactivating the dependents first unblocks the parent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_product_unblocked_after_inventory_deactivated() {
    let store = MemoryStore::new();
    store.create_product(&new_product(1, 1)).await.unwrap();
    store.create_inventory(&new_inventory(1, 1)).await.unwrap();

    assert_matches!(
        guard::can_deactivate(&store, EntityKind::Product, 1)
            .await
            .unwrap(),
        GuardDecision::Blocked { .. }
    );

    guard::deactivate(&store, EntityKind::Inventory, 1, true)
        .await
        .unwrap();

    assert_eq!(
        guard::can_deactivate(&store, EntityKind::Product, 1)
            .await
            .unwrap(),
        GuardDecision::Allowed
    );
    guard::deactivate(&store, EntityKind::Product, 1, true)
        .await
        .unwrap();
    let product = store.get_product(1).await.unwrap().unwrap();
    assert_eq!(product.status, Status::Inactive);
}

#[tokio::test]
async fn test_building_blocked_then_unblocked_check_then_write() {
    let store = MemoryStore::new();
    store
        .create_building(&CreateBuilding {
            id: 1,
            name: "Main Warehouse".to_string(),
            address: "12 Dock Road".to_string(),
        })
        .await
        .unwrap();
    store
        .create_location(&CreateLocation {
            id: 1,
            name: "Aisle 4".to_string(),
            building_id: 1,
        })
        .await
        .unwrap();

    let err = guard::deactivate(&store, EntityKind::Building, 1, false)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::DependencyBlocked { reason }) => {
        assert_eq!(
            reason,
            "Cannot deactivate Building: 1 active Location record(s) reference it"
        );
    });

    // The location has no inventories, so it deactivates freely.
    guard::deactivate(&store, EntityKind::Location, 1, false)
        .await
        .unwrap();
    guard::deactivate(&store, EntityKind::Building, 1, false)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Test: the artist guard resolves through albums
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_artist_blocked_through_album_products() {
    let store = MemoryStore::new();
    store.create_artist(&new_artist(1, "Miles Davis")).await.unwrap();
    store.create_album(&new_album(1, 1)).await.unwrap();
    store.create_product(&new_product(1, 1)).await.unwrap();

    let err = guard::deactivate(&store, EntityKind::Artist, 1, true)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::DependencyBlocked { reason }) => {
        assert_eq!(
            reason,
            "Cannot deactivate Artist: 1 active Product record(s) reference it via Album"
        );
    });
}

#[tokio::test]
async fn test_artist_guard_ignores_album_status() {
    let store = MemoryStore::new();
    store.create_artist(&new_artist(1, "Miles Davis")).await.unwrap();
    store.create_album(&new_album(1, 1)).await.unwrap();
    store.create_product(&new_product(1, 1)).await.unwrap();

    // Flip the album inactive directly; the walk must still find the
    // product behind it.
    store
        .set_status(EntityKind::Album, 1, Status::Inactive)
        .await
        .unwrap();

    assert_matches!(
        guard::can_deactivate(&store, EntityKind::Artist, 1)
            .await
            .unwrap(),
        GuardDecision::Blocked { .. }
    );
}

#[tokio::test]
async fn test_artist_unblocked_after_product_deactivated() {
    let store = MemoryStore::new();
    store.create_artist(&new_artist(1, "Miles Davis")).await.unwrap();
    store.create_album(&new_album(1, 1)).await.unwrap();
    store.create_product(&new_product(1, 1)).await.unwrap();

    guard::deactivate(&store, EntityKind::Product, 1, true)
        .await
        .unwrap();

    assert_eq!(
        guard::can_deactivate(&store, EntityKind::Artist, 1)
            .await
            .unwrap(),
        GuardDecision::Allowed
    );
}

#[tokio::test]
async fn test_artist_without_albums_deactivates() {
    let store = MemoryStore::new();
    store.create_artist(&new_artist(2, "Unsigned")).await.unwrap();

    guard::deactivate(&store, EntityKind::Artist, 2, false)
        .await
        .unwrap();
    let artist = store.get_artist(2).await.unwrap().unwrap();
    assert_eq!(artist.status, Status::Inactive);
}

// ---------------------------------------------------------------------------
// Test: suppliers have no dependents and never block
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_supplier_always_deactivates() {
    let store = MemoryStore::new();
    store
        .create_supplier(&CreateSupplier {
            id: 1,
            name: "Vinyl Wholesale".to_string(),
            address: "742 Evergreen Terrace".to_string(),
            phone: "555-0100".to_string(),
            email: "orders@example.com".to_string(),
        })
        .await
        .unwrap();

    guard::deactivate(&store, EntityKind::Supplier, 1, true)
        .await
        .unwrap();
    guard::activate(&store, EntityKind::Supplier, 1).await.unwrap();
    guard::deactivate(&store, EntityKind::Supplier, 1, false)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Test: missing rows are reported as NotFound in both modes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_deactivate_missing_returns_not_found() {
    let store = MemoryStore::new();

    let err = guard::deactivate(&store, EntityKind::Product, 404, true)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        StoreError::Core(CoreError::NotFound {
            entity: "Product",
            id: 404
        })
    );

    let err = guard::deactivate(&store, EntityKind::Product, 404, false)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        StoreError::Core(CoreError::NotFound {
            entity: "Product",
            id: 404
        })
    );
}

#[tokio::test]
async fn test_activate_missing_returns_not_found() {
    let store = MemoryStore::new();

    let err = guard::activate(&store, EntityKind::Catalog, 404)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        StoreError::Core(CoreError::NotFound {
            entity: "Catalog",
            id: 404
        })
    );
}

// ---------------------------------------------------------------------------
// Test: lifecycle transitions are idempotent and touch modified_at
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_deactivate_already_inactive_succeeds() {
    let store = MemoryStore::new();
    store
        .create_catalog(&CreateCatalog {
            id: 1,
            name: "Rock".to_string(),
        })
        .await
        .unwrap();

    guard::deactivate(&store, EntityKind::Catalog, 1, true)
        .await
        .unwrap();
    guard::deactivate(&store, EntityKind::Catalog, 1, true)
        .await
        .unwrap();

    let catalog = store.get_catalog(1).await.unwrap().unwrap();
    assert_eq!(catalog.status, Status::Inactive);
}

#[tokio::test]
async fn test_activate_restores_and_touches() {
    let store = MemoryStore::new();
    let created = store
        .create_catalog(&CreateCatalog {
            id: 1,
            name: "Rock".to_string(),
        })
        .await
        .unwrap();

    guard::deactivate(&store, EntityKind::Catalog, 1, true)
        .await
        .unwrap();
    guard::activate(&store, EntityKind::Catalog, 1).await.unwrap();

    let catalog = store.get_catalog(1).await.unwrap().unwrap();
    assert_eq!(catalog.status, Status::Active);
    assert!(catalog.modified_at >= created.modified_at);
}

// ---------------------------------------------------------------------------
// Test: asking about a foreign key no table carries is an internal error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unknown_foreign_key_is_internal_error() {
    let store = MemoryStore::new();

    let err = store
        .count_active_referencing(EntityKind::Supplier, "product_id", &[1])
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Internal(_)));
}
