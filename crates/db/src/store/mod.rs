//! Storage backends.
//!
//! The API talks to a [`Store`] trait object so the same handlers run
//! against Postgres in production and the in-memory backend in tests (or
//! when no `DATABASE_URL` is configured). Each entity gets its own small
//! sub-trait; [`Store`] glues them together with the lifecycle and
//! dependency lookups the deactivation guard needs.

use async_trait::async_trait;
use musicstore_core::error::CoreError;
use musicstore_core::registry::EntityKind;
use musicstore_core::types::DbId;

use crate::models::{
    Album, Artist, Building, Catalog, CreateAlbum, CreateArtist, CreateBuilding, CreateCatalog,
    CreateInventory, CreateLocation, CreateProduct, CreateProductType, CreateStock, CreateSupplier,
    Inventory, Location, Product, ProductType, Status, Stock, Supplier, UpdateAlbum, UpdateArtist,
    UpdateBuilding, UpdateCatalog, UpdateInventory, UpdateLocation, UpdateProduct,
    UpdateProductType, UpdateStock, UpdateSupplier,
};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Errors surfaced by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts a new product with the caller-supplied id. Fails with
    /// [`CoreError::DuplicateId`] when the id is already taken.
    async fn create_product(&self, input: &CreateProduct) -> StoreResult<Product>;
    async fn get_product(&self, id: DbId) -> StoreResult<Option<Product>>;
    /// Lists products ordered by id, optionally restricted to one status.
    async fn list_products(&self, status: Option<Status>) -> StoreResult<Vec<Product>>;
    /// Overwrites every mutable field and refreshes `modified_at`. Returns
    /// `None` when no row has the given id.
    async fn update_product(&self, id: DbId, input: &UpdateProduct) -> StoreResult<Option<Product>>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn create_catalog(&self, input: &CreateCatalog) -> StoreResult<Catalog>;
    async fn get_catalog(&self, id: DbId) -> StoreResult<Option<Catalog>>;
    async fn list_catalogs(&self, status: Option<Status>) -> StoreResult<Vec<Catalog>>;
    async fn update_catalog(&self, id: DbId, input: &UpdateCatalog) -> StoreResult<Option<Catalog>>;
}

#[async_trait]
pub trait AlbumStore: Send + Sync {
    async fn create_album(&self, input: &CreateAlbum) -> StoreResult<Album>;
    async fn get_album(&self, id: DbId) -> StoreResult<Option<Album>>;
    async fn list_albums(&self, status: Option<Status>) -> StoreResult<Vec<Album>>;
    async fn update_album(&self, id: DbId, input: &UpdateAlbum) -> StoreResult<Option<Album>>;
}

#[async_trait]
pub trait ArtistStore: Send + Sync {
    async fn create_artist(&self, input: &CreateArtist) -> StoreResult<Artist>;
    async fn get_artist(&self, id: DbId) -> StoreResult<Option<Artist>>;
    async fn list_artists(&self, status: Option<Status>) -> StoreResult<Vec<Artist>>;
    async fn update_artist(&self, id: DbId, input: &UpdateArtist) -> StoreResult<Option<Artist>>;
}

#[async_trait]
pub trait ProductTypeStore: Send + Sync {
    async fn create_product_type(&self, input: &CreateProductType) -> StoreResult<ProductType>;
    async fn get_product_type(&self, id: DbId) -> StoreResult<Option<ProductType>>;
    async fn list_product_types(&self, status: Option<Status>) -> StoreResult<Vec<ProductType>>;
    async fn update_product_type(
        &self,
        id: DbId,
        input: &UpdateProductType,
    ) -> StoreResult<Option<ProductType>>;
}

#[async_trait]
pub trait SupplierStore: Send + Sync {
    async fn create_supplier(&self, input: &CreateSupplier) -> StoreResult<Supplier>;
    async fn get_supplier(&self, id: DbId) -> StoreResult<Option<Supplier>>;
    async fn list_suppliers(&self, status: Option<Status>) -> StoreResult<Vec<Supplier>>;
    async fn update_supplier(
        &self,
        id: DbId,
        input: &UpdateSupplier,
    ) -> StoreResult<Option<Supplier>>;
}

#[async_trait]
pub trait BuildingStore: Send + Sync {
    async fn create_building(&self, input: &CreateBuilding) -> StoreResult<Building>;
    async fn get_building(&self, id: DbId) -> StoreResult<Option<Building>>;
    async fn list_buildings(&self, status: Option<Status>) -> StoreResult<Vec<Building>>;
    async fn update_building(
        &self,
        id: DbId,
        input: &UpdateBuilding,
    ) -> StoreResult<Option<Building>>;
}

#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn create_location(&self, input: &CreateLocation) -> StoreResult<Location>;
    async fn get_location(&self, id: DbId) -> StoreResult<Option<Location>>;
    async fn list_locations(&self, status: Option<Status>) -> StoreResult<Vec<Location>>;
    async fn update_location(
        &self,
        id: DbId,
        input: &UpdateLocation,
    ) -> StoreResult<Option<Location>>;
}

#[async_trait]
pub trait StockStore: Send + Sync {
    async fn create_stock(&self, input: &CreateStock) -> StoreResult<Stock>;
    async fn get_stock(&self, id: DbId) -> StoreResult<Option<Stock>>;
    async fn list_stocks(&self, status: Option<Status>) -> StoreResult<Vec<Stock>>;
    async fn update_stock(&self, id: DbId, input: &UpdateStock) -> StoreResult<Option<Stock>>;
}

#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn create_inventory(&self, input: &CreateInventory) -> StoreResult<Inventory>;
    async fn get_inventory(&self, id: DbId) -> StoreResult<Option<Inventory>>;
    async fn list_inventories(&self, status: Option<Status>) -> StoreResult<Vec<Inventory>>;
    async fn update_inventory(
        &self,
        id: DbId,
        input: &UpdateInventory,
    ) -> StoreResult<Option<Inventory>>;
}

/// Status flips and existence checks, uniform across entity kinds.
#[async_trait]
pub trait LifecycleStore: Send + Sync {
    async fn exists(&self, kind: EntityKind, id: DbId) -> StoreResult<bool>;

    /// Sets the row's status and refreshes `modified_at`. Returns `false`
    /// when no row has the given id.
    async fn set_status(&self, kind: EntityKind, id: DbId, status: Status) -> StoreResult<bool>;

    /// Deactivates the row only if no active dependent references it,
    /// deciding and flipping in one step so a dependent created between
    /// check and write cannot slip through.
    async fn deactivate_guarded(&self, kind: EntityKind, id: DbId) -> StoreResult<()>;
}

/// Reverse-reference lookups backing the deactivation guard.
#[async_trait]
pub trait DependencyStore: Send + Sync {
    /// Ids of all `kind` rows whose `foreign_key` column equals `id`,
    /// regardless of their status.
    async fn referencing_ids(
        &self,
        kind: EntityKind,
        foreign_key: &str,
        id: DbId,
    ) -> StoreResult<Vec<DbId>>;

    /// Number of active `kind` rows whose `foreign_key` column is in `ids`.
    async fn count_active_referencing(
        &self,
        kind: EntityKind,
        foreign_key: &str,
        ids: &[DbId],
    ) -> StoreResult<i64>;
}

#[async_trait]
pub trait Store:
    ProductStore
    + CatalogStore
    + AlbumStore
    + ArtistStore
    + ProductTypeStore
    + SupplierStore
    + BuildingStore
    + LocationStore
    + StockStore
    + InventoryStore
    + LifecycleStore
    + DependencyStore
{
    async fn health_check(&self) -> StoreResult<()>;
}
