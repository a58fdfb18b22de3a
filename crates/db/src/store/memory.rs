//! In-memory [`Store`] used by the test suite and by the server when no
//! database is configured.
//!
//! One `RwLock` covers all ten tables. That is coarse, but it lets the
//! guarded deactivation hold a single write lock across the dependency
//! walk and the status flip, which is the whole point of the transactional
//! variant.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use musicstore_core::error::CoreError;
use musicstore_core::lifecycle::GuardDecision;
use musicstore_core::registry::{self, EntityKind};
use musicstore_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::{
    Album, Artist, Building, Catalog, CreateAlbum, CreateArtist, CreateBuilding, CreateCatalog,
    CreateInventory, CreateLocation, CreateProduct, CreateProductType, CreateStock, CreateSupplier,
    Inventory, Location, Product, ProductType, Record, Status, Stock, Supplier, UpdateAlbum,
    UpdateArtist, UpdateBuilding, UpdateCatalog, UpdateInventory, UpdateLocation, UpdateProduct,
    UpdateProductType, UpdateStock, UpdateSupplier,
};
use crate::store::{
    AlbumStore, ArtistStore, BuildingStore, CatalogStore, DependencyStore, InventoryStore,
    LifecycleStore, LocationStore, ProductStore, ProductTypeStore, StockStore, Store, StoreResult,
    SupplierStore,
};

#[derive(Debug, Default)]
struct Tables {
    products: HashMap<DbId, Product>,
    catalogs: HashMap<DbId, Catalog>,
    albums: HashMap<DbId, Album>,
    artists: HashMap<DbId, Artist>,
    product_types: HashMap<DbId, ProductType>,
    suppliers: HashMap<DbId, Supplier>,
    buildings: HashMap<DbId, Building>,
    locations: HashMap<DbId, Location>,
    stocks: HashMap<DbId, Stock>,
    inventories: HashMap<DbId, Inventory>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn insert_new<T: Record + Clone>(
    table: &mut HashMap<DbId, T>,
    kind: EntityKind,
    record: T,
) -> StoreResult<T> {
    if table.contains_key(&record.id()) {
        return Err(CoreError::DuplicateId {
            entity: kind.display(),
            id: record.id(),
        }
        .into());
    }
    table.insert(record.id(), record.clone());
    Ok(record)
}

fn list_by_status<T: Record + Clone>(table: &HashMap<DbId, T>, status: Option<Status>) -> Vec<T> {
    let mut rows: Vec<T> = table
        .values()
        .filter(|r| status.map_or(true, |s| r.status() == s))
        .cloned()
        .collect();
    rows.sort_by_key(|r| r.id());
    rows
}

fn ids_where<T: Record>(table: &HashMap<DbId, T>, matches: impl Fn(&T) -> bool) -> Vec<DbId> {
    let mut ids: Vec<DbId> = table
        .values()
        .filter(|r| matches(r))
        .map(|r| r.id())
        .collect();
    ids.sort_unstable();
    ids
}

fn count_active<T: Record>(
    table: &HashMap<DbId, T>,
    ids: &[DbId],
    foreign_key: impl Fn(&T) -> DbId,
) -> i64 {
    table
        .values()
        .filter(|r| r.status().is_active() && ids.contains(&foreign_key(r)))
        .count() as i64
}

impl Tables {
    fn contains(&self, kind: EntityKind, id: DbId) -> bool {
        match kind {
            EntityKind::Product => self.products.contains_key(&id),
            EntityKind::Catalog => self.catalogs.contains_key(&id),
            EntityKind::Album => self.albums.contains_key(&id),
            EntityKind::Artist => self.artists.contains_key(&id),
            EntityKind::ProductType => self.product_types.contains_key(&id),
            EntityKind::Supplier => self.suppliers.contains_key(&id),
            EntityKind::Building => self.buildings.contains_key(&id),
            EntityKind::Location => self.locations.contains_key(&id),
            EntityKind::Stock => self.stocks.contains_key(&id),
            EntityKind::Inventory => self.inventories.contains_key(&id),
        }
    }

    fn write_status(&mut self, kind: EntityKind, id: DbId, status: Status) -> bool {
        fn apply<T: Record>(table: &mut HashMap<DbId, T>, id: DbId, status: Status) -> bool {
            match table.get_mut(&id) {
                Some(record) => {
                    record.set_status(status);
                    record.touch(Utc::now());
                    true
                }
                None => false,
            }
        }

        match kind {
            EntityKind::Product => apply(&mut self.products, id, status),
            EntityKind::Catalog => apply(&mut self.catalogs, id, status),
            EntityKind::Album => apply(&mut self.albums, id, status),
            EntityKind::Artist => apply(&mut self.artists, id, status),
            EntityKind::ProductType => apply(&mut self.product_types, id, status),
            EntityKind::Supplier => apply(&mut self.suppliers, id, status),
            EntityKind::Building => apply(&mut self.buildings, id, status),
            EntityKind::Location => apply(&mut self.locations, id, status),
            EntityKind::Stock => apply(&mut self.stocks, id, status),
            EntityKind::Inventory => apply(&mut self.inventories, id, status),
        }
    }

    /// Synchronous twin of the guard walk, runnable while a write lock on
    /// the tables is already held.
    fn decide(&self, kind: EntityKind, id: DbId) -> StoreResult<GuardDecision> {
        for link in registry::dependents_of(kind) {
            let count = match &link.via {
                None => self.count_active_in(link.dependent, link.foreign_key, &[id])?,
                Some(hop) => {
                    let through_ids = self.collect_ids(hop.through, hop.foreign_key, id)?;
                    if through_ids.is_empty() {
                        continue;
                    }
                    self.count_active_in(link.dependent, link.foreign_key, &through_ids)?
                }
            };
            if count > 0 {
                return Ok(GuardDecision::blocked(kind, link, count));
            }
        }
        Ok(GuardDecision::Allowed)
    }

    fn collect_ids(&self, kind: EntityKind, foreign_key: &str, id: DbId) -> StoreResult<Vec<DbId>> {
        let ids = match (kind, foreign_key) {
            (EntityKind::Album, "artist_id") => ids_where(&self.albums, |a| a.artist_id == id),
            (EntityKind::Product, "catalog_id") => {
                ids_where(&self.products, |p| p.catalog_id == id)
            }
            (EntityKind::Product, "album_id") => ids_where(&self.products, |p| p.album_id == id),
            (EntityKind::Product, "product_type_id") => {
                ids_where(&self.products, |p| p.product_type_id == id)
            }
            (EntityKind::Stock, "product_id") => ids_where(&self.stocks, |s| s.product_id == id),
            (EntityKind::Location, "building_id") => {
                ids_where(&self.locations, |l| l.building_id == id)
            }
            (EntityKind::Inventory, "product_id") => {
                ids_where(&self.inventories, |i| i.product_id == id)
            }
            (EntityKind::Inventory, "location_id") => {
                ids_where(&self.inventories, |i| i.location_id == id)
            }
            (EntityKind::Inventory, "stock_id") => {
                ids_where(&self.inventories, |i| i.stock_id == id)
            }
            _ => {
                return Err(CoreError::Internal(format!(
                    "no foreign key {foreign_key} registered on {}",
                    kind.display()
                ))
                .into())
            }
        };
        Ok(ids)
    }

    fn count_active_in(
        &self,
        kind: EntityKind,
        foreign_key: &str,
        ids: &[DbId],
    ) -> StoreResult<i64> {
        let count = match (kind, foreign_key) {
            (EntityKind::Album, "artist_id") => count_active(&self.albums, ids, |a| a.artist_id),
            (EntityKind::Product, "catalog_id") => {
                count_active(&self.products, ids, |p| p.catalog_id)
            }
            (EntityKind::Product, "album_id") => count_active(&self.products, ids, |p| p.album_id),
            (EntityKind::Product, "product_type_id") => {
                count_active(&self.products, ids, |p| p.product_type_id)
            }
            (EntityKind::Stock, "product_id") => count_active(&self.stocks, ids, |s| s.product_id),
            (EntityKind::Location, "building_id") => {
                count_active(&self.locations, ids, |l| l.building_id)
            }
            (EntityKind::Inventory, "product_id") => {
                count_active(&self.inventories, ids, |i| i.product_id)
            }
            (EntityKind::Inventory, "location_id") => {
                count_active(&self.inventories, ids, |i| i.location_id)
            }
            (EntityKind::Inventory, "stock_id") => {
                count_active(&self.inventories, ids, |i| i.stock_id)
            }
            _ => {
                return Err(CoreError::Internal(format!(
                    "no foreign key {foreign_key} registered on {}",
                    kind.display()
                ))
                .into())
            }
        };
        Ok(count)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn create_product(&self, input: &CreateProduct) -> StoreResult<Product> {
        let mut tables = self.tables.write().await;
        let product = Product {
            id: input.id,
            name: input.name.clone(),
            price: input.price,
            product_type_id: input.product_type_id,
            catalog_id: input.catalog_id,
            album_id: input.album_id,
            status: Status::Active,
            modified_at: Utc::now(),
        };
        insert_new(&mut tables.products, EntityKind::Product, product)
    }

    async fn get_product(&self, id: DbId) -> StoreResult<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products.get(&id).cloned())
    }

    async fn list_products(&self, status: Option<Status>) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(list_by_status(&tables.products, status))
    }

    async fn update_product(&self, id: DbId, input: &UpdateProduct) -> StoreResult<Option<Product>> {
        let mut tables = self.tables.write().await;
        let Some(product) = tables.products.get_mut(&id) else {
            return Ok(None);
        };
        product.name = input.name.clone();
        product.price = input.price;
        product.product_type_id = input.product_type_id;
        product.catalog_id = input.catalog_id;
        product.album_id = input.album_id;
        product.touch(Utc::now());
        Ok(Some(product.clone()))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn create_catalog(&self, input: &CreateCatalog) -> StoreResult<Catalog> {
        let mut tables = self.tables.write().await;
        let catalog = Catalog {
            id: input.id,
            name: input.name.clone(),
            status: Status::Active,
            modified_at: Utc::now(),
        };
        insert_new(&mut tables.catalogs, EntityKind::Catalog, catalog)
    }

    async fn get_catalog(&self, id: DbId) -> StoreResult<Option<Catalog>> {
        let tables = self.tables.read().await;
        Ok(tables.catalogs.get(&id).cloned())
    }

    async fn list_catalogs(&self, status: Option<Status>) -> StoreResult<Vec<Catalog>> {
        let tables = self.tables.read().await;
        Ok(list_by_status(&tables.catalogs, status))
    }

    async fn update_catalog(&self, id: DbId, input: &UpdateCatalog) -> StoreResult<Option<Catalog>> {
        let mut tables = self.tables.write().await;
        let Some(catalog) = tables.catalogs.get_mut(&id) else {
            return Ok(None);
        };
        catalog.name = input.name.clone();
        catalog.touch(Utc::now());
        Ok(Some(catalog.clone()))
    }
}

#[async_trait]
impl AlbumStore for MemoryStore {
    async fn create_album(&self, input: &CreateAlbum) -> StoreResult<Album> {
        let mut tables = self.tables.write().await;
        let album = Album {
            id: input.id,
            name: input.name.clone(),
            artist_id: input.artist_id,
            status: Status::Active,
            modified_at: Utc::now(),
        };
        insert_new(&mut tables.albums, EntityKind::Album, album)
    }

    async fn get_album(&self, id: DbId) -> StoreResult<Option<Album>> {
        let tables = self.tables.read().await;
        Ok(tables.albums.get(&id).cloned())
    }

    async fn list_albums(&self, status: Option<Status>) -> StoreResult<Vec<Album>> {
        let tables = self.tables.read().await;
        Ok(list_by_status(&tables.albums, status))
    }

    async fn update_album(&self, id: DbId, input: &UpdateAlbum) -> StoreResult<Option<Album>> {
        let mut tables = self.tables.write().await;
        let Some(album) = tables.albums.get_mut(&id) else {
            return Ok(None);
        };
        album.name = input.name.clone();
        album.artist_id = input.artist_id;
        album.touch(Utc::now());
        Ok(Some(album.clone()))
    }
}

#[async_trait]
impl ArtistStore for MemoryStore {
    async fn create_artist(&self, input: &CreateArtist) -> StoreResult<Artist> {
        let mut tables = self.tables.write().await;
        let artist = Artist {
            id: input.id,
            name: input.name.clone(),
            status: Status::Active,
            modified_at: Utc::now(),
        };
        insert_new(&mut tables.artists, EntityKind::Artist, artist)
    }

    async fn get_artist(&self, id: DbId) -> StoreResult<Option<Artist>> {
        let tables = self.tables.read().await;
        Ok(tables.artists.get(&id).cloned())
    }

    async fn list_artists(&self, status: Option<Status>) -> StoreResult<Vec<Artist>> {
        let tables = self.tables.read().await;
        Ok(list_by_status(&tables.artists, status))
    }

    async fn update_artist(&self, id: DbId, input: &UpdateArtist) -> StoreResult<Option<Artist>> {
        let mut tables = self.tables.write().await;
        let Some(artist) = tables.artists.get_mut(&id) else {
            return Ok(None);
        };
        artist.name = input.name.clone();
        artist.touch(Utc::now());
        Ok(Some(artist.clone()))
    }
}

#[async_trait]
impl ProductTypeStore for MemoryStore {
    async fn create_product_type(&self, input: &CreateProductType) -> StoreResult<ProductType> {
        let mut tables = self.tables.write().await;
        let product_type = ProductType {
            id: input.id,
            name: input.name.clone(),
            status: Status::Active,
            modified_at: Utc::now(),
        };
        insert_new(&mut tables.product_types, EntityKind::ProductType, product_type)
    }

    async fn get_product_type(&self, id: DbId) -> StoreResult<Option<ProductType>> {
        let tables = self.tables.read().await;
        Ok(tables.product_types.get(&id).cloned())
    }

    async fn list_product_types(&self, status: Option<Status>) -> StoreResult<Vec<ProductType>> {
        let tables = self.tables.read().await;
        Ok(list_by_status(&tables.product_types, status))
    }

    async fn update_product_type(
        &self,
        id: DbId,
        input: &UpdateProductType,
    ) -> StoreResult<Option<ProductType>> {
        let mut tables = self.tables.write().await;
        let Some(product_type) = tables.product_types.get_mut(&id) else {
            return Ok(None);
        };
        product_type.name = input.name.clone();
        product_type.touch(Utc::now());
        Ok(Some(product_type.clone()))
    }
}

#[async_trait]
impl SupplierStore for MemoryStore {
    async fn create_supplier(&self, input: &CreateSupplier) -> StoreResult<Supplier> {
        let mut tables = self.tables.write().await;
        let supplier = Supplier {
            id: input.id,
            name: input.name.clone(),
            address: input.address.clone(),
            phone: input.phone.clone(),
            email: input.email.clone(),
            status: Status::Active,
            modified_at: Utc::now(),
        };
        insert_new(&mut tables.suppliers, EntityKind::Supplier, supplier)
    }

    async fn get_supplier(&self, id: DbId) -> StoreResult<Option<Supplier>> {
        let tables = self.tables.read().await;
        Ok(tables.suppliers.get(&id).cloned())
    }

    async fn list_suppliers(&self, status: Option<Status>) -> StoreResult<Vec<Supplier>> {
        let tables = self.tables.read().await;
        Ok(list_by_status(&tables.suppliers, status))
    }

    async fn update_supplier(
        &self,
        id: DbId,
        input: &UpdateSupplier,
    ) -> StoreResult<Option<Supplier>> {
        let mut tables = self.tables.write().await;
        let Some(supplier) = tables.suppliers.get_mut(&id) else {
            return Ok(None);
        };
        supplier.name = input.name.clone();
        supplier.address = input.address.clone();
        supplier.phone = input.phone.clone();
        supplier.email = input.email.clone();
        supplier.touch(Utc::now());
        Ok(Some(supplier.clone()))
    }
}

#[async_trait]
impl BuildingStore for MemoryStore {
    async fn create_building(&self, input: &CreateBuilding) -> StoreResult<Building> {
        let mut tables = self.tables.write().await;
        let building = Building {
            id: input.id,
            name: input.name.clone(),
            address: input.address.clone(),
            status: Status::Active,
            modified_at: Utc::now(),
        };
        insert_new(&mut tables.buildings, EntityKind::Building, building)
    }

    async fn get_building(&self, id: DbId) -> StoreResult<Option<Building>> {
        let tables = self.tables.read().await;
        Ok(tables.buildings.get(&id).cloned())
    }

    async fn list_buildings(&self, status: Option<Status>) -> StoreResult<Vec<Building>> {
        let tables = self.tables.read().await;
        Ok(list_by_status(&tables.buildings, status))
    }

    async fn update_building(
        &self,
        id: DbId,
        input: &UpdateBuilding,
    ) -> StoreResult<Option<Building>> {
        let mut tables = self.tables.write().await;
        let Some(building) = tables.buildings.get_mut(&id) else {
            return Ok(None);
        };
        building.name = input.name.clone();
        building.address = input.address.clone();
        building.touch(Utc::now());
        Ok(Some(building.clone()))
    }
}

#[async_trait]
impl LocationStore for MemoryStore {
    async fn create_location(&self, input: &CreateLocation) -> StoreResult<Location> {
        let mut tables = self.tables.write().await;
        let location = Location {
            id: input.id,
            name: input.name.clone(),
            building_id: input.building_id,
            status: Status::Active,
            modified_at: Utc::now(),
        };
        insert_new(&mut tables.locations, EntityKind::Location, location)
    }

    async fn get_location(&self, id: DbId) -> StoreResult<Option<Location>> {
        let tables = self.tables.read().await;
        Ok(tables.locations.get(&id).cloned())
    }

    async fn list_locations(&self, status: Option<Status>) -> StoreResult<Vec<Location>> {
        let tables = self.tables.read().await;
        Ok(list_by_status(&tables.locations, status))
    }

    async fn update_location(
        &self,
        id: DbId,
        input: &UpdateLocation,
    ) -> StoreResult<Option<Location>> {
        let mut tables = self.tables.write().await;
        let Some(location) = tables.locations.get_mut(&id) else {
            return Ok(None);
        };
        location.name = input.name.clone();
        location.building_id = input.building_id;
        location.touch(Utc::now());
        Ok(Some(location.clone()))
    }
}

#[async_trait]
impl StockStore for MemoryStore {
    async fn create_stock(&self, input: &CreateStock) -> StoreResult<Stock> {
        let mut tables = self.tables.write().await;
        let stock = Stock {
            id: input.id,
            product_id: input.product_id,
            quantity: input.quantity,
            status: Status::Active,
            modified_at: Utc::now(),
        };
        insert_new(&mut tables.stocks, EntityKind::Stock, stock)
    }

    async fn get_stock(&self, id: DbId) -> StoreResult<Option<Stock>> {
        let tables = self.tables.read().await;
        Ok(tables.stocks.get(&id).cloned())
    }

    async fn list_stocks(&self, status: Option<Status>) -> StoreResult<Vec<Stock>> {
        let tables = self.tables.read().await;
        Ok(list_by_status(&tables.stocks, status))
    }

    async fn update_stock(&self, id: DbId, input: &UpdateStock) -> StoreResult<Option<Stock>> {
        let mut tables = self.tables.write().await;
        let Some(stock) = tables.stocks.get_mut(&id) else {
            return Ok(None);
        };
        stock.product_id = input.product_id;
        stock.quantity = input.quantity;
        stock.touch(Utc::now());
        Ok(Some(stock.clone()))
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn create_inventory(&self, input: &CreateInventory) -> StoreResult<Inventory> {
        let mut tables = self.tables.write().await;
        let inventory = Inventory {
            id: input.id,
            location_id: input.location_id,
            product_id: input.product_id,
            stock_id: input.stock_id,
            quantity: input.quantity,
            status: Status::Active,
            modified_at: Utc::now(),
        };
        insert_new(&mut tables.inventories, EntityKind::Inventory, inventory)
    }

    async fn get_inventory(&self, id: DbId) -> StoreResult<Option<Inventory>> {
        let tables = self.tables.read().await;
        Ok(tables.inventories.get(&id).cloned())
    }

    async fn list_inventories(&self, status: Option<Status>) -> StoreResult<Vec<Inventory>> {
        let tables = self.tables.read().await;
        Ok(list_by_status(&tables.inventories, status))
    }

    async fn update_inventory(
        &self,
        id: DbId,
        input: &UpdateInventory,
    ) -> StoreResult<Option<Inventory>> {
        let mut tables = self.tables.write().await;
        let Some(inventory) = tables.inventories.get_mut(&id) else {
            return Ok(None);
        };
        inventory.location_id = input.location_id;
        inventory.product_id = input.product_id;
        inventory.stock_id = input.stock_id;
        inventory.quantity = input.quantity;
        inventory.touch(Utc::now());
        Ok(Some(inventory.clone()))
    }
}

#[async_trait]
impl LifecycleStore for MemoryStore {
    async fn exists(&self, kind: EntityKind, id: DbId) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.contains(kind, id))
    }

    async fn set_status(&self, kind: EntityKind, id: DbId, status: Status) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.write_status(kind, id, status))
    }

    async fn deactivate_guarded(&self, kind: EntityKind, id: DbId) -> StoreResult<()> {
        // One write lock covers the decision and the flip, so no dependent
        // can be created in between.
        let mut tables = self.tables.write().await;
        if !tables.contains(kind, id) {
            return Err(CoreError::NotFound {
                entity: kind.display(),
                id,
            }
            .into());
        }
        match tables.decide(kind, id)? {
            GuardDecision::Allowed => {
                tables.write_status(kind, id, Status::Inactive);
                Ok(())
            }
            GuardDecision::Blocked { reason } => {
                Err(CoreError::DependencyBlocked { reason }.into())
            }
        }
    }
}

#[async_trait]
impl DependencyStore for MemoryStore {
    async fn referencing_ids(
        &self,
        kind: EntityKind,
        foreign_key: &str,
        id: DbId,
    ) -> StoreResult<Vec<DbId>> {
        let tables = self.tables.read().await;
        tables.collect_ids(kind, foreign_key, id)
    }

    async fn count_active_referencing(
        &self,
        kind: EntityKind,
        foreign_key: &str,
        ids: &[DbId],
    ) -> StoreResult<i64> {
        let tables = self.tables.read().await;
        tables.count_active_in(kind, foreign_key, ids)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
