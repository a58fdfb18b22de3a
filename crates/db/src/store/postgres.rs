//! Postgres-backed [`Store`].
//!
//! All queries are built at runtime from per-table column lists, so the
//! crate compiles without a live database. Kind-generic statements
//! interpolate table and column names from the registry constants, never
//! from caller input.

use async_trait::async_trait;
use musicstore_core::error::CoreError;
use musicstore_core::lifecycle::GuardDecision;
use musicstore_core::registry::{self, EntityKind};
use musicstore_core::types::DbId;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::guard;
use crate::models::{
    Album, Artist, Building, Catalog, CreateAlbum, CreateArtist, CreateBuilding, CreateCatalog,
    CreateInventory, CreateLocation, CreateProduct, CreateProductType, CreateStock, CreateSupplier,
    Inventory, Location, Product, ProductType, Status, Stock, Supplier, UpdateAlbum, UpdateArtist,
    UpdateBuilding, UpdateCatalog, UpdateInventory, UpdateLocation, UpdateProduct,
    UpdateProductType, UpdateStock, UpdateSupplier,
};
use crate::store::{
    AlbumStore, ArtistStore, BuildingStore, CatalogStore, DependencyStore, InventoryStore,
    LifecycleStore, LocationStore, ProductStore, ProductTypeStore, StockStore, Store, StoreError,
    StoreResult, SupplierStore,
};

/// Column list for the `products` table.
const PRODUCT_COLUMNS: &str =
    "id, name, price, product_type_id, catalog_id, album_id, status, modified_at";

/// Column list for the `catalogs` table.
const CATALOG_COLUMNS: &str = "id, name, status, modified_at";

/// Column list for the `albums` table.
const ALBUM_COLUMNS: &str = "id, name, artist_id, status, modified_at";

/// Column list for the `artists` table.
const ARTIST_COLUMNS: &str = "id, name, status, modified_at";

/// Column list for the `product_types` table.
const PRODUCT_TYPE_COLUMNS: &str = "id, name, status, modified_at";

/// Column list for the `suppliers` table.
const SUPPLIER_COLUMNS: &str = "id, name, address, phone, email, status, modified_at";

/// Column list for the `buildings` table.
const BUILDING_COLUMNS: &str = "id, name, address, status, modified_at";

/// Column list for the `locations` table.
const LOCATION_COLUMNS: &str = "id, name, building_id, status, modified_at";

/// Column list for the `stocks` table.
const STOCK_COLUMNS: &str = "id, product_id, quantity, status, modified_at";

/// Column list for the `inventories` table.
const INVENTORY_COLUMNS: &str =
    "id, location_id, product_id, stock_id, quantity, status, modified_at";

/// Attempts before a transactional deactivation gives up on a row whose
/// dependents keep flipping under it.
const GUARD_RETRIES: usize = 3;

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to Postgres and wrap the pool in a store.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply any pending migrations from `crates/db/migrations`.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn duplicate(kind: EntityKind, id: DbId) -> StoreError {
    StoreError::Core(CoreError::DuplicateId {
        entity: kind.display(),
        id,
    })
}

/// Builds the one-statement guarded deactivation for `kind`: the UPDATE
/// only lands while no registered dependent holds an active reference, so
/// the decision and the flip cannot be separated by a concurrent write.
fn guarded_deactivate_sql(kind: EntityKind) -> String {
    let table = kind.table();
    let mut sql = format!("UPDATE {table} SET status = 'I', modified_at = NOW() WHERE id = $1");
    for link in registry::dependents_of(kind) {
        let dependent = link.dependent.table();
        let foreign_key = link.foreign_key;
        match &link.via {
            None => {
                sql.push_str(&format!(
                    " AND NOT EXISTS (SELECT 1 FROM {dependent} d \
                     WHERE d.{foreign_key} = {table}.id AND d.status = 'A')"
                ));
            }
            // The hop rows join without a status predicate of their own.
            Some(hop) => {
                let through = hop.through.table();
                let hop_key = hop.foreign_key;
                sql.push_str(&format!(
                    " AND NOT EXISTS (SELECT 1 FROM {dependent} d \
                     JOIN {through} v ON d.{foreign_key} = v.id \
                     WHERE v.{hop_key} = {table}.id AND d.status = 'A')"
                ));
            }
        }
    }
    sql.push_str(" RETURNING id");
    sql
}

#[async_trait]
impl ProductStore for PostgresStore {
    async fn create_product(&self, input: &CreateProduct) -> StoreResult<Product> {
        let query = format!(
            "INSERT INTO products (id, name, price, product_type_id, catalog_id, album_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (id) DO NOTHING \
             RETURNING {PRODUCT_COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.product_type_id)
            .bind(input.catalog_id)
            .bind(input.album_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| duplicate(EntityKind::Product, input.id))
    }

    async fn get_product(&self, id: DbId) -> StoreResult<Option<Product>> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn list_products(&self, status: Option<Status>) -> StoreResult<Vec<Product>> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE status = COALESCE($1, status) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(status.map(Status::code))
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn update_product(&self, id: DbId, input: &UpdateProduct) -> StoreResult<Option<Product>> {
        let query = format!(
            "UPDATE products SET \
                name = $2, \
                price = $3, \
                product_type_id = $4, \
                catalog_id = $5, \
                album_id = $6, \
                modified_at = NOW() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.product_type_id)
            .bind(input.catalog_id)
            .bind(input.album_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl CatalogStore for PostgresStore {
    async fn create_catalog(&self, input: &CreateCatalog) -> StoreResult<Catalog> {
        let query = format!(
            "INSERT INTO catalogs (id, name) VALUES ($1, $2) \
             ON CONFLICT (id) DO NOTHING \
             RETURNING {CATALOG_COLUMNS}"
        );
        sqlx::query_as::<_, Catalog>(&query)
            .bind(input.id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| duplicate(EntityKind::Catalog, input.id))
    }

    async fn get_catalog(&self, id: DbId) -> StoreResult<Option<Catalog>> {
        let query = format!("SELECT {CATALOG_COLUMNS} FROM catalogs WHERE id = $1");
        sqlx::query_as::<_, Catalog>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn list_catalogs(&self, status: Option<Status>) -> StoreResult<Vec<Catalog>> {
        let query = format!(
            "SELECT {CATALOG_COLUMNS} FROM catalogs \
             WHERE status = COALESCE($1, status) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Catalog>(&query)
            .bind(status.map(Status::code))
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn update_catalog(&self, id: DbId, input: &UpdateCatalog) -> StoreResult<Option<Catalog>> {
        let query = format!(
            "UPDATE catalogs SET name = $2, modified_at = NOW() \
             WHERE id = $1 \
             RETURNING {CATALOG_COLUMNS}"
        );
        sqlx::query_as::<_, Catalog>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl AlbumStore for PostgresStore {
    async fn create_album(&self, input: &CreateAlbum) -> StoreResult<Album> {
        let query = format!(
            "INSERT INTO albums (id, name, artist_id) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO NOTHING \
             RETURNING {ALBUM_COLUMNS}"
        );
        sqlx::query_as::<_, Album>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(input.artist_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| duplicate(EntityKind::Album, input.id))
    }

    async fn get_album(&self, id: DbId) -> StoreResult<Option<Album>> {
        let query = format!("SELECT {ALBUM_COLUMNS} FROM albums WHERE id = $1");
        sqlx::query_as::<_, Album>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn list_albums(&self, status: Option<Status>) -> StoreResult<Vec<Album>> {
        let query = format!(
            "SELECT {ALBUM_COLUMNS} FROM albums \
             WHERE status = COALESCE($1, status) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Album>(&query)
            .bind(status.map(Status::code))
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn update_album(&self, id: DbId, input: &UpdateAlbum) -> StoreResult<Option<Album>> {
        let query = format!(
            "UPDATE albums SET name = $2, artist_id = $3, modified_at = NOW() \
             WHERE id = $1 \
             RETURNING {ALBUM_COLUMNS}"
        );
        sqlx::query_as::<_, Album>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.artist_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl ArtistStore for PostgresStore {
    async fn create_artist(&self, input: &CreateArtist) -> StoreResult<Artist> {
        let query = format!(
            "INSERT INTO artists (id, name) VALUES ($1, $2) \
             ON CONFLICT (id) DO NOTHING \
             RETURNING {ARTIST_COLUMNS}"
        );
        sqlx::query_as::<_, Artist>(&query)
            .bind(input.id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| duplicate(EntityKind::Artist, input.id))
    }

    async fn get_artist(&self, id: DbId) -> StoreResult<Option<Artist>> {
        let query = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = $1");
        sqlx::query_as::<_, Artist>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn list_artists(&self, status: Option<Status>) -> StoreResult<Vec<Artist>> {
        let query = format!(
            "SELECT {ARTIST_COLUMNS} FROM artists \
             WHERE status = COALESCE($1, status) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Artist>(&query)
            .bind(status.map(Status::code))
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn update_artist(&self, id: DbId, input: &UpdateArtist) -> StoreResult<Option<Artist>> {
        let query = format!(
            "UPDATE artists SET name = $2, modified_at = NOW() \
             WHERE id = $1 \
             RETURNING {ARTIST_COLUMNS}"
        );
        sqlx::query_as::<_, Artist>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl ProductTypeStore for PostgresStore {
    async fn create_product_type(&self, input: &CreateProductType) -> StoreResult<ProductType> {
        let query = format!(
            "INSERT INTO product_types (id, name) VALUES ($1, $2) \
             ON CONFLICT (id) DO NOTHING \
             RETURNING {PRODUCT_TYPE_COLUMNS}"
        );
        sqlx::query_as::<_, ProductType>(&query)
            .bind(input.id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| duplicate(EntityKind::ProductType, input.id))
    }

    async fn get_product_type(&self, id: DbId) -> StoreResult<Option<ProductType>> {
        let query = format!("SELECT {PRODUCT_TYPE_COLUMNS} FROM product_types WHERE id = $1");
        sqlx::query_as::<_, ProductType>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn list_product_types(&self, status: Option<Status>) -> StoreResult<Vec<ProductType>> {
        let query = format!(
            "SELECT {PRODUCT_TYPE_COLUMNS} FROM product_types \
             WHERE status = COALESCE($1, status) \
             ORDER BY id"
        );
        sqlx::query_as::<_, ProductType>(&query)
            .bind(status.map(Status::code))
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn update_product_type(
        &self,
        id: DbId,
        input: &UpdateProductType,
    ) -> StoreResult<Option<ProductType>> {
        let query = format!(
            "UPDATE product_types SET name = $2, modified_at = NOW() \
             WHERE id = $1 \
             RETURNING {PRODUCT_TYPE_COLUMNS}"
        );
        sqlx::query_as::<_, ProductType>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl SupplierStore for PostgresStore {
    async fn create_supplier(&self, input: &CreateSupplier) -> StoreResult<Supplier> {
        let query = format!(
            "INSERT INTO suppliers (id, name, address, phone, email) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO NOTHING \
             RETURNING {SUPPLIER_COLUMNS}"
        );
        sqlx::query_as::<_, Supplier>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| duplicate(EntityKind::Supplier, input.id))
    }

    async fn get_supplier(&self, id: DbId) -> StoreResult<Option<Supplier>> {
        let query = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = $1");
        sqlx::query_as::<_, Supplier>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn list_suppliers(&self, status: Option<Status>) -> StoreResult<Vec<Supplier>> {
        let query = format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers \
             WHERE status = COALESCE($1, status) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Supplier>(&query)
            .bind(status.map(Status::code))
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn update_supplier(
        &self,
        id: DbId,
        input: &UpdateSupplier,
    ) -> StoreResult<Option<Supplier>> {
        let query = format!(
            "UPDATE suppliers SET \
                name = $2, \
                address = $3, \
                phone = $4, \
                email = $5, \
                modified_at = NOW() \
             WHERE id = $1 \
             RETURNING {SUPPLIER_COLUMNS}"
        );
        sqlx::query_as::<_, Supplier>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl BuildingStore for PostgresStore {
    async fn create_building(&self, input: &CreateBuilding) -> StoreResult<Building> {
        let query = format!(
            "INSERT INTO buildings (id, name, address) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO NOTHING \
             RETURNING {BUILDING_COLUMNS}"
        );
        sqlx::query_as::<_, Building>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.address)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| duplicate(EntityKind::Building, input.id))
    }

    async fn get_building(&self, id: DbId) -> StoreResult<Option<Building>> {
        let query = format!("SELECT {BUILDING_COLUMNS} FROM buildings WHERE id = $1");
        sqlx::query_as::<_, Building>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn list_buildings(&self, status: Option<Status>) -> StoreResult<Vec<Building>> {
        let query = format!(
            "SELECT {BUILDING_COLUMNS} FROM buildings \
             WHERE status = COALESCE($1, status) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Building>(&query)
            .bind(status.map(Status::code))
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn update_building(
        &self,
        id: DbId,
        input: &UpdateBuilding,
    ) -> StoreResult<Option<Building>> {
        let query = format!(
            "UPDATE buildings SET name = $2, address = $3, modified_at = NOW() \
             WHERE id = $1 \
             RETURNING {BUILDING_COLUMNS}"
        );
        sqlx::query_as::<_, Building>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl LocationStore for PostgresStore {
    async fn create_location(&self, input: &CreateLocation) -> StoreResult<Location> {
        let query = format!(
            "INSERT INTO locations (id, name, building_id) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO NOTHING \
             RETURNING {LOCATION_COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(input.building_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| duplicate(EntityKind::Location, input.id))
    }

    async fn get_location(&self, id: DbId) -> StoreResult<Option<Location>> {
        let query = format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn list_locations(&self, status: Option<Status>) -> StoreResult<Vec<Location>> {
        let query = format!(
            "SELECT {LOCATION_COLUMNS} FROM locations \
             WHERE status = COALESCE($1, status) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(status.map(Status::code))
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn update_location(
        &self,
        id: DbId,
        input: &UpdateLocation,
    ) -> StoreResult<Option<Location>> {
        let query = format!(
            "UPDATE locations SET name = $2, building_id = $3, modified_at = NOW() \
             WHERE id = $1 \
             RETURNING {LOCATION_COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.building_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl StockStore for PostgresStore {
    async fn create_stock(&self, input: &CreateStock) -> StoreResult<Stock> {
        let query = format!(
            "INSERT INTO stocks (id, product_id, quantity) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO NOTHING \
             RETURNING {STOCK_COLUMNS}"
        );
        sqlx::query_as::<_, Stock>(&query)
            .bind(input.id)
            .bind(input.product_id)
            .bind(input.quantity)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| duplicate(EntityKind::Stock, input.id))
    }

    async fn get_stock(&self, id: DbId) -> StoreResult<Option<Stock>> {
        let query = format!("SELECT {STOCK_COLUMNS} FROM stocks WHERE id = $1");
        sqlx::query_as::<_, Stock>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn list_stocks(&self, status: Option<Status>) -> StoreResult<Vec<Stock>> {
        let query = format!(
            "SELECT {STOCK_COLUMNS} FROM stocks \
             WHERE status = COALESCE($1, status) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Stock>(&query)
            .bind(status.map(Status::code))
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn update_stock(&self, id: DbId, input: &UpdateStock) -> StoreResult<Option<Stock>> {
        let query = format!(
            "UPDATE stocks SET product_id = $2, quantity = $3, modified_at = NOW() \
             WHERE id = $1 \
             RETURNING {STOCK_COLUMNS}"
        );
        sqlx::query_as::<_, Stock>(&query)
            .bind(id)
            .bind(input.product_id)
            .bind(input.quantity)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl InventoryStore for PostgresStore {
    async fn create_inventory(&self, input: &CreateInventory) -> StoreResult<Inventory> {
        let query = format!(
            "INSERT INTO inventories (id, location_id, product_id, stock_id, quantity) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO NOTHING \
             RETURNING {INVENTORY_COLUMNS}"
        );
        sqlx::query_as::<_, Inventory>(&query)
            .bind(input.id)
            .bind(input.location_id)
            .bind(input.product_id)
            .bind(input.stock_id)
            .bind(input.quantity)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| duplicate(EntityKind::Inventory, input.id))
    }

    async fn get_inventory(&self, id: DbId) -> StoreResult<Option<Inventory>> {
        let query = format!("SELECT {INVENTORY_COLUMNS} FROM inventories WHERE id = $1");
        sqlx::query_as::<_, Inventory>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn list_inventories(&self, status: Option<Status>) -> StoreResult<Vec<Inventory>> {
        let query = format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventories \
             WHERE status = COALESCE($1, status) \
             ORDER BY id"
        );
        sqlx::query_as::<_, Inventory>(&query)
            .bind(status.map(Status::code))
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn update_inventory(
        &self,
        id: DbId,
        input: &UpdateInventory,
    ) -> StoreResult<Option<Inventory>> {
        let query = format!(
            "UPDATE inventories SET \
                location_id = $2, \
                product_id = $3, \
                stock_id = $4, \
                quantity = $5, \
                modified_at = NOW() \
             WHERE id = $1 \
             RETURNING {INVENTORY_COLUMNS}"
        );
        sqlx::query_as::<_, Inventory>(&query)
            .bind(id)
            .bind(input.location_id)
            .bind(input.product_id)
            .bind(input.stock_id)
            .bind(input.quantity)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl LifecycleStore for PostgresStore {
    async fn exists(&self, kind: EntityKind, id: DbId) -> StoreResult<bool> {
        let query = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)", kind.table());
        let present: bool = sqlx::query_scalar(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(present)
    }

    async fn set_status(&self, kind: EntityKind, id: DbId, status: Status) -> StoreResult<bool> {
        let query = format!(
            "UPDATE {} SET status = $2, modified_at = NOW() WHERE id = $1",
            kind.table()
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(status.code())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn deactivate_guarded(&self, kind: EntityKind, id: DbId) -> StoreResult<()> {
        let query = guarded_deactivate_sql(kind);
        for _ in 0..GUARD_RETRIES {
            let flipped: Option<DbId> = sqlx::query_scalar(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            if flipped.is_some() {
                return Ok(());
            }

            // The row is missing or a dependent blocked the update. Re-run
            // the walk to find out which, and with what reason.
            match guard::can_deactivate(self, kind, id).await? {
                GuardDecision::Blocked { reason } => {
                    return Err(CoreError::DependencyBlocked { reason }.into());
                }
                // The blocking dependent went away between the update and
                // the re-check. Take another swing.
                GuardDecision::Allowed => {}
            }
        }
        Err(CoreError::Internal(format!(
            "deactivation of {} {id} kept racing its dependency check",
            kind.display()
        ))
        .into())
    }
}

#[async_trait]
impl DependencyStore for PostgresStore {
    async fn referencing_ids(
        &self,
        kind: EntityKind,
        foreign_key: &str,
        id: DbId,
    ) -> StoreResult<Vec<DbId>> {
        let query = format!(
            "SELECT id FROM {} WHERE {} = $1 ORDER BY id",
            kind.table(),
            foreign_key
        );
        sqlx::query_scalar(&query)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(Into::into)
    }

    async fn count_active_referencing(
        &self,
        kind: EntityKind,
        foreign_key: &str,
        ids: &[DbId],
    ) -> StoreResult<i64> {
        let query = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ANY($1) AND status = 'A'",
            kind.table(),
            foreign_key
        );
        sqlx::query_scalar(&query)
            .bind(ids)
            .fetch_one(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
