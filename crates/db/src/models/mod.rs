//! Entity models and DTOs.
//!
//! Each submodule defines one row struct plus its `Create*` and `Update*`
//! DTOs. All ten entities share the same lifecycle columns (`status`,
//! `modified_at`); the [`Record`] trait gives the in-memory backend uniform
//! access to them.

pub mod album;
pub mod artist;
pub mod building;
pub mod catalog;
pub mod inventory;
pub mod location;
pub mod product;
pub mod product_type;
pub mod status;
pub mod stock;
pub mod supplier;

pub use album::{Album, CreateAlbum, UpdateAlbum};
pub use artist::{Artist, CreateArtist, UpdateArtist};
pub use building::{Building, CreateBuilding, UpdateBuilding};
pub use catalog::{Catalog, CreateCatalog, UpdateCatalog};
pub use inventory::{CreateInventory, Inventory, UpdateInventory};
pub use location::{CreateLocation, Location, UpdateLocation};
pub use product::{CreateProduct, Product, UpdateProduct};
pub use product_type::{CreateProductType, ProductType, UpdateProductType};
pub use status::Status;
pub use stock::{CreateStock, Stock, UpdateStock};
pub use supplier::{CreateSupplier, Supplier, UpdateSupplier};

use musicstore_core::types::{DbId, Timestamp};

/// Uniform access to the lifecycle columns shared by every entity.
pub trait Record {
    fn id(&self) -> DbId;
    fn status(&self) -> Status;
    fn set_status(&mut self, status: Status);
    fn touch(&mut self, at: Timestamp);
}

macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(impl Record for $ty {
            fn id(&self) -> DbId {
                self.id
            }

            fn status(&self) -> Status {
                self.status
            }

            fn set_status(&mut self, status: Status) {
                self.status = status;
            }

            fn touch(&mut self, at: Timestamp) {
                self.modified_at = at;
            }
        })+
    };
}

impl_record!(
    Album,
    Artist,
    Building,
    Catalog,
    Inventory,
    Location,
    Product,
    ProductType,
    Stock,
    Supplier,
);
