//! Product entity model and DTOs.

use musicstore_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::Status;

/// A row from the `products` table.
///
/// The type/catalog/album references are plain columns: nothing verifies
/// they point at existing rows on create or update.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub price: Decimal,
    pub product_type_id: DbId,
    pub catalog_id: DbId,
    pub album_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub modified_at: Timestamp,
}

/// DTO for creating a product. The id is caller-supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub id: DbId,
    pub name: String,
    pub price: Decimal,
    pub product_type_id: DbId,
    pub catalog_id: DbId,
    pub album_id: DbId,
}

/// DTO for a full product update. Every mutable field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProduct {
    pub name: String,
    pub price: Decimal,
    pub product_type_id: DbId,
    pub catalog_id: DbId,
    pub album_id: DbId,
}
