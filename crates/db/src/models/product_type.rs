//! Product type entity model and DTOs.

use musicstore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::Status;

/// A row from the `product_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductType {
    pub id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub modified_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductType {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductType {
    pub name: String,
}
