//! Inventory entity model and DTOs.
//!
//! An inventory entry ties a product and a stock record to a physical
//! location. Nothing references inventories in turn, so deactivating one
//! always succeeds.

use musicstore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::Status;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inventory {
    pub id: DbId,
    pub location_id: DbId,
    pub product_id: DbId,
    pub stock_id: DbId,
    pub quantity: i32,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub modified_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInventory {
    pub id: DbId,
    pub location_id: DbId,
    pub product_id: DbId,
    pub stock_id: DbId,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInventory {
    pub location_id: DbId,
    pub product_id: DbId,
    pub stock_id: DbId,
    pub quantity: i32,
}
