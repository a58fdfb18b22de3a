//! Stock entity model and DTOs.

use musicstore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::Status;

/// A row from the `stocks` table: a quantity of one product on hand.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Stock {
    pub id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub modified_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStock {
    pub id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStock {
    pub product_id: DbId,
    pub quantity: i32,
}
