//! Building entity model and DTOs.

use musicstore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::Status;

/// A row from the `buildings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Building {
    pub id: DbId,
    pub name: String,
    pub address: String,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub modified_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBuilding {
    pub id: DbId,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBuilding {
    pub name: String,
    pub address: String,
}
