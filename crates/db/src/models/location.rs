//! Location entity model and DTOs.

use musicstore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::Status;

/// A row from the `locations` table. A location belongs to a building.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub building_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub modified_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocation {
    pub id: DbId,
    pub name: String,
    pub building_id: DbId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLocation {
    pub name: String,
    pub building_id: DbId,
}
