//! Artist entity model and DTOs.

use musicstore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::Status;

/// A row from the `artists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artist {
    pub id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub modified_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateArtist {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateArtist {
    pub name: String,
}
