//! Album entity model and DTOs.

use musicstore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::Status;

/// A row from the `albums` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Album {
    pub id: DbId,
    pub name: String,
    pub artist_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub modified_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAlbum {
    pub id: DbId,
    pub name: String,
    pub artist_id: DbId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAlbum {
    pub name: String,
    pub artist_id: DbId,
}
