//! Supplier entity model and DTOs.
//!
//! Suppliers have no registered dependents; deactivation is never blocked.

use musicstore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::Status;

/// A row from the `suppliers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Supplier {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub modified_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSupplier {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSupplier {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}
