//! Request handlers, one submodule per entity resource.
//!
//! Each submodule provides the same six async handler functions (create,
//! list, get_by_id, update, deactivate, activate) for a single entity
//! kind. Handlers delegate to the [`Store`](musicstore_db::Store) behind
//! [`AppState`](crate::state::AppState) and map errors via
//! [`AppError`](crate::error::AppError); lifecycle routes go through the
//! dependency guard in `musicstore_db::guard`.

pub mod album;
pub mod artist;
pub mod building;
pub mod catalog;
pub mod inventory;
pub mod location;
pub mod product;
pub mod product_type;
pub mod stock;
pub mod supplier;
