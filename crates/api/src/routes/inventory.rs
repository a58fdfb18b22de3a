//! Route definitions for the `/inventories` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::inventory;
use crate::state::AppState;

/// Routes mounted at `/inventories`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(inventory::list).post(inventory::create))
        .route("/{id}", get(inventory::get_by_id).put(inventory::update))
        .route("/{id}/desactivar", put(inventory::deactivate))
        .route("/{id}/activar", put(inventory::activate))
}
