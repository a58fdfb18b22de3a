//! Route definitions for the `/catalogs` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalogs`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list).post(catalog::create))
        .route("/{id}", get(catalog::get_by_id).put(catalog::update))
        .route("/{id}/desactivar", put(catalog::deactivate))
        .route("/{id}/activar", put(catalog::activate))
}
