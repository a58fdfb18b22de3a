//! Route definitions for the `/suppliers` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::supplier;
use crate::state::AppState;

/// Routes mounted at `/suppliers`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(supplier::list).post(supplier::create))
        .route("/{id}", get(supplier::get_by_id).put(supplier::update))
        .route("/{id}/desactivar", put(supplier::deactivate))
        .route("/{id}/activar", put(supplier::activate))
}
