//! Route definitions for the `/buildings` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::building;
use crate::state::AppState;

/// Routes mounted at `/buildings`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(building::list).post(building::create))
        .route("/{id}", get(building::get_by_id).put(building::update))
        .route("/{id}/desactivar", put(building::deactivate))
        .route("/{id}/activar", put(building::activate))
}
