//! Route definitions for the `/stocks` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::stock;
use crate::state::AppState;

/// Routes mounted at `/stocks`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stock::list).post(stock::create))
        .route("/{id}", get(stock::get_by_id).put(stock::update))
        .route("/{id}/desactivar", put(stock::deactivate))
        .route("/{id}/activar", put(stock::activate))
}
