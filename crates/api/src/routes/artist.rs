//! Route definitions for the `/artists` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::artist;
use crate::state::AppState;

/// Routes mounted at `/artists`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(artist::list).post(artist::create))
        .route("/{id}", get(artist::get_by_id).put(artist::update))
        .route("/{id}/desactivar", put(artist::deactivate))
        .route("/{id}/activar", put(artist::activate))
}
