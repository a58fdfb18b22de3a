//! Route definitions for the `/albums` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::album;
use crate::state::AppState;

/// Routes mounted at `/albums`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(album::list).post(album::create))
        .route("/{id}", get(album::get_by_id).put(album::update))
        .route("/{id}/desactivar", put(album::deactivate))
        .route("/{id}/activar", put(album::activate))
}
