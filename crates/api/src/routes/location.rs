//! Route definitions for the `/locations` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::location;
use crate::state::AppState;

/// Routes mounted at `/locations`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(location::list).post(location::create))
        .route("/{id}", get(location::get_by_id).put(location::update))
        .route("/{id}/desactivar", put(location::deactivate))
        .route("/{id}/activar", put(location::activate))
}
