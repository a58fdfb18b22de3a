//! Route definitions for the `/products` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// PUT    /{id}/desactivar   -> deactivate
/// PUT    /{id}/activar      -> activate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list).post(product::create))
        .route("/{id}", get(product::get_by_id).put(product::update))
        .route("/{id}/desactivar", put(product::deactivate))
        .route("/{id}/activar", put(product::activate))
}
