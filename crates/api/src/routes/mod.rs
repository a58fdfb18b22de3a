pub mod album;
pub mod artist;
pub mod building;
pub mod catalog;
pub mod health;
pub mod inventory;
pub mod location;
pub mod product;
pub mod product_type;
pub mod stock;
pub mod supplier;

use axum::Router;

use crate::state::AppState;

/// Build the route tree for the ten entity collections.
///
/// Every collection exposes the same six operations:
///
/// ```text
/// /products/                     list, create
/// /products/{id}                 get, update
/// /products/{id}/desactivar      deactivate (guarded)
/// /products/{id}/activar         activate
///
/// /catalogs                      same shape
/// /albums                        same shape (inactive rows hidden from single GET)
/// /artists                       same shape (inactive rows hidden from single GET)
/// /product-types                 same shape (inactive rows hidden from single GET)
/// /suppliers                     same shape
/// /buildings                     same shape
/// /locations                     same shape
/// /stocks                        same shape
/// /inventories                   same shape
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Products reference catalogs, albums and product types.
        .nest("/products/", product::router())
        .nest("/catalogs/", catalog::router())
        .nest("/albums/", album::router())
        .nest("/artists/", artist::router())
        .nest("/product-types/", product_type::router())
        // Suppliers have no dependents; deactivation always succeeds.
        .nest("/suppliers/", supplier::router())
        // Warehouse side: buildings hold locations, locations hold inventories.
        .nest("/buildings/", building::router())
        .nest("/locations/", location::router())
        .nest("/stocks/", stock::router())
        .nest("/inventories/", inventory::router())
}
