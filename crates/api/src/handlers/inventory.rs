//! Handlers for the `/inventories` resource. Inventories are leaves of
//! the dependency graph: they reference a location, a product and a stock
//! record, and nothing references them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use musicstore_core::error::CoreError;
use musicstore_core::registry::{self, EntityKind};
use musicstore_core::types::DbId;
use musicstore_db::guard;
use musicstore_db::models::{CreateInventory, Inventory, UpdateInventory};
use musicstore_db::store::InventoryStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const KIND: EntityKind = EntityKind::Inventory;

/// POST /inventories
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateInventory>,
) -> AppResult<(StatusCode, Json<Inventory>)> {
    let inventory = state.store.create_inventory(&input).await?;
    Ok((StatusCode::CREATED, Json(inventory)))
}

/// GET /inventories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Inventory>>> {
    let inventories = state.store.list_inventories(None).await?;
    if inventories.is_empty() && registry::read_policy(KIND).empty_list_as_404 {
        return Err(AppError::Core(CoreError::EmptyCollection {
            entity: KIND.display(),
        }));
    }
    Ok(Json(inventories))
}

/// GET /inventories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Inventory>> {
    let policy = registry::read_policy(KIND);
    let inventory = state
        .store
        .get_inventory(id)
        .await?
        .filter(|i| i.status.is_active() || !policy.filter_active_get)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(inventory))
}

/// PUT /inventories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInventory>,
) -> AppResult<Json<Inventory>> {
    let inventory = state
        .store
        .update_inventory(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(inventory))
}

/// PUT /inventories/{id}/desactivar
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Inventory>> {
    guard::deactivate(
        state.store.as_ref(),
        KIND,
        id,
        state.config.guard_transactional,
    )
    .await?;
    refetch(&state, id).await
}

/// PUT /inventories/{id}/activar
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Inventory>> {
    guard::activate(state.store.as_ref(), KIND, id).await?;
    refetch(&state, id).await
}

async fn refetch(state: &AppState, id: DbId) -> AppResult<Json<Inventory>> {
    let inventory = state
        .store
        .get_inventory(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(inventory))
}
