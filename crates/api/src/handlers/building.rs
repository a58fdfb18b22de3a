//! Handlers for the `/buildings` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use musicstore_core::error::CoreError;
use musicstore_core::registry::{self, EntityKind};
use musicstore_core::types::DbId;
use musicstore_db::guard;
use musicstore_db::models::{Building, CreateBuilding, UpdateBuilding};
use musicstore_db::store::BuildingStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const KIND: EntityKind = EntityKind::Building;

/// POST /buildings
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBuilding>,
) -> AppResult<(StatusCode, Json<Building>)> {
    let building = state.store.create_building(&input).await?;
    Ok((StatusCode::CREATED, Json(building)))
}

/// GET /buildings
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Building>>> {
    let buildings = state.store.list_buildings(None).await?;
    if buildings.is_empty() && registry::read_policy(KIND).empty_list_as_404 {
        return Err(AppError::Core(CoreError::EmptyCollection {
            entity: KIND.display(),
        }));
    }
    Ok(Json(buildings))
}

/// GET /buildings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Building>> {
    let policy = registry::read_policy(KIND);
    let building = state
        .store
        .get_building(id)
        .await?
        .filter(|b| b.status.is_active() || !policy.filter_active_get)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(building))
}

/// PUT /buildings/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBuilding>,
) -> AppResult<Json<Building>> {
    let building = state
        .store
        .update_building(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(building))
}

/// PUT /buildings/{id}/desactivar
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Building>> {
    guard::deactivate(
        state.store.as_ref(),
        KIND,
        id,
        state.config.guard_transactional,
    )
    .await?;
    refetch(&state, id).await
}

/// PUT /buildings/{id}/activar
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Building>> {
    guard::activate(state.store.as_ref(), KIND, id).await?;
    refetch(&state, id).await
}

async fn refetch(state: &AppState, id: DbId) -> AppResult<Json<Building>> {
    let building = state
        .store
        .get_building(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(building))
}
