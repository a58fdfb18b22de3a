//! Handlers for the `/catalogs` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use musicstore_core::error::CoreError;
use musicstore_core::registry::{self, EntityKind};
use musicstore_core::types::DbId;
use musicstore_db::guard;
use musicstore_db::models::{Catalog, CreateCatalog, UpdateCatalog};
use musicstore_db::store::CatalogStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const KIND: EntityKind = EntityKind::Catalog;

/// POST /catalogs
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCatalog>,
) -> AppResult<(StatusCode, Json<Catalog>)> {
    let catalog = state.store.create_catalog(&input).await?;
    Ok((StatusCode::CREATED, Json(catalog)))
}

/// GET /catalogs
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Catalog>>> {
    let catalogs = state.store.list_catalogs(None).await?;
    if catalogs.is_empty() && registry::read_policy(KIND).empty_list_as_404 {
        return Err(AppError::Core(CoreError::EmptyCollection {
            entity: KIND.display(),
        }));
    }
    Ok(Json(catalogs))
}

/// GET /catalogs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Catalog>> {
    let policy = registry::read_policy(KIND);
    let catalog = state
        .store
        .get_catalog(id)
        .await?
        .filter(|c| c.status.is_active() || !policy.filter_active_get)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(catalog))
}

/// PUT /catalogs/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCatalog>,
) -> AppResult<Json<Catalog>> {
    let catalog = state
        .store
        .update_catalog(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(catalog))
}

/// PUT /catalogs/{id}/desactivar
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Catalog>> {
    guard::deactivate(
        state.store.as_ref(),
        KIND,
        id,
        state.config.guard_transactional,
    )
    .await?;
    refetch(&state, id).await
}

/// PUT /catalogs/{id}/activar
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Catalog>> {
    guard::activate(state.store.as_ref(), KIND, id).await?;
    refetch(&state, id).await
}

async fn refetch(state: &AppState, id: DbId) -> AppResult<Json<Catalog>> {
    let catalog = state
        .store
        .get_catalog(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(catalog))
}
