//! Handlers for the `/suppliers` resource. No other kind references
//! suppliers, so their deactivation is never blocked.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use musicstore_core::error::CoreError;
use musicstore_core::registry::{self, EntityKind};
use musicstore_core::types::DbId;
use musicstore_db::guard;
use musicstore_db::models::{CreateSupplier, Supplier, UpdateSupplier};
use musicstore_db::store::SupplierStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const KIND: EntityKind = EntityKind::Supplier;

/// POST /suppliers
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplier>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    let supplier = state.store.create_supplier(&input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// GET /suppliers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Supplier>>> {
    let suppliers = state.store.list_suppliers(None).await?;
    if suppliers.is_empty() && registry::read_policy(KIND).empty_list_as_404 {
        return Err(AppError::Core(CoreError::EmptyCollection {
            entity: KIND.display(),
        }));
    }
    Ok(Json(suppliers))
}

/// GET /suppliers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Supplier>> {
    let policy = registry::read_policy(KIND);
    let supplier = state
        .store
        .get_supplier(id)
        .await?
        .filter(|s| s.status.is_active() || !policy.filter_active_get)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(supplier))
}

/// PUT /suppliers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSupplier>,
) -> AppResult<Json<Supplier>> {
    let supplier = state
        .store
        .update_supplier(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(supplier))
}

/// PUT /suppliers/{id}/desactivar
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Supplier>> {
    guard::deactivate(
        state.store.as_ref(),
        KIND,
        id,
        state.config.guard_transactional,
    )
    .await?;
    refetch(&state, id).await
}

/// PUT /suppliers/{id}/activar
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Supplier>> {
    guard::activate(state.store.as_ref(), KIND, id).await?;
    refetch(&state, id).await
}

async fn refetch(state: &AppState, id: DbId) -> AppResult<Json<Supplier>> {
    let supplier = state
        .store
        .get_supplier(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(supplier))
}
