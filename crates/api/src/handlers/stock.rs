//! Handlers for the `/stocks` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use musicstore_core::error::CoreError;
use musicstore_core::registry::{self, EntityKind};
use musicstore_core::types::DbId;
use musicstore_db::guard;
use musicstore_db::models::{CreateStock, Stock, UpdateStock};
use musicstore_db::store::StockStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const KIND: EntityKind = EntityKind::Stock;

/// POST /stocks
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateStock>,
) -> AppResult<(StatusCode, Json<Stock>)> {
    let stock = state.store.create_stock(&input).await?;
    Ok((StatusCode::CREATED, Json(stock)))
}

/// GET /stocks
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Stock>>> {
    let stocks = state.store.list_stocks(None).await?;
    if stocks.is_empty() && registry::read_policy(KIND).empty_list_as_404 {
        return Err(AppError::Core(CoreError::EmptyCollection {
            entity: KIND.display(),
        }));
    }
    Ok(Json(stocks))
}

/// GET /stocks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Stock>> {
    let policy = registry::read_policy(KIND);
    let stock = state
        .store
        .get_stock(id)
        .await?
        .filter(|s| s.status.is_active() || !policy.filter_active_get)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(stock))
}

/// PUT /stocks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStock>,
) -> AppResult<Json<Stock>> {
    let stock = state
        .store
        .update_stock(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(stock))
}

/// PUT /stocks/{id}/desactivar
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Stock>> {
    guard::deactivate(
        state.store.as_ref(),
        KIND,
        id,
        state.config.guard_transactional,
    )
    .await?;
    refetch(&state, id).await
}

/// PUT /stocks/{id}/activar
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Stock>> {
    guard::activate(state.store.as_ref(), KIND, id).await?;
    refetch(&state, id).await
}

async fn refetch(state: &AppState, id: DbId) -> AppResult<Json<Stock>> {
    let stock = state
        .store
        .get_stock(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(stock))
}
