//! Handlers for the `/product-types` resource. Single-item reads hide
//! inactive rows, matching the album and artist behavior.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use musicstore_core::error::CoreError;
use musicstore_core::registry::{self, EntityKind};
use musicstore_core::types::DbId;
use musicstore_db::guard;
use musicstore_db::models::{CreateProductType, ProductType, UpdateProductType};
use musicstore_db::store::ProductTypeStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const KIND: EntityKind = EntityKind::ProductType;

/// POST /product-types
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProductType>,
) -> AppResult<(StatusCode, Json<ProductType>)> {
    let product_type = state.store.create_product_type(&input).await?;
    Ok((StatusCode::CREATED, Json(product_type)))
}

/// GET /product-types
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProductType>>> {
    let product_types = state.store.list_product_types(None).await?;
    if product_types.is_empty() && registry::read_policy(KIND).empty_list_as_404 {
        return Err(AppError::Core(CoreError::EmptyCollection {
            entity: KIND.display(),
        }));
    }
    Ok(Json(product_types))
}

/// GET /product-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductType>> {
    let policy = registry::read_policy(KIND);
    let product_type = state
        .store
        .get_product_type(id)
        .await?
        .filter(|pt| pt.status.is_active() || !policy.filter_active_get)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(product_type))
}

/// PUT /product-types/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductType>,
) -> AppResult<Json<ProductType>> {
    let product_type = state
        .store
        .update_product_type(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(product_type))
}

/// PUT /product-types/{id}/desactivar
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductType>> {
    guard::deactivate(
        state.store.as_ref(),
        KIND,
        id,
        state.config.guard_transactional,
    )
    .await?;
    refetch(&state, id).await
}

/// PUT /product-types/{id}/activar
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductType>> {
    guard::activate(state.store.as_ref(), KIND, id).await?;
    refetch(&state, id).await
}

async fn refetch(state: &AppState, id: DbId) -> AppResult<Json<ProductType>> {
    let product_type = state
        .store
        .get_product_type(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(product_type))
}
