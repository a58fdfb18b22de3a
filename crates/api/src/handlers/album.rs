//! Handlers for the `/albums` resource.
//!
//! Single-item reads hide inactive albums (the read policy for this kind
//! sets `filter_active_get`); the list route returns rows of any status.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use musicstore_core::error::CoreError;
use musicstore_core::registry::{self, EntityKind};
use musicstore_core::types::DbId;
use musicstore_db::guard;
use musicstore_db::models::{Album, CreateAlbum, UpdateAlbum};
use musicstore_db::store::AlbumStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const KIND: EntityKind = EntityKind::Album;

/// POST /albums
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAlbum>,
) -> AppResult<(StatusCode, Json<Album>)> {
    let album = state.store.create_album(&input).await?;
    Ok((StatusCode::CREATED, Json(album)))
}

/// GET /albums
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Album>>> {
    let albums = state.store.list_albums(None).await?;
    if albums.is_empty() && registry::read_policy(KIND).empty_list_as_404 {
        return Err(AppError::Core(CoreError::EmptyCollection {
            entity: KIND.display(),
        }));
    }
    Ok(Json(albums))
}

/// GET /albums/{id}
///
/// An album that exists but is inactive reads as 404 here.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Album>> {
    let policy = registry::read_policy(KIND);
    let album = state
        .store
        .get_album(id)
        .await?
        .filter(|a| a.status.is_active() || !policy.filter_active_get)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(album))
}

/// PUT /albums/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAlbum>,
) -> AppResult<Json<Album>> {
    let album = state
        .store
        .update_album(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(album))
}

/// PUT /albums/{id}/desactivar
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Album>> {
    guard::deactivate(
        state.store.as_ref(),
        KIND,
        id,
        state.config.guard_transactional,
    )
    .await?;
    refetch(&state, id).await
}

/// PUT /albums/{id}/activar
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Album>> {
    guard::activate(state.store.as_ref(), KIND, id).await?;
    refetch(&state, id).await
}

/// Fetch without the active-only filter: a just-deactivated album still
/// has to appear in the lifecycle response.
async fn refetch(state: &AppState, id: DbId) -> AppResult<Json<Album>> {
    let album = state
        .store
        .get_album(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(album))
}
