//! Handlers for the `/artists` resource.
//!
//! Like albums, single-item reads hide inactive artists. Deactivation is
//! the one transitive case in the system: it walks artist -> albums ->
//! products, and the albums in the middle count whatever their status.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use musicstore_core::error::CoreError;
use musicstore_core::registry::{self, EntityKind};
use musicstore_core::types::DbId;
use musicstore_db::guard;
use musicstore_db::models::{Artist, CreateArtist, UpdateArtist};
use musicstore_db::store::ArtistStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const KIND: EntityKind = EntityKind::Artist;

/// POST /artists
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateArtist>,
) -> AppResult<(StatusCode, Json<Artist>)> {
    let artist = state.store.create_artist(&input).await?;
    Ok((StatusCode::CREATED, Json(artist)))
}

/// GET /artists
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Artist>>> {
    let artists = state.store.list_artists(None).await?;
    if artists.is_empty() && registry::read_policy(KIND).empty_list_as_404 {
        return Err(AppError::Core(CoreError::EmptyCollection {
            entity: KIND.display(),
        }));
    }
    Ok(Json(artists))
}

/// GET /artists/{id}
///
/// An artist that exists but is inactive reads as 404 here.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Artist>> {
    let policy = registry::read_policy(KIND);
    let artist = state
        .store
        .get_artist(id)
        .await?
        .filter(|a| a.status.is_active() || !policy.filter_active_get)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(artist))
}

/// PUT /artists/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArtist>,
) -> AppResult<Json<Artist>> {
    let artist = state
        .store
        .update_artist(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(artist))
}

/// PUT /artists/{id}/desactivar
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Artist>> {
    guard::deactivate(
        state.store.as_ref(),
        KIND,
        id,
        state.config.guard_transactional,
    )
    .await?;
    refetch(&state, id).await
}

/// PUT /artists/{id}/activar
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Artist>> {
    guard::activate(state.store.as_ref(), KIND, id).await?;
    refetch(&state, id).await
}

/// Fetch without the active-only filter: a just-deactivated artist still
/// has to appear in the lifecycle response.
async fn refetch(state: &AppState, id: DbId) -> AppResult<Json<Artist>> {
    let artist = state
        .store
        .get_artist(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: KIND.display(),
            id,
        }))?;
    Ok(Json(artist))
}
