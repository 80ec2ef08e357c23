//! Favorites handlers

use application::AddFavoriteOutcome;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::entities::{FavoriteItem, NewFavorite};
use tracing::instrument;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// List saved places
///
/// GET /v1/favorites
#[instrument(skip(state))]
pub async fn list_favorites(State(state): State<AppState>) -> Json<Vec<FavoriteItem>> {
    Json(state.favorites.list().await)
}

/// Save a place
///
/// POST /v1/favorites
///
/// Returns 201 when stored and 200 with the existing entry for a duplicate.
/// Blank or overlong names and out-of-range coordinates are rejected with
/// 400 before the service is called.
#[instrument(skip(state, request), fields(name = %request.name))]
pub async fn add_favorite(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<NewFavorite>,
) -> Result<(StatusCode, Json<AddFavoriteOutcome>), ApiError> {
    let outcome = state.favorites.add_favorite(request).await?;
    let status = if outcome.is_added() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome)))
}

/// Remove a saved place
///
/// DELETE /v1/favorites/{id}
#[instrument(skip(state))]
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FavoriteItem>, ApiError> {
    state
        .favorites
        .remove_favorite(&id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Favorite {id} not found")))
}
