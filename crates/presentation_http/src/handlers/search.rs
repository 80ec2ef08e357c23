//! Place search handler

use axum::{
    Json,
    extract::{Query, State},
};
use domain::entities::PlaceSuggestion;
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Query parameters for a place search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: String,
    /// Defaults to the configured suggestion limit
    pub count: Option<u8>,
}

/// Search places by name
///
/// GET /v1/search?name&count
///
/// A blank name yields an empty list without contacting the provider.
#[instrument(skip(state))]
pub async fn search_places(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<PlaceSuggestion>>, ApiError> {
    let name = query.name.trim();
    if name.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let count = query
        .count
        .unwrap_or(state.config.search.suggestion_limit);
    let places = state.geocoding.search_places(name, count).await?;
    Ok(Json(places))
}
