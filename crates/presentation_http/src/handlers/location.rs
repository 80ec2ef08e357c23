//! Server-side location resolution

use axum::{Json, extract::State};
use domain::value_objects::UserLocation;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Resolve the location from the configured device position or the IP
///
/// GET /v1/location
#[instrument(skip(state))]
pub async fn current_location(
    State(state): State<AppState>,
) -> Result<Json<UserLocation>, ApiError> {
    state
        .resolver
        .resolve()
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No location available".to_string()))
}
