//! Unit preference handlers

use application::UnitPreferencesUpdate;
use axum::{Json, extract::State};
use domain::value_objects::UnitPreferences;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Current unit preferences
///
/// GET /v1/settings/units
pub async fn get_units(State(state): State<AppState>) -> Json<UnitPreferences> {
    Json(state.settings.preferences())
}

/// Change one or more units
///
/// PUT /v1/settings/units
#[instrument(skip(state))]
pub async fn update_units(
    State(state): State<AppState>,
    Json(update): Json<UnitPreferencesUpdate>,
) -> Result<Json<UnitPreferences>, ApiError> {
    Ok(Json(state.settings.update(update).await?))
}
