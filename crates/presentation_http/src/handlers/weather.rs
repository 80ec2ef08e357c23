//! Forecast handler

use axum::{
    Json,
    extract::{Query, State},
};
use domain::entities::WeatherPayload;
use domain::value_objects::{BackgroundKind, GeoLocation, WeatherKind};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Query parameters for a forecast
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// IANA timezone or `auto`; the configured default when absent
    pub timezone: Option<String>,
}

/// Normalized forecast with the classified current condition
#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    #[serde(flatten)]
    pub payload: WeatherPayload,
    pub kind: WeatherKind,
    pub background: BackgroundKind,
    /// Icon of the first forecast hour
    pub icon: String,
}

impl From<WeatherPayload> for WeatherResponse {
    fn from(payload: WeatherPayload) -> Self {
        Self {
            kind: payload.kind(),
            background: payload.background(),
            icon: payload.hero_icon().to_string(),
            payload,
        }
    }
}

/// Fetch the forecast for a coordinate
///
/// GET /v1/weather?lat&lon&timezone
#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let (Some(lat), Some(lon)) = (query.lat, query.lon) else {
        return Err(ApiError::BadRequest(
            "Missing latitude or longitude".to_string(),
        ));
    };
    let location = GeoLocation::new(lat, lon)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let timezone = query.timezone.as_deref().unwrap_or_default();
    let payload = state.weather.fetch_in_timezone(&location, timezone).await?;

    Ok(Json(payload.into()))
}
