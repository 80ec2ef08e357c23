//! Reverse-geocoding proxy handlers
//!
//! Browser clients cannot call the geocoding providers directly, so these
//! endpoints relay the lookups. Their error bodies are a bare `{"error"}`
//! object rather than the [`ApiError`](crate::ApiError) shape.

use application::ports::LocationLabel;
use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use domain::value_objects::GeoLocation;
use serde::Deserialize;
use serde_json::json;
use tracing::{instrument, warn};

use crate::state::AppState;

/// `lat`/`lon` query parameters, kept as raw strings
#[derive(Debug, Default, Deserialize)]
pub struct CoordinateQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl CoordinateQuery {
    fn present(&self) -> Option<(&str, &str)> {
        let lat = self.lat.as_deref().filter(|s| !s.is_empty())?;
        let lon = self.lon.as_deref().filter(|s| !s.is_empty())?;
        Some((lat, lon))
    }

    fn parsed(&self) -> Option<GeoLocation> {
        let (lat, lon) = self.present()?;
        let lat = lat.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        let lon = lon.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(GeoLocation::new_unchecked(lat, lon))
    }
}

fn error_body(status: StatusCode, body: serde_json::Value) -> Response {
    (status, Json(body)).into_response()
}

/// Relay a Nominatim reverse lookup
///
/// GET /api/nominatim?lat&lon
#[instrument(skip(state))]
pub async fn nominatim(
    State(state): State<AppState>,
    Query(query): Query<CoordinateQuery>,
) -> Response {
    let Some((lat, lon)) = query.present() else {
        return error_body(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Missing lat or lon" }),
        );
    };

    match state.proxy.nominatim_reverse(lat, lon).await {
        Ok(upstream) => {
            let status =
                StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                upstream.body,
            )
                .into_response()
        },
        Err(e) => {
            warn!(error = %e, "Nominatim relay failed");
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": e.to_string() }),
            )
        },
    }
}

/// Single-line label for a coordinate
///
/// GET /api/reverse-geocode?lat&lon
#[instrument(skip(state))]
pub async fn reverse_geocode(
    State(state): State<AppState>,
    Query(query): Query<CoordinateQuery>,
) -> Response {
    let Some(location) = query.parsed() else {
        return error_body(
            StatusCode::BAD_REQUEST,
            json!({ "error": "Missing latitude or longitude" }),
        );
    };

    match state.proxy.location_label(&location).await {
        Ok(LocationLabel::UpstreamFailed { details }) => error_body(
            StatusCode::BAD_GATEWAY,
            json!({ "error": "Reverse geocode failed", "details": details }),
        ),
        Ok(label) => {
            let text = label.text().unwrap_or(LocationLabel::UNKNOWN);
            Json(json!({ "location": text })).into_response()
        },
        Err(e) => {
            warn!(error = %e, "Reverse geocode failed");
            error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to fetch reverse geocode" }),
            )
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(lat: Option<&str>, lon: Option<&str>) -> CoordinateQuery {
        CoordinateQuery {
            lat: lat.map(String::from),
            lon: lon.map(String::from),
        }
    }

    #[test]
    fn empty_values_count_as_missing() {
        assert!(query(Some(""), Some("2.35")).present().is_none());
        assert!(query(Some("48.85"), None).present().is_none());
        assert_eq!(
            query(Some("48.85"), Some("2.35")).present(),
            Some(("48.85", "2.35"))
        );
    }

    #[test]
    fn unparsable_values_are_rejected() {
        assert!(query(Some("north"), Some("2.35")).parsed().is_none());
        assert!(query(Some("NaN"), Some("2.35")).parsed().is_none());
        let location = query(Some(" 48.85 "), Some("2.35")).parsed().unwrap();
        assert!((location.latitude() - 48.85).abs() < f64::EPSILON);
    }
}
