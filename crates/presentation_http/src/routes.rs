//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{delete, get},
};
use infrastructure::AppConfig;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Reverse-geocoding proxy
        .route("/api/nominatim", get(handlers::proxy::nominatim))
        .route("/api/reverse-geocode", get(handlers::proxy::reverse_geocode))
        // Weather API (v1)
        .route("/v1/weather", get(handlers::weather::get_weather))
        .route("/v1/search", get(handlers::search::search_places))
        .route("/v1/location", get(handlers::location::current_location))
        // Favorites and settings (v1)
        .route(
            "/v1/favorites",
            get(handlers::favorites::list_favorites).post(handlers::favorites::add_favorite),
        )
        .route(
            "/v1/favorites/{id}",
            delete(handlers::favorites::remove_favorite),
        )
        .route(
            "/v1/settings/units",
            get(handlers::settings::get_units).put(handlers::settings::update_units),
        )
        // Attach state
        .with_state(state)
}

/// Build the CORS layer for the configured environment
///
/// Development without an origin list allows any origin; otherwise only
/// the configured origins are accepted.
#[must_use]
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.cors_allows_any() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .server
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}
