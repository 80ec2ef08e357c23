//! Application state shared across handlers

use std::sync::Arc;

use application::ports::{GeocodeProxyPort, GeocodingPort};
use application::{FavoritesService, LocationResolver, SettingsService};
use infrastructure::{AppConfig, ServiceContainer, WeatherAdapter};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Forecast adapter, used directly for per-request timezones
    pub weather: Arc<WeatherAdapter>,
    /// Place search
    pub geocoding: Arc<dyn GeocodingPort>,
    /// Reverse-geocoding proxy
    pub proxy: Arc<dyn GeocodeProxyPort>,
    /// Saved places
    pub favorites: Arc<FavoritesService>,
    /// Unit preferences
    pub settings: Arc<SettingsService>,
    /// Server-side location resolution
    pub resolver: Arc<LocationResolver>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("environment", &self.config.environment)
            .finish_non_exhaustive()
    }
}

impl From<&ServiceContainer> for AppState {
    fn from(container: &ServiceContainer) -> Self {
        Self {
            config: Arc::clone(&container.config),
            weather: Arc::clone(&container.weather_adapter),
            geocoding: Arc::clone(&container.geocoding),
            proxy: Arc::clone(&container.proxy),
            favorites: Arc::clone(&container.favorites),
            settings: Arc::clone(&container.settings),
            resolver: Arc::clone(&container.resolver),
        }
    }
}
