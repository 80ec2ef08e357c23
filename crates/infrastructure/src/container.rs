//! Service wiring
//!
//! Builds the adapters and application services from an [`AppConfig`].
//! Both binaries use this so they share one object graph.

use std::fmt;
use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{
    GeocodeProxyPort, GeocodingPort, KeyValueStorePort, ReverseGeocodePort, WeatherPort,
};
use application::{DashboardService, FavoritesService, LocationResolver, SettingsService};
use tracing::info;

use crate::adapters::{FixedPositionAdapter, GeocodingAdapter, IpLocationAdapter, WeatherAdapter};
use crate::config::AppConfig;
use crate::persistence::JsonFileStore;

/// Every service the presentation layers need
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<AppConfig>,
    pub weather_adapter: Arc<WeatherAdapter>,
    pub weather: Arc<dyn WeatherPort>,
    pub geocoding: Arc<dyn GeocodingPort>,
    pub proxy: Arc<dyn GeocodeProxyPort>,
    pub store: Arc<dyn KeyValueStorePort>,
    pub favorites: Arc<FavoritesService>,
    pub settings: Arc<SettingsService>,
    pub resolver: Arc<LocationResolver>,
    pub dashboard: Arc<DashboardService>,
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("storage", &self.config.storage.path)
            .finish_non_exhaustive()
    }
}

impl ServiceContainer {
    /// Build adapters and services backed by the configured state file
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client fails to initialize.
    pub fn build(config: AppConfig) -> Result<Self, ApplicationError> {
        let store: Arc<dyn KeyValueStorePort> =
            Arc::new(JsonFileStore::new(config.storage.path.clone()));
        Self::build_with_store(config, store)
    }

    /// Build with a caller-provided key-value store
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client fails to initialize.
    pub fn build_with_store(
        config: AppConfig,
        store: Arc<dyn KeyValueStorePort>,
    ) -> Result<Self, ApplicationError> {
        let weather_adapter = Arc::new(WeatherAdapter::with_config(config.weather.clone())?);
        let geocoding_adapter = Arc::new(GeocodingAdapter::new(&config.geocoding)?);

        let device = Arc::new(FixedPositionAdapter::new(
            config
                .location
                .device
                .and_then(|d| d.to_geo_location()),
        ));
        let ip = Arc::new(if config.location.ip_lookup_enabled {
            IpLocationAdapter::new(&config.geocoding)?
        } else {
            IpLocationAdapter::disabled()
        });

        let weather: Arc<dyn WeatherPort> = weather_adapter.clone();
        let geocoding: Arc<dyn GeocodingPort> = geocoding_adapter.clone();
        let reverse: Arc<dyn ReverseGeocodePort> = geocoding_adapter.clone();
        let proxy: Arc<dyn GeocodeProxyPort> = geocoding_adapter;

        let resolver = Arc::new(LocationResolver::new(device, ip, reverse));
        let favorites = Arc::new(FavoritesService::with_toast_duration(
            Arc::clone(&store),
            Arc::clone(&geocoding),
            config.favorites.toast_duration(),
        ));
        let settings = Arc::new(SettingsService::new(Arc::clone(&store)));
        let dashboard = Arc::new(DashboardService::new(
            Arc::clone(&resolver),
            Arc::clone(&weather),
            Arc::clone(&geocoding),
        ));

        Ok(Self {
            config: Arc::new(config),
            weather_adapter,
            weather,
            geocoding,
            proxy,
            store,
            favorites,
            settings,
            resolver,
            dashboard,
        })
    }

    /// Read persisted favorites and unit preferences
    pub async fn load_state(&self) {
        let favorites = self.favorites.load().await;
        let units = self.settings.load().await;
        info!(favorites, ?units, "Restored persisted state");
    }
}
