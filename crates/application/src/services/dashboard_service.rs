//! Dashboard orchestration
//!
//! Resolves a location, then fetches weather for it. Without coordinates no
//! weather request is made. Each load takes a new generation number; a
//! result only becomes the visible view if no newer load started meanwhile.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::entities::{PlaceSuggestion, WeatherPayload};
use domain::value_objects::{PlaceDetails, UserLocation};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::location_service::LocationResolver;
use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, WeatherPort};

/// What the dashboard shows after a load
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    /// No location source produced coordinates
    NoLocation,
    /// Location and weather are known
    Ready {
        location: UserLocation,
        weather: WeatherPayload,
    },
    /// Loading failed; the user may retry
    Error { message: String, retryable: bool },
}

impl DashboardView {
    fn from_error(error: &ApplicationError) -> Self {
        Self::Error {
            message: error.user_message(),
            retryable: error.is_retryable(),
        }
    }
}

/// Visible dashboard state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub loading: bool,
    pub view: Option<DashboardView>,
}

/// Service coordinating location resolution and weather loading
pub struct DashboardService {
    resolver: Arc<LocationResolver>,
    weather: Arc<dyn WeatherPort>,
    geocoding: Arc<dyn GeocodingPort>,
    generation: AtomicU64,
    snapshot: RwLock<DashboardSnapshot>,
}

impl fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardService")
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl DashboardService {
    /// Create a dashboard service
    pub fn new(
        resolver: Arc<LocationResolver>,
        weather: Arc<dyn WeatherPort>,
        geocoding: Arc<dyn GeocodingPort>,
    ) -> Self {
        Self {
            resolver,
            weather,
            geocoding,
            generation: AtomicU64::new(0),
            snapshot: RwLock::new(DashboardSnapshot::default()),
        }
    }

    /// Resolve the user's location and load its weather
    ///
    /// Calling again while a load is running replaces it: only the newest
    /// load updates the snapshot.
    #[instrument(skip(self))]
    pub async fn load(&self) -> DashboardView {
        let generation = self.begin();
        let view = match self.resolver.resolve().await {
            Some(location) => self.weather_view(location).await,
            None => {
                info!("No location available, skipping weather fetch");
                DashboardView::NoLocation
            },
        };
        self.commit(generation, view)
    }

    /// Load weather for an already known location
    #[instrument(skip(self, location), fields(location = %location.display_name()))]
    pub async fn load_location(&self, location: UserLocation) -> DashboardView {
        let generation = self.begin();
        let view = self.weather_view(location).await;
        self.commit(generation, view)
    }

    /// Search a place by name and load weather for the top result
    #[instrument(skip(self))]
    pub async fn load_place(&self, query: &str) -> Result<DashboardView, ApplicationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "Search query must not be empty".to_string(),
            ));
        }
        let first = self
            .geocoding
            .search_places(query, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApplicationError::NotFound("No search result found".to_string()))?;
        Ok(self.load_location(location_of(first)).await)
    }

    /// Current visible state
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.read().clone()
    }

    fn begin(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.snapshot.write().loading = true;
        generation
    }

    fn commit(&self, generation: u64, view: DashboardView) -> DashboardView {
        let mut snapshot = self.snapshot.write();
        if self.generation.load(Ordering::SeqCst) == generation {
            snapshot.loading = false;
            snapshot.view = Some(view.clone());
        } else {
            debug!(generation, "Discarding superseded dashboard load");
        }
        view
    }

    async fn weather_view(&self, location: UserLocation) -> DashboardView {
        match self.weather.fetch_weather(&location.position()).await {
            Ok(weather) => DashboardView::Ready { location, weather },
            Err(e) => {
                warn!(error = %e, "Weather fetch failed");
                DashboardView::from_error(&e)
            },
        }
    }
}

fn location_of(suggestion: PlaceSuggestion) -> UserLocation {
    UserLocation::new(
        suggestion.position(),
        PlaceDetails::new(Some(suggestion.name), suggestion.admin1, suggestion.country),
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use domain::entities::{CurrentConditions, WeatherProperties};
    use domain::value_objects::GeoLocation;

    use super::*;
    use crate::ports::{
        IpLocation, MockDevicePositionPort, MockGeocodingPort, MockIpLocationPort,
        MockReverseGeocodePort, MockWeatherPort,
    };

    fn sample_weather(temperature: f64) -> WeatherPayload {
        WeatherPayload {
            current: CurrentConditions {
                temperature,
                windspeed: 5.0,
                winddirection: Some(180.0),
                weathercode: 0,
                time: "2024-01-01T00:00".into(),
            },
            properties: WeatherProperties::default(),
            daily: vec![],
            hourly: vec![],
        }
    }

    fn resolver_with_ip(ip: Option<(f64, f64)>) -> Arc<LocationResolver> {
        let mut device = MockDevicePositionPort::new();
        device
            .expect_current_position()
            .returning(|| Err(ApplicationError::ExternalService("denied".into())));
        let mut ip_port = MockIpLocationPort::new();
        ip_port.expect_lookup().returning(move || {
            Ok(ip.map(|(lat, lon)| IpLocation {
                position: GeoLocation::new_unchecked(lat, lon),
                place: PlaceDetails::new(Some("Paris".into()), None, Some("France".into())),
            }))
        });
        let mut reverse = MockReverseGeocodePort::new();
        reverse
            .expect_reverse_geocode()
            .returning(|_| Ok(PlaceDetails::default()));
        Arc::new(LocationResolver::new(
            Arc::new(device),
            Arc::new(ip_port),
            Arc::new(reverse),
        ))
    }

    fn unused_geocoder() -> Arc<MockGeocodingPort> {
        let mut mock = MockGeocodingPort::new();
        mock.expect_search_places().never();
        Arc::new(mock)
    }

    #[tokio::test]
    async fn load_fetches_weather_for_resolved_location() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_fetch_weather()
            .withf(|loc| (loc.latitude() - 48.85).abs() < 1e-9)
            .returning(|_| Ok(sample_weather(10.0)));
        let service = DashboardService::new(
            resolver_with_ip(Some((48.85, 2.35))),
            Arc::new(weather),
            unused_geocoder(),
        );

        let view = service.load().await;

        match &view {
            DashboardView::Ready { location, weather } => {
                assert_eq!(location.display_name(), "Paris, France");
                assert!((weather.current.temperature - 10.0).abs() < f64::EPSILON);
            },
            other => panic!("unexpected view: {other:?}"),
        }
        let snapshot = service.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.view, Some(view));
    }

    #[tokio::test]
    async fn no_location_skips_weather_fetch() {
        let mut weather = MockWeatherPort::new();
        weather.expect_fetch_weather().never();
        let service = DashboardService::new(
            resolver_with_ip(None),
            Arc::new(weather),
            unused_geocoder(),
        );

        assert_eq!(service.load().await, DashboardView::NoLocation);
    }

    #[tokio::test]
    async fn weather_failure_becomes_retryable_error_view() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_fetch_weather()
            .returning(|_| Err(ApplicationError::ExternalService("HTTP 503".into())));
        let service = DashboardService::new(
            resolver_with_ip(Some((48.85, 2.35))),
            Arc::new(weather),
            unused_geocoder(),
        );

        match service.load().await {
            DashboardView::Error { message, retryable } => {
                assert!(retryable);
                assert!(!message.contains("503"));
            },
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test]
    async fn load_place_uses_top_search_result() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_search_places()
            .withf(|query, limit| query == "Oslo" && *limit == 1)
            .returning(|_, _| {
                Ok(vec![PlaceSuggestion {
                    id: "3143244".into(),
                    name: "Oslo".into(),
                    latitude: 59.912_73,
                    longitude: 10.746_09,
                    country: Some("Norway".into()),
                    admin1: Some("Oslo".into()),
                }])
            });
        let mut weather = MockWeatherPort::new();
        weather
            .expect_fetch_weather()
            .returning(|_| Ok(sample_weather(-3.0)));
        let service = DashboardService::new(
            resolver_with_ip(None),
            Arc::new(weather),
            Arc::new(geocoding),
        );

        let view = service.load_place(" Oslo ").await.unwrap();

        match view {
            DashboardView::Ready { location, .. } => {
                assert_eq!(location.display_name(), "Oslo, Norway");
            },
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test]
    async fn load_place_without_results_is_not_found() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_search_places()
            .returning(|_, _| Ok(vec![]));
        let mut weather = MockWeatherPort::new();
        weather.expect_fetch_weather().never();
        let service = DashboardService::new(
            resolver_with_ip(None),
            Arc::new(weather),
            Arc::new(geocoding),
        );

        let err = service.load_place("Xyzzy").await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn blank_place_query_is_invalid() {
        let service = DashboardService::new(
            resolver_with_ip(None),
            Arc::new(MockWeatherPort::new()),
            unused_geocoder(),
        );
        let err = service.load_place("  ").await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }

    struct SlowWeather;

    #[async_trait::async_trait]
    impl WeatherPort for SlowWeather {
        async fn fetch_weather(
            &self,
            location: &GeoLocation,
        ) -> Result<WeatherPayload, ApplicationError> {
            // The first location answers late
            if location.latitude() > 50.0 {
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
            Ok(sample_weather(location.latitude()))
        }

        async fn is_available(&self) -> bool {
            true
        }
    }

    #[tokio::test(start_paused = true)]
    async fn newer_load_replaces_older_one() {
        let service = Arc::new(DashboardService::new(
            resolver_with_ip(None),
            Arc::new(SlowWeather),
            unused_geocoder(),
        ));
        let slow = UserLocation::new(GeoLocation::new_unchecked(60.0, 10.0), PlaceDetails::default());
        let fast = UserLocation::new(GeoLocation::new_unchecked(40.0, 10.0), PlaceDetails::default());

        let first = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.load_location(slow).await })
        };
        tokio::task::yield_now().await;
        let second = service.load_location(fast).await;
        let first = first.await.unwrap();

        assert!(matches!(first, DashboardView::Ready { .. }));
        assert_eq!(service.snapshot().view, Some(second));
    }
}
