//! Open-Meteo geocoding client
//!
//! Free-text place search and label-style reverse geocoding via
//! <https://geocoding-api.open-meteo.com>.

use std::time::Duration;

use async_trait::async_trait;
use domain::entities::PlaceSuggestion;
use domain::value_objects::GeoLocation;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;
use crate::models::{OpenMeteoResults, ReverseLabel};

/// Trait for place search clients
#[async_trait]
pub trait PlaceSearchClient: Send + Sync {
    /// Search places by name, best match first
    async fn search_places(
        &self,
        name: &str,
        count: u8,
    ) -> Result<Vec<PlaceSuggestion>, GeocodingError>;

    /// Describe a coordinate as `"{place}, {country}"`
    async fn reverse_label(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ReverseLabel, GeocodingError>;
}

/// Outcome of a request that reached the provider
enum Answer {
    Results(OpenMeteoResults),
    Status { status: u16, body: String },
}

/// Open-Meteo geocoding API client
#[derive(Debug)]
pub struct OpenMeteoGeocoder {
    client: Client,
    config: GeocodingConfig,
}

impl OpenMeteoGeocoder {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Coordinates as sent to the reverse endpoint, fixed to four decimals
    fn reverse_coordinates(latitude: f64, longitude: f64) -> (String, String) {
        let at = GeoLocation::new_unchecked(latitude, longitude).rounded(4);
        (format!("{:.4}", at.latitude()), format!("{:.4}", at.longitude()))
    }

    async fn get_results(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Answer, GeocodingError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| GeocodingError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Ok(Answer::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<OpenMeteoResults>()
            .await
            .map(Answer::Results)
            .map_err(|e| GeocodingError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl PlaceSearchClient for OpenMeteoGeocoder {
    #[instrument(skip(self))]
    async fn search_places(
        &self,
        name: &str,
        count: u8,
    ) -> Result<Vec<PlaceSuggestion>, GeocodingError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GeocodingError::InvalidInput(
                "Search name must not be empty".to_string(),
            ));
        }
        let count = count.clamp(1, self.config.max_results.max(1));

        let url = format!("{}/search", self.config.search_base_url);
        let params = [
            ("name", name.to_string()),
            ("count", count.to_string()),
            ("language", self.config.language.clone()),
            ("format", "json".to_string()),
        ];
        debug!(%name, count, "Searching places");

        let results = match self.get_results(&url, &params).await? {
            Answer::Results(results) => results,
            Answer::Status { status: 429, .. } => return Err(GeocodingError::RateLimitExceeded),
            Answer::Status { status, .. } => {
                return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
            },
        };

        let suggestions: Vec<PlaceSuggestion> = results
            .results
            .into_iter()
            .filter_map(|place| place.into_suggestion())
            .take(usize::from(count))
            .collect();
        debug!(found = suggestions.len(), "Place search finished");
        Ok(suggestions)
    }

    #[instrument(skip(self))]
    async fn reverse_label(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ReverseLabel, GeocodingError> {
        let url = format!("{}/reverse", self.config.search_base_url);
        let (lat, lon) = Self::reverse_coordinates(latitude, longitude);
        let params = [
            ("latitude", lat),
            ("longitude", lon),
            ("count", "1".to_string()),
            ("language", self.config.language.clone()),
        ];
        debug!("Reverse geocoding via Open-Meteo");

        match self.get_results(&url, &params).await? {
            Answer::Results(results) => Ok(results
                .results
                .first()
                .map_or(ReverseLabel::Unknown, |first| first.label())),
            Answer::Status { status, body } => {
                warn!(status, "Open-Meteo reverse geocoding failed");
                Ok(ReverseLabel::UpstreamFailed {
                    status,
                    details: body,
                })
            },
        }
    }
}
