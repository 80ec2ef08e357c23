//! Nominatim reverse geocoding client
//!
//! Resolves coordinates to structured place names using the
//! [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap), and
//! exposes the raw response for the proxy endpoint.
//!
//! Requests are spaced by the configured interval (Nominatim allows at most
//! one request per second) and structured results are cached.

use std::sync::Arc;
use std::time::Duration;

use domain::value_objects::PlaceDetails;
use moka::future::Cache;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;
use crate::models::NominatimReverse;

/// Upstream status and body, passed through unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Nominatim client with request spacing and result caching
#[derive(Debug)]
pub struct NominatimClient {
    client: Client,
    config: GeocodingConfig,
    cache: Option<Cache<String, PlaceDetails>>,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimClient {
    /// Create a new Nominatim client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache = (config.cache_ttl_minutes > 0).then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_minutes * 60))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Enforce the minimum spacing between requests
    async fn rate_limit(&self) {
        let interval = Duration::from_millis(self.config.nominatim_interval_ms);
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                let wait = interval.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting Nominatim request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Call `/reverse` with the coordinates exactly as given
    ///
    /// Any upstream status is returned as is; only transport failures are
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the body cannot be
    /// read.
    #[instrument(skip(self))]
    pub async fn reverse_raw(&self, lat: &str, lon: &str) -> Result<RawResponse, GeocodingError> {
        self.rate_limit().await;

        let url = format!("{}/reverse", self.config.nominatim_base_url);
        let params = [("format", "jsonv2"), ("lat", lat), ("lon", lon)];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| GeocodingError::from_reqwest(&e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;
        debug!(status, bytes = body.len(), "Nominatim reverse answered");

        Ok(RawResponse { status, body })
    }

    /// Resolve coordinates to city, region and country
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an
    /// unparsable body.
    #[instrument(skip(self))]
    pub async fn reverse_place(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<PlaceDetails, GeocodingError> {
        let key = format!("{latitude:.5},{longitude:.5}");
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&key).await {
                debug!(%key, "Reverse geocoding cache hit");
                return Ok(hit);
            }
        }

        let raw = self
            .reverse_raw(&latitude.to_string(), &longitude.to_string())
            .await?;
        let status = reqwest::StatusCode::from_u16(raw.status)
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;
        if !status.is_success() {
            return Err(GeocodingError::from_status(status));
        }

        let parsed: NominatimReverse = serde_json::from_str(&raw.body)
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;
        let details = parsed.place_details();

        if let Some(cache) = &self.cache {
            cache.insert(key, details.clone()).await;
        }
        Ok(details)
    }
}
