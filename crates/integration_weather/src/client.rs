//! Open-Meteo forecast client
//!
//! HTTP client for the Open-Meteo forecast endpoint. One request returns the
//! current conditions together with the hourly and daily series.

use std::time::Duration;

use async_trait::async_trait;
use domain::entities::WeatherPayload;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{RawForecast, normalize_forecast};

/// Hourly series requested from Open-Meteo
pub const HOURLY_FIELDS: &str =
    "temperature_2m,apparent_temperature,relativehumidity_2m,precipitation,weathercode";

/// Daily series requested from Open-Meteo
pub const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Timezone for local timestamps (default: `auto`)
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    10
}

fn default_timezone() -> String {
    "auto".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            timezone: default_timezone(),
        }
    }
}

/// Weather client trait for fetching forecasts
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Fetch and normalize the forecast for a location
    ///
    /// `timezone` is passed through to Open-Meteo; `auto` resolves it from
    /// the coordinates.
    async fn fetch_weather(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<WeatherPayload, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &WeatherConfig {
        &self.config
    }

    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    fn forecast_query(latitude: f64, longitude: f64, timezone: &str) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", timezone.to_string()),
        ]
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn fetch_weather(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<WeatherPayload, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = format!("{}/forecast", self.config.base_url);
        let timezone = if timezone.trim().is_empty() {
            self.config.timezone.as_str()
        } else {
            timezone
        };
        debug!(url = %url, timezone, "Fetching weather forecast");

        let response = self
            .client
            .get(&url)
            .query(&Self::forecast_query(latitude, longitude, timezone))
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!(
                "Open-Meteo API error: {}",
                status.as_u16()
            )));
        }

        let raw: RawForecast = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let (Some(current), Some(hourly)) = (raw.current_weather, raw.hourly) else {
            return Err(WeatherError::ParseError(
                "Unexpected Open-Meteo response shape".to_string(),
            ));
        };

        let payload = normalize_forecast(current, &hourly, raw.daily.as_ref());
        debug!(
            hourly = payload.hourly.len(),
            daily = payload.daily.len(),
            code = payload.current.weathercode,
            "Normalized forecast"
        );
        Ok(payload)
    }

    async fn is_healthy(&self) -> bool {
        self.fetch_weather(52.52, 13.41, "auto").await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.timezone, "auto");
    }

    #[test]
    fn test_config_partial_deserialization() {
        let config: WeatherConfig = serde_json::from_str(r#"{"timezone":"Europe/Oslo"}"#).unwrap();
        assert_eq!(config.timezone, "Europe/Oslo");
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(OpenMeteoClient::validate_coordinates(0.0, 0.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(90.0, 180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(-90.0, -180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(91.0, 0.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(0.0, -181.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_forecast_query() {
        let query = OpenMeteoClient::forecast_query(48.85, 2.35, "auto");
        assert!(query.contains(&("latitude", "48.85".to_string())));
        assert!(query.contains(&("current_weather", "true".to_string())));
        assert!(query.contains(&("hourly", HOURLY_FIELDS.to_string())));
        assert!(query.contains(&("daily", DAILY_FIELDS.to_string())));
        assert!(query.contains(&("timezone", "auto".to_string())));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            WeatherError::RequestFailed("Open-Meteo API error: 404".into()).to_string(),
            "Request failed: Open-Meteo API error: 404"
        );
        assert!(WeatherError::RateLimitExceeded.to_string().contains("Rate limit"));
    }
}
