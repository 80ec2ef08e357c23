//! Weather service port
//!
//! Defines the interface for forecast retrieval.

use async_trait::async_trait;
use domain::entities::WeatherPayload;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather forecast operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch current, hourly and daily weather for a location
    async fn fetch_weather(
        &self,
        location: &GeoLocation,
    ) -> Result<WeatherPayload, ApplicationError>;

    /// Check if the weather service is reachable
    async fn is_available(&self) -> bool;
}
