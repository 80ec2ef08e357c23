//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::entities::WeatherPayload;
use domain::value_objects::GeoLocation;
use integration_weather::{OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
use tracing::{debug, instrument};

/// Adapter for the Open-Meteo forecast API
pub struct WeatherAdapter {
    client: Box<dyn WeatherClient>,
    timezone: String,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"OpenMeteoClient")
            .field("timezone", &self.timezone)
            .finish()
    }
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let timezone = config.timezone.clone();
        let client =
            OpenMeteoClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self {
            client: Box::new(client),
            timezone,
        })
    }

    /// Fetch the forecast with an explicit timezone
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    pub async fn fetch_in_timezone(
        &self,
        location: &GeoLocation,
        timezone: &str,
    ) -> Result<WeatherPayload, ApplicationError> {
        let result = self
            .client
            .fetch_weather(location.latitude(), location.longitude(), timezone)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(payload) => {
                debug!(
                    temperature = payload.current.temperature,
                    kind = %payload.kind(),
                    "Retrieved forecast"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to get forecast");
            },
        }
        result
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => ApplicationError::InvalidResponse(e),
            WeatherError::InvalidCoordinates => {
                ApplicationError::InvalidInput("Invalid coordinates".into())
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    async fn fetch_weather(
        &self,
        location: &GeoLocation,
    ) -> Result<WeatherPayload, ApplicationError> {
        self.fetch_in_timezone(location, &self.timezone).await
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
