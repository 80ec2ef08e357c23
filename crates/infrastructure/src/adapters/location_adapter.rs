//! Location adapters - Implement the device position and IP lookup ports

use application::error::ApplicationError;
use application::ports::{DevicePositionPort, IpLocation, IpLocationPort};
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use integration_geocoding::{GeocodingConfig, IpLocationClient};
use tracing::debug;

/// Device position taken from configuration
///
/// Reports the position as unavailable when none is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPositionAdapter {
    position: Option<GeoLocation>,
}

impl FixedPositionAdapter {
    /// Create from an optional configured position
    #[must_use]
    pub const fn new(position: Option<GeoLocation>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl DevicePositionPort for FixedPositionAdapter {
    async fn current_position(&self) -> Result<GeoLocation, ApplicationError> {
        self.position.ok_or_else(|| {
            ApplicationError::ExternalService("Device position unavailable".to_string())
        })
    }
}

/// Adapter over the IP location service
#[derive(Debug)]
pub struct IpLocationAdapter {
    client: Option<IpLocationClient>,
}

impl IpLocationAdapter {
    /// Create the adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: &GeocodingConfig) -> Result<Self, ApplicationError> {
        let client = IpLocationClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self {
            client: Some(client),
        })
    }

    /// An adapter that never finds a location
    #[must_use]
    pub const fn disabled() -> Self {
        Self { client: None }
    }
}

#[async_trait]
impl IpLocationPort for IpLocationAdapter {
    async fn lookup(&self) -> Result<Option<IpLocation>, ApplicationError> {
        let Some(client) = &self.client else {
            debug!("IP lookup disabled");
            return Ok(None);
        };
        let found = client
            .lookup()
            .await
            .map_err(|e| ApplicationError::ExternalService(e.to_string()))?;
        Ok(found.map(|ip| IpLocation {
            position: ip.position,
            place: ip.place,
        }))
    }
}
