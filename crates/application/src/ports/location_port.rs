//! Location source ports
//!
//! Two independent sources of the user's position: the device itself and an
//! IP-based lookup service.

use async_trait::async_trait;
use domain::value_objects::{GeoLocation, PlaceDetails};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of an IP-based lookup
#[derive(Debug, Clone, PartialEq)]
pub struct IpLocation {
    /// Approximate coordinates
    pub position: GeoLocation,
    /// Coarse place names reported by the service
    pub place: PlaceDetails,
}

/// Port for the device's own position
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DevicePositionPort: Send + Sync {
    /// Current device coordinates
    ///
    /// Errors when the position is unavailable or permission was denied.
    async fn current_position(&self) -> Result<GeoLocation, ApplicationError>;
}

/// Port for IP-based geolocation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IpLocationPort: Send + Sync {
    /// Look up the caller's approximate location
    ///
    /// Returns `None` when the service answered without usable coordinates.
    async fn lookup(&self) -> Result<Option<IpLocation>, ApplicationError>;
}
