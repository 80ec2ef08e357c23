//! Local state, device position and favorites settings.

use std::path::PathBuf;
use std::time::Duration;

use application::DEFAULT_TOAST_DURATION;
use domain::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Key-value store location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON state file
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("skycast-state.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Geographic location configuration (latitude/longitude pair)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeoLocationConfig {
    /// Latitude (-90.0 to 90.0)
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl GeoLocationConfig {
    /// Convert to domain `GeoLocation` value object
    ///
    /// Returns `None` if coordinates are invalid.
    #[must_use]
    pub fn to_geo_location(&self) -> Option<GeoLocation> {
        GeoLocation::new(self.latitude, self.longitude).ok()
    }
}

/// Where the device position comes from
///
/// A server has no positioning hardware; when `device` is unset the device
/// source reports the position as unavailable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Fixed device position
    ///
    /// Configured as inline table: `{ latitude = 52.52, longitude = 13.405 }`
    #[serde(default)]
    pub device: Option<GeoLocationConfig>,

    /// Whether to ask the IP lookup service
    #[serde(default = "super::default_true")]
    pub ip_lookup_enabled: bool,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            device: None,
            ip_lookup_enabled: true,
        }
    }
}

/// Favorites behaviour
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// How long a toast stays visible, in milliseconds
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
}

#[allow(clippy::cast_possible_truncation)]
const fn default_toast_ms() -> u64 {
    DEFAULT_TOAST_DURATION.as_millis() as u64
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            toast_ms: default_toast_ms(),
        }
    }
}

impl FavoritesConfig {
    /// Toast duration
    #[must_use]
    pub const fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}
