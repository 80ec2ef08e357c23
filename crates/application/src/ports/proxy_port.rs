//! Reverse-geocoding proxy port
//!
//! Backs the two browser-facing proxy endpoints: a raw Nominatim
//! passthrough and a post-processed single-line location label.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// An upstream response relayed unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    /// HTTP status code returned upstream
    pub status: u16,
    /// Raw response body
    pub body: String,
}

/// Outcome of a reverse lookup that produces a display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationLabel {
    /// A label such as `"Paris, France"`
    Found(String),
    /// The provider had no result for the coordinate
    Unknown,
    /// The provider answered with a non-success status
    UpstreamFailed {
        /// Raw upstream body
        details: String,
    },
}

impl LocationLabel {
    /// Label shown when nothing is known
    pub const UNKNOWN: &'static str = "Unknown location";

    /// The label text, if the lookup succeeded
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Found(label) => Some(label),
            Self::Unknown => Some(Self::UNKNOWN),
            Self::UpstreamFailed { .. } => None,
        }
    }
}

/// Port for the reverse-geocoding proxy
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodeProxyPort: Send + Sync {
    /// Forward a reverse lookup to Nominatim, returning its status and body
    async fn nominatim_reverse(
        &self,
        lat: &str,
        lon: &str,
    ) -> Result<UpstreamResponse, ApplicationError>;

    /// Look up a single-line label for a coordinate
    async fn location_label(
        &self,
        location: &GeoLocation,
    ) -> Result<LocationLabel, ApplicationError>;
}
