//! Geocoding ports
//!
//! Forward search (free text to places) and reverse lookup (coordinates to
//! place names).

use async_trait::async_trait;
use domain::entities::PlaceSuggestion;
use domain::value_objects::{GeoLocation, PlaceDetails};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for free-text place search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search places by name, returning at most `limit` results
    ///
    /// An empty list means no place matched.
    async fn search_places(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<PlaceSuggestion>, ApplicationError>;
}

/// Port for reverse geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReverseGeocodePort: Send + Sync {
    /// Resolve place names for a coordinate
    ///
    /// Returns empty details when the provider has no match.
    async fn reverse_geocode(
        &self,
        location: &GeoLocation,
    ) -> Result<PlaceDetails, ApplicationError>;
}
