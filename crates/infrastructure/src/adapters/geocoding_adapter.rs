//! Geocoding adapter - Implements the place search, reverse geocoding and
//! proxy ports using integration_geocoding

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{
    GeocodeProxyPort, GeocodingPort, LocationLabel, ReverseGeocodePort, UpstreamResponse,
};
use async_trait::async_trait;
use domain::entities::PlaceSuggestion;
use domain::value_objects::{GeoLocation, PlaceDetails};
use integration_geocoding::{
    GeocodingConfig, GeocodingError, NominatimClient, OpenMeteoGeocoder, PlaceSearchClient,
    ReverseLabel,
};
use tracing::{debug, instrument};

/// Adapter over the Open-Meteo geocoder and Nominatim
pub struct GeocodingAdapter {
    search: Arc<dyn PlaceSearchClient>,
    nominatim: Arc<NominatimClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("search", &"OpenMeteoGeocoder")
            .field("nominatim", &self.nominatim)
            .finish()
    }
}

impl GeocodingAdapter {
    /// Create the adapter and its clients
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client fails to initialize.
    pub fn new(config: &GeocodingConfig) -> Result<Self, ApplicationError> {
        let search = OpenMeteoGeocoder::new(config).map_err(Self::map_error)?;
        let nominatim = NominatimClient::new(config).map_err(Self::map_error)?;
        Ok(Self {
            search: Arc::new(search),
            nominatim: Arc::new(nominatim),
        })
    }

    /// Map integration geocoding error to application error
    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::ConnectionFailed(e) | GeocodingError::RequestFailed(e) => {
                ApplicationError::ExternalService(e)
            },
            GeocodingError::Timeout => {
                ApplicationError::ExternalService("Geocoding request timed out".into())
            },
            GeocodingError::ParseError(e) => ApplicationError::InvalidResponse(e),
            GeocodingError::InvalidInput(e) => ApplicationError::InvalidInput(e),
            GeocodingError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    fn map_label(label: ReverseLabel) -> LocationLabel {
        match label {
            ReverseLabel::Found(text) => LocationLabel::Found(text),
            ReverseLabel::Unknown => LocationLabel::Unknown,
            ReverseLabel::UpstreamFailed { details, .. } => LocationLabel::UpstreamFailed { details },
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn search_places(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<PlaceSuggestion>, ApplicationError> {
        let places = self
            .search
            .search_places(query, limit)
            .await
            .map_err(Self::map_error)?;
        debug!(count = places.len(), "Place search completed");
        Ok(places)
    }
}

#[async_trait]
impl ReverseGeocodePort for GeocodingAdapter {
    async fn reverse_geocode(
        &self,
        location: &GeoLocation,
    ) -> Result<PlaceDetails, ApplicationError> {
        self.nominatim
            .reverse_place(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl GeocodeProxyPort for GeocodingAdapter {
    async fn nominatim_reverse(
        &self,
        lat: &str,
        lon: &str,
    ) -> Result<UpstreamResponse, ApplicationError> {
        let raw = self
            .nominatim
            .reverse_raw(lat, lon)
            .await
            .map_err(Self::map_error)?;
        Ok(UpstreamResponse {
            status: raw.status,
            body: raw.body,
        })
    }

    async fn location_label(
        &self,
        location: &GeoLocation,
    ) -> Result<LocationLabel, ApplicationError> {
        self.search
            .reverse_label(location.latitude(), location.longitude())
            .await
            .map(Self::map_label)
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_mapping() {
        assert!(matches!(
            GeocodingAdapter::map_error(GeocodingError::Timeout),
            ApplicationError::ExternalService(_)
        ));
        assert!(matches!(
            GeocodingAdapter::map_error(GeocodingError::RateLimitExceeded),
            ApplicationError::RateLimited
        ));
        assert!(matches!(
            GeocodingAdapter::map_error(GeocodingError::InvalidInput("blank".into())),
            ApplicationError::InvalidInput(_)
        ));
        assert!(matches!(
            GeocodingAdapter::map_error(GeocodingError::ParseError("x".into())),
            ApplicationError::InvalidResponse(_)
        ));
    }

    #[test]
    fn label_mapping() {
        assert_eq!(
            GeocodingAdapter::map_label(ReverseLabel::Found("Oslo, Norway".into())),
            LocationLabel::Found("Oslo, Norway".into())
        );
        assert_eq!(
            GeocodingAdapter::map_label(ReverseLabel::UpstreamFailed {
                status: 502,
                details: "bad gateway".into()
            }),
            LocationLabel::UpstreamFailed {
                details: "bad gateway".into()
            }
        );
    }
}
