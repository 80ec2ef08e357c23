//! IP-based location lookup
//!
//! Asks an ipapi-compatible endpoint where the caller's IP is. Providers
//! disagree on field names, so `latitude`/`lat`, `longitude`/`lon`,
//! `region`/`region_code` and `country_name`/`country` are all accepted.

use std::time::Duration;

use domain::value_objects::{GeoLocation, PlaceDetails};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;

/// Approximate location of the caller
#[derive(Debug, Clone, PartialEq)]
pub struct IpPlace {
    pub position: GeoLocation,
    pub place: PlaceDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IpApiResponse {
    latitude: Option<Value>,
    lat: Option<Value>,
    longitude: Option<Value>,
    lon: Option<Value>,
    city: Option<Value>,
    region: Option<Value>,
    region_code: Option<Value>,
    country_name: Option<Value>,
    country: Option<Value>,
}

/// Numeric value of a number or numeric string
fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Text of a non-empty scalar
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl IpApiResponse {
    fn into_place(self) -> Option<IpPlace> {
        let latitude = number(self.latitude.as_ref().or(self.lat.as_ref()))?;
        let longitude = number(self.longitude.as_ref().or(self.lon.as_ref()))?;
        let position = GeoLocation::new(latitude, longitude).ok()?;
        let place = PlaceDetails::new(
            text(self.city.as_ref()),
            text(self.region.as_ref()).or_else(|| text(self.region_code.as_ref())),
            text(self.country_name.as_ref()).or_else(|| text(self.country.as_ref())),
        );
        Some(IpPlace { position, place })
    }
}

/// Client for the IP location endpoint
#[derive(Debug)]
pub struct IpLocationClient {
    client: Client,
    url: String,
}

impl IpLocationClient {
    /// Create a new client
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
        Ok(Self {
            client,
            url: config.ip_lookup_url.clone(),
        })
    }

    /// Look up the caller's location
    ///
    /// Returns `None` for a non-success status or when the response carries
    /// no usable coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparsable body.
    #[instrument(skip(self))]
    pub async fn lookup(&self) -> Result<Option<IpPlace>, GeocodingError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeocodingError::from_reqwest(&e))?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "IP lookup returned no location");
            return Ok(None);
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;
        let place = data.into_place();
        debug!(found = place.is_some(), "IP lookup finished");
        Ok(place)
    }
}
