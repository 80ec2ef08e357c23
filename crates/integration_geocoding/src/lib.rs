//! Geocoding integration
//!
//! Clients for the place lookups Skycast needs:
//! - [`OpenMeteoGeocoder`]: free-text place search and label-style reverse
//!   geocoding via the Open-Meteo geocoding API
//! - [`NominatimClient`]: structured reverse geocoding via OpenStreetMap
//!   Nominatim, plus a raw passthrough for the proxy endpoint
//! - [`IpLocationClient`]: approximate location from the caller's IP
//!
//! None of these services require an API key.

mod config;
mod error;
mod ip_lookup;
mod models;
mod nominatim;
mod open_meteo;

pub use config::GeocodingConfig;
pub use error::GeocodingError;
pub use ip_lookup::{IpLocationClient, IpPlace};
pub use models::{NominatimAddress, NominatimReverse, ReverseLabel, UNKNOWN_LOCATION};
pub use nominatim::{NominatimClient, RawResponse};
pub use open_meteo::{OpenMeteoGeocoder, PlaceSearchClient};
