//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod geocoding_adapter;
mod location_adapter;
mod weather_adapter;

pub use geocoding_adapter::GeocodingAdapter;
pub use location_adapter::{FixedPositionAdapter, IpLocationAdapter};
pub use weather_adapter::WeatherAdapter;
