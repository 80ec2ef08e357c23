//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocoding_port;
mod key_value_store;
mod location_port;
mod proxy_port;
mod weather_port;

#[cfg(test)]
pub use geocoding_port::{MockGeocodingPort, MockReverseGeocodePort};
pub use geocoding_port::{GeocodingPort, ReverseGeocodePort};
pub use key_value_store::KeyValueStorePort;
#[cfg(test)]
pub use key_value_store::MockKeyValueStorePort;
#[cfg(test)]
pub use location_port::{MockDevicePositionPort, MockIpLocationPort};
pub use location_port::{DevicePositionPort, IpLocation, IpLocationPort};
#[cfg(test)]
pub use proxy_port::MockGeocodeProxyPort;
pub use proxy_port::{GeocodeProxyPort, LocationLabel, UpstreamResponse};
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::WeatherPort;
