//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the Open-Meteo and
//! Nominatim clients, the IP lookup, the JSON state file, configuration
//! loading and logging setup.

pub mod adapters;
pub mod config;
pub mod container;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, Environment, FavoritesConfig, GeoLocationConfig, LocationConfig, ServerConfig,
    StorageConfig,
};
pub use container::ServiceContainer;
pub use persistence::{InMemoryStore, JsonFileStore};
pub use telemetry::{LogFormat, TelemetryError, init_logging};
