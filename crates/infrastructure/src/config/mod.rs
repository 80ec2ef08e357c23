//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server and log output settings
//! - `storage`: state file, device position and favorites settings
//!
//! The weather and geocoding sections reuse the integration crates' own
//! config types. Search settings come from the application layer.

mod server;
mod storage;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use application::SearchConfig;
use integration_geocoding::GeocodingConfig;
use integration_weather::WeatherConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::{Validate, ValidateUrl};

pub use server::ServerConfig;
pub use storage::{FavoritesConfig, GeoLocationConfig, LocationConfig, StorageConfig};

/// Prefix of environment overrides, e.g. `SKYCAST_SERVER__PORT`
pub const ENV_PREFIX: &str = "SKYCAST";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Controls CORS strictness and default behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Production environment
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Forecast client configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Geocoding clients configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// State file configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Location sources
    #[serde(default)]
    pub location: LocationConfig,

    /// Debounced search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Favorites settings
    #[serde(default)]
    pub favorites: FavoritesConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"), None)
    }

    /// Load configuration from a file stem and environment
    ///
    /// The file is optional. `env` replaces the process environment when
    /// given. Environment keys use `__` between sections, e.g.
    /// `SKYCAST_WEATHER__TIMEZONE`.
    pub fn load_from(
        file: &Path,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file_name = file.to_string_lossy();
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name(&file_name).required(false))
            // Override with environment variables (e.g., SKYCAST_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true)
                    .source(env),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(environment = %config.environment, "Configuration loaded");
        Ok(config)
    }

    /// Reject values the services cannot work with
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let urls = [
            ("weather.base_url", &self.weather.base_url),
            ("geocoding.search_base_url", &self.geocoding.search_base_url),
            ("geocoding.nominatim_base_url", &self.geocoding.nominatim_base_url),
            ("geocoding.ip_lookup_url", &self.geocoding.ip_lookup_url),
        ];
        for (key, url) in urls {
            let http = url.starts_with("http://") || url.starts_with("https://");
            if !http || !url.validate_url() {
                return Err(config::ConfigError::Message(format!(
                    "{key} must be an http(s) URL, got '{url}'"
                )));
            }
        }

        if let Some(device) = self.location.device {
            device.validate().map_err(|e| {
                config::ConfigError::Message(format!("location.device is out of range: {e}"))
            })?;
        }

        if self.weather.timezone.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "weather.timezone must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether CORS should allow any origin
    #[must_use]
    pub fn cors_allows_any(&self) -> bool {
        self.server.allowed_origins.is_empty() && self.environment == Environment::Development
    }
}
