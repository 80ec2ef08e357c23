//! Geocoding configuration

use serde::{Deserialize, Serialize};

/// Configuration shared by the geocoding clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Open-Meteo geocoding API base URL
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,

    /// Nominatim base URL
    #[serde(default = "default_nominatim_base_url")]
    pub nominatim_base_url: String,

    /// IP location lookup endpoint
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,

    /// User-Agent sent to Nominatim, required by its usage policy
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Result language
    #[serde(default = "default_language")]
    pub language: String,

    /// Upper bound for the number of search results
    #[serde(default = "default_max_results")]
    pub max_results: u8,

    /// Minimum spacing between Nominatim requests in milliseconds
    #[serde(default = "default_nominatim_interval_ms")]
    pub nominatim_interval_ms: u64,

    /// Cache TTL for structured reverse lookups in minutes (0 to disable)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u64,
}

fn default_search_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_ip_lookup_url() -> String {
    "https://ipapi.co/json/".to_string()
}

fn default_user_agent() -> String {
    concat!("skycast/", env!("CARGO_PKG_VERSION")).to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

const fn default_max_results() -> u8 {
    10
}

const fn default_nominatim_interval_ms() -> u64 {
    1100
}

const fn default_cache_ttl_minutes() -> u64 {
    60
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            search_base_url: default_search_base_url(),
            nominatim_base_url: default_nominatim_base_url(),
            ip_lookup_url: default_ip_lookup_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            language: default_language(),
            max_results: default_max_results(),
            nominatim_interval_ms: default_nominatim_interval_ms(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
        }
    }
}

impl GeocodingConfig {
    /// Configuration pointing every client at one base URL, without
    /// throttling or caching
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            search_base_url: base_url.to_string(),
            nominatim_base_url: base_url.to_string(),
            ip_lookup_url: format!("{base_url}/json/"),
            timeout_secs: 5,
            nominatim_interval_ms: 0,
            cache_ttl_minutes: 0,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GeocodingConfig::default();
        assert_eq!(config.search_base_url, "https://geocoding-api.open-meteo.com/v1");
        assert_eq!(config.nominatim_base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.ip_lookup_url, "https://ipapi.co/json/");
        assert!(config.user_agent.starts_with("skycast/"));
        assert_eq!(config.language, "en");
        assert_eq!(config.nominatim_interval_ms, 1100);
    }

    #[test]
    fn testing_config_disables_throttling() {
        let config = GeocodingConfig::for_testing("http://127.0.0.1:9");
        assert_eq!(config.nominatim_interval_ms, 0);
        assert_eq!(config.cache_ttl_minutes, 0);
        assert_eq!(config.ip_lookup_url, "http://127.0.0.1:9/json/");
    }

    #[test]
    fn partial_deserialization_uses_defaults() {
        let config: GeocodingConfig = serde_json::from_str(r#"{"timeout_secs": 3}"#).unwrap();
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.max_results, 10);
    }
}
