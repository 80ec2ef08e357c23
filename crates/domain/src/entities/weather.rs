//! Normalized weather payload
//!
//! Built once per successful forecast fetch and replaced wholesale on the
//! next one. Missing series values are carried as `NaN`, which serializes
//! to JSON `null`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::value_objects::{BackgroundKind, WeatherKind};

/// Number of hourly entries kept in a payload
pub const HOURLY_LIMIT: usize = 24;

/// Number of daily entries shown in a forecast view
pub const DAILY_DISPLAY_LIMIT: usize = 7;

fn nan_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Parse a local timestamp as reported by Open-Meteo
///
/// Accepts `2024-01-01T00:00` and `2024-01-01T00:00:00`.
#[must_use]
pub fn parse_local_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Conditions at the time of the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Air temperature in °C
    #[serde(deserialize_with = "nan_if_null")]
    pub temperature: f64,
    /// Wind speed in km/h
    #[serde(deserialize_with = "nan_if_null")]
    pub windspeed: f64,
    /// Wind direction in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winddirection: Option<f64>,
    /// WMO weather code
    pub weathercode: i32,
    /// Local observation time, e.g. `2024-01-01T00:00`
    pub time: String,
}

impl CurrentConditions {
    /// Observation time as a timestamp
    #[must_use]
    pub fn local_time(&self) -> Option<NaiveDateTime> {
        parse_local_time(&self.time)
    }
}

/// Values derived from the hourly series at the current timestamp
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherProperties {
    /// Apparent temperature in °C
    pub feels_like: Option<f64>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    /// Wind speed in km/h
    pub wind: Option<f64>,
    /// Precipitation in mm
    pub precipitation: Option<f64>,
}

/// One hour of forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastItem {
    /// Local time
    pub time: String,
    /// Temperature in °C, `NaN` when missing
    #[serde(deserialize_with = "nan_if_null")]
    pub temp: f64,
    /// WMO weather code
    pub weathercode: i32,
    /// Icon path for the code
    pub icon: String,
}

impl HourlyForecastItem {
    /// Build an entry, deriving the icon from the code
    #[must_use]
    pub fn new(time: String, temp: f64, weathercode: i32) -> Self {
        Self {
            time,
            temp,
            weathercode,
            icon: WeatherKind::from_wmo_code(weathercode).icon_path().to_string(),
        }
    }

    /// Classified condition
    #[must_use]
    pub const fn kind(&self) -> WeatherKind {
        WeatherKind::from_wmo_code(self.weathercode)
    }
}

/// One day of forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecastItem {
    /// Local date, e.g. `2024-01-01`
    pub date: String,
    /// Maximum temperature in °C, `NaN` when missing
    #[serde(deserialize_with = "nan_if_null")]
    pub max_temp: f64,
    /// Minimum temperature in °C, `NaN` when missing
    #[serde(deserialize_with = "nan_if_null")]
    pub min_temp: f64,
    /// WMO weather code
    pub weathercode: i32,
    /// Icon path for the code
    pub icon: String,
}

impl DailyForecastItem {
    /// Build an entry, deriving the icon from the code
    #[must_use]
    pub fn new(date: String, max_temp: f64, min_temp: f64, weathercode: i32) -> Self {
        Self {
            date,
            max_temp,
            min_temp,
            weathercode,
            icon: WeatherKind::from_wmo_code(weathercode).icon_path().to_string(),
        }
    }

    /// Date as a calendar value
    #[must_use]
    pub fn local_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Complete normalized forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub current: CurrentConditions,
    pub properties: WeatherProperties,
    pub daily: Vec<DailyForecastItem>,
    pub hourly: Vec<HourlyForecastItem>,
}

impl WeatherPayload {
    /// Classified current condition
    #[must_use]
    pub const fn kind(&self) -> WeatherKind {
        WeatherKind::from_wmo_code(self.current.weathercode)
    }

    /// Background preset for the current condition
    #[must_use]
    pub const fn background(&self) -> BackgroundKind {
        self.kind().background()
    }

    /// Icon for the hero view: the first hourly entry, else overcast
    #[must_use]
    pub fn hero_icon(&self) -> &str {
        self.hourly
            .first()
            .map_or(WeatherKind::Overcast.icon_path(), |h| h.icon.as_str())
    }
}
