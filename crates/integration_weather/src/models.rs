//! Open-Meteo API response models and normalization
//!
//! The raw structs mirror the forecast endpoint's JSON. Series values may be
//! `null` at any index, so every element is optional.

use domain::entities::{
    CurrentConditions, DailyForecastItem, HOURLY_LIMIT, HourlyForecastItem, WeatherPayload,
    WeatherProperties,
};
use serde::Deserialize;

/// Raw forecast response
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    pub current_weather: Option<RawCurrentWeather>,
    pub hourly: Option<RawHourly>,
    pub daily: Option<RawDaily>,
}

/// Raw `current_weather` block
#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrentWeather {
    pub time: String,
    pub temperature: Option<f64>,
    pub windspeed: Option<f64>,
    pub winddirection: Option<f64>,
    #[serde(default)]
    pub weathercode: Option<i32>,
}

/// Raw `hourly` block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawHourly {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub apparent_temperature: Vec<Option<f64>>,
    pub relativehumidity_2m: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub weathercode: Vec<Option<i32>>,
}

/// Raw `daily` block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDaily {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub weathercode: Vec<Option<i32>>,
}

fn value_at(series: &[Option<f64>], index: usize) -> f64 {
    series.get(index).copied().flatten().unwrap_or(f64::NAN)
}

fn code_at(series: &[Option<i32>], index: usize) -> i32 {
    series.get(index).copied().flatten().unwrap_or(0)
}

fn finite_at(series: &[Option<f64>], index: Option<usize>) -> Option<f64> {
    index
        .and_then(|i| series.get(i).copied().flatten())
        .filter(|v| v.is_finite())
}

/// Turn the raw blocks into a [`WeatherPayload`]
///
/// Properties are read at the hourly index whose timestamp equals the
/// current observation time exactly.
#[must_use]
pub fn normalize_forecast(
    current: RawCurrentWeather,
    hourly: &RawHourly,
    daily: Option<&RawDaily>,
) -> WeatherPayload {
    let current_index = hourly.time.iter().position(|t| *t == current.time);
    let windspeed = current.windspeed.unwrap_or(f64::NAN);

    let properties = WeatherProperties {
        feels_like: finite_at(&hourly.apparent_temperature, current_index),
        humidity: finite_at(&hourly.relativehumidity_2m, current_index),
        wind: Some(windspeed).filter(|w| w.is_finite()),
        precipitation: finite_at(&hourly.precipitation, current_index),
    };

    let hourly_items = hourly
        .time
        .iter()
        .take(HOURLY_LIMIT)
        .enumerate()
        .map(|(i, time)| {
            HourlyForecastItem::new(
                time.clone(),
                value_at(&hourly.temperature_2m, i),
                code_at(&hourly.weathercode, i),
            )
        })
        .collect();

    let daily_items = daily.map_or_else(Vec::new, |d| {
        d.time
            .iter()
            .enumerate()
            .map(|(i, date)| {
                DailyForecastItem::new(
                    date.clone(),
                    value_at(&d.temperature_2m_max, i),
                    value_at(&d.temperature_2m_min, i),
                    code_at(&d.weathercode, i),
                )
            })
            .collect()
    });

    WeatherPayload {
        current: CurrentConditions {
            temperature: current.temperature.unwrap_or(f64::NAN),
            windspeed,
            // A zero direction is reported as absent
            winddirection: current.winddirection.filter(|d| *d != 0.0),
            weathercode: current.weathercode.unwrap_or(0),
            time: current.time,
        },
        properties,
        daily: daily_items,
        hourly: hourly_items,
    }
}
