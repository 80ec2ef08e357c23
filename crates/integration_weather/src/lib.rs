//! Open-Meteo weather integration
//!
//! Client for the Open-Meteo forecast API (<https://open-meteo.com>).
//! Fetches current, hourly and daily data in one request and normalizes it
//! into the domain [`WeatherPayload`](domain::entities::WeatherPayload).

pub mod client;
mod models;

pub use client::{
    DAILY_FIELDS, HOURLY_FIELDS, OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError,
};
pub use models::{RawCurrentWeather, RawDaily, RawForecast, RawHourly, normalize_forecast};
