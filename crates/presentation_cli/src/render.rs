//! Plain-text rendering
//!
//! Every value passes through [`domain::formatting`] so the output uses the
//! stored units and the dashboard's rounding.

use domain::entities::{FavoriteItem, PlaceSuggestion, WeatherPayload, parse_local_time};
use domain::formatting::{
    format_humidity, format_long_date, format_precipitation, format_temperature, format_wind,
    hour_label, weekday_short,
};
use domain::value_objects::{UnitPreferences, UserLocation, WeatherKind};

/// Forecast for one location
#[must_use]
pub fn weather(
    location: &UserLocation,
    payload: &WeatherPayload,
    units: UnitPreferences,
    days: usize,
) -> String {
    let current = &payload.current;
    let date = current
        .local_time()
        .map_or_else(|| current.time.clone(), |t| format_long_date(t.date()));

    let mut lines = vec![
        location.display_name(),
        format!("{date} · {}", payload.kind().description()),
        String::new(),
        row(
            "Temperature",
            format_temperature(Some(current.temperature), units.temperature),
        ),
        row(
            "Feels like",
            format_temperature(payload.properties.feels_like, units.temperature),
        ),
        row("Humidity", format_humidity(payload.properties.humidity)),
        row("Wind", format_wind(payload.properties.wind, units.wind)),
        row(
            "Precipitation",
            format_precipitation(payload.properties.precipitation, units.precipitation),
        ),
    ];

    if !payload.hourly.is_empty() {
        lines.push(String::new());
        lines.push("Hourly".to_string());
        lines.extend(payload.hourly.iter().map(|hour| {
            let label = parse_local_time(&hour.time).map_or_else(|| hour.time.clone(), hour_label);
            format!(
                "  {label:>5}  {:>5}  {}",
                format_temperature(Some(hour.temp), units.temperature),
                WeatherKind::from_wmo_code(hour.weathercode).description()
            )
        }));
    }

    let daily: Vec<_> = payload.daily.iter().take(days).collect();
    if !daily.is_empty() {
        lines.push(String::new());
        lines.push("Daily".to_string());
        lines.extend(daily.into_iter().map(|day| {
            let label = day
                .local_date()
                .map_or_else(|| day.date.clone(), weekday_short);
            format!(
                "  {label:<3}  {:>5} / {:<5}  {}",
                format_temperature(Some(day.max_temp), units.temperature),
                format_temperature(Some(day.min_temp), units.temperature),
                WeatherKind::from_wmo_code(day.weathercode).description()
            )
        }));
    }

    lines.join("\n")
}

fn row(label: &str, value: String) -> String {
    format!("{label:<14}{value}")
}

/// Search suggestions, one per line
#[must_use]
pub fn suggestions(places: &[PlaceSuggestion]) -> String {
    places
        .iter()
        .map(|p| format!("{}  ({:.4}, {:.4})", p.label(), p.latitude, p.longitude))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A resolved location
#[must_use]
pub fn location(location: &UserLocation) -> String {
    format!(
        "{}  ({:.4}, {:.4})",
        location.display_name(),
        location.latitude,
        location.longitude
    )
}

/// Saved places with their ids
#[must_use]
pub fn favorites(items: &[FavoriteItem]) -> String {
    if items.is_empty() {
        return "No favorites saved".to_string();
    }
    items
        .iter()
        .map(|f| match f.position() {
            Some(p) => format!("{}  {}  ({p})", f.id, f.name),
            None => format!("{}  {}", f.id, f.name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Current unit selection
#[must_use]
pub fn units(units: UnitPreferences) -> String {
    [
        row("Temperature", units.temperature.to_string()),
        row("Wind", units.wind.to_string()),
        row("Precipitation", units.precipitation.to_string()),
    ]
    .join("\n")
}
