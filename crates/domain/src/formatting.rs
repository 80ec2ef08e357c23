//! Display formatting for converted values
//!
//! Values are converted into the selected unit and rounded the way the
//! dashboard shows them. Missing or non-finite values render as `--`.

use chrono::{NaiveDate, NaiveDateTime};

use crate::value_objects::{
    PrecipitationUnit, TemperatureUnit, WindUnit, convert_precip, convert_temp, convert_wind,
};

/// Placeholder for unknown values
pub const PLACEHOLDER: &str = "--";

/// Round half-way cases towards positive infinity
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor() + 0.0
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Temperature such as `21°`
#[must_use]
pub fn format_temperature(value_c: Option<f64>, unit: TemperatureUnit) -> String {
    finite(value_c).map_or_else(
        || PLACEHOLDER.to_string(),
        |v| format!("{}°", round_half_up(convert_temp(v, unit))),
    )
}

/// Wind speed such as `12 km/h`
#[must_use]
pub fn format_wind(value_kmh: Option<f64>, unit: WindUnit) -> String {
    finite(value_kmh).map_or_else(
        || PLACEHOLDER.to_string(),
        |v| format!("{} {}", round_half_up(convert_wind(v, unit)), unit.label()),
    )
}

/// Precipitation with one decimal, such as `0.4 mm`
#[must_use]
pub fn format_precipitation(value_mm: Option<f64>, unit: PrecipitationUnit) -> String {
    finite(value_mm).map_or_else(
        || PLACEHOLDER.to_string(),
        |v| format!("{:.1} {}", convert_precip(v, unit), unit.code()),
    )
}

/// Relative humidity such as `65%`
#[must_use]
pub fn format_humidity(value: Option<f64>) -> String {
    finite(value).map_or_else(
        || PLACEHOLDER.to_string(),
        |v| format!("{}%", round_half_up(v)),
    )
}

/// Long date such as `Monday, January 1, 2024`
#[must_use]
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Abbreviated weekday such as `Mon`
#[must_use]
pub fn weekday_short(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Hour label such as `3 PM`
#[must_use]
pub fn hour_label(time: NaiveDateTime) -> String {
    time.format("%-I %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_like_the_dashboard() {
        assert!((round_half_up(2.5) - 3.0).abs() < f64::EPSILON);
        assert!((round_half_up(-2.5) + 2.0).abs() < f64::EPSILON);
        assert!((round_half_up(-0.4)).abs() < f64::EPSILON);
        assert!(round_half_up(-0.4).is_sign_positive());
    }

    #[test]
    fn temperature() {
        assert_eq!(format_temperature(Some(21.4), TemperatureUnit::Celsius), "21°");
        assert_eq!(format_temperature(Some(0.0), TemperatureUnit::Fahrenheit), "32°");
        assert_eq!(format_temperature(None, TemperatureUnit::Celsius), "--");
        assert_eq!(format_temperature(Some(f64::NAN), TemperatureUnit::Celsius), "--");
    }

    #[test]
    fn wind() {
        assert_eq!(format_wind(Some(12.3), WindUnit::Kmh), "12 km/h");
        assert_eq!(format_wind(Some(100.0), WindUnit::Mph), "62 mph");
        assert_eq!(format_wind(None, WindUnit::Mph), "--");
    }

    #[test]
    fn precipitation() {
        assert_eq!(format_precipitation(Some(0.0), PrecipitationUnit::Millimeters), "0.0 mm");
        assert_eq!(format_precipitation(Some(25.4), PrecipitationUnit::Inches), "1.0 in");
        assert_eq!(format_precipitation(None, PrecipitationUnit::Inches), "--");
    }

    #[test]
    fn humidity() {
        assert_eq!(format_humidity(Some(64.6)), "65%");
        assert_eq!(format_humidity(Some(f64::INFINITY)), "--");
    }

    #[test]
    fn dates() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        assert_eq!(format_long_date(date), "Monday, January 1, 2024");
        assert_eq!(weekday_short(date), "Mon");
        let time = date.and_hms_opt(15, 0, 0).expect("valid time");
        assert_eq!(hour_label(time), "3 PM");
        let midnight = date.and_hms_opt(0, 0, 0).expect("valid time");
        assert_eq!(hour_label(midnight), "12 AM");
    }
}
