//! Measurement units and conversions
//!
//! Upstream weather data is always metric: temperatures in °C, wind speed in
//! km/h and precipitation in mm. The conversion helpers turn those values into
//! the unit the user selected. They never round; the display layer does.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::{convert_temp, convert_wind, TemperatureUnit, WindUnit};
//!
//! assert!((convert_temp(100.0, TemperatureUnit::Fahrenheit) - 212.0).abs() < 1e-9);
//! assert!((convert_wind(0.0, WindUnit::Mph)).abs() < f64::EPSILON);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Kilometres per hour to miles per hour
pub const KMH_TO_MPH: f64 = 0.621_371_192_237_33;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Temperature display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    /// Degrees Celsius
    #[default]
    #[serde(rename = "C")]
    Celsius,
    /// Degrees Fahrenheit
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Short code as persisted
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

/// Wind speed display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindUnit {
    /// Kilometres per hour
    #[default]
    #[serde(rename = "kmh")]
    Kmh,
    /// Miles per hour
    #[serde(rename = "mph")]
    Mph,
}

impl WindUnit {
    /// Short code as persisted
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Kmh => "kmh",
            Self::Mph => "mph",
        }
    }

    /// Label shown next to a value
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Kmh => "km/h",
            Self::Mph => "mph",
        }
    }
}

/// Precipitation display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrecipitationUnit {
    /// Millimetres
    #[default]
    #[serde(rename = "mm")]
    Millimeters,
    /// Inches
    #[serde(rename = "in")]
    Inches,
}

impl PrecipitationUnit {
    /// Short code as persisted
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Inches => "in",
        }
    }
}

macro_rules! unit_code_impls {
    ($ty:ty, $kind:literal, $($code:literal => $variant:expr),+ $(,)?) => {
        impl FromStr for $ty {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($code => Ok($variant),)+
                    other => Err(DomainError::invalid_unit($kind, other)),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

unit_code_impls!(TemperatureUnit, "temperature", "C" => Self::Celsius, "F" => Self::Fahrenheit);
unit_code_impls!(WindUnit, "wind", "kmh" => Self::Kmh, "mph" => Self::Mph);
unit_code_impls!(PrecipitationUnit, "precipitation", "mm" => Self::Millimeters, "in" => Self::Inches);

/// The user's selected display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitPreferences {
    /// Temperature unit
    pub temperature: TemperatureUnit,
    /// Wind speed unit
    pub wind: WindUnit,
    /// Precipitation unit
    pub precipitation: PrecipitationUnit,
}

/// Convert a Celsius temperature into `unit`
///
/// Any non-finite input yields `NaN`, whatever the unit.
#[must_use]
pub fn convert_temp(value_c: f64, unit: TemperatureUnit) -> f64 {
    if !value_c.is_finite() {
        return f64::NAN;
    }
    match unit {
        TemperatureUnit::Celsius => value_c,
        TemperatureUnit::Fahrenheit => value_c * 9.0 / 5.0 + 32.0,
    }
}

/// Convert a km/h wind speed into `unit`
#[must_use]
pub fn convert_wind(value_kmh: f64, unit: WindUnit) -> f64 {
    match unit {
        WindUnit::Kmh => value_kmh,
        WindUnit::Mph => value_kmh * KMH_TO_MPH,
    }
}

/// Convert a millimetre precipitation amount into `unit`
#[must_use]
pub fn convert_precip(value_mm: f64, unit: PrecipitationUnit) -> f64 {
    match unit {
        PrecipitationUnit::Millimeters => value_mm,
        PrecipitationUnit::Inches => value_mm / MM_PER_INCH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_to_fahrenheit_reference_points() {
        assert!((convert_temp(0.0, TemperatureUnit::Fahrenheit) - 32.0).abs() < f64::EPSILON);
        assert!((convert_temp(100.0, TemperatureUnit::Fahrenheit) - 212.0).abs() < f64::EPSILON);
        assert!((convert_temp(-40.0, TemperatureUnit::Fahrenheit) + 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn celsius_is_identity() {
        assert!((convert_temp(20.0, TemperatureUnit::Celsius) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_temperature_is_nan() {
        assert!(convert_temp(f64::NAN, TemperatureUnit::Fahrenheit).is_nan());
        assert!(convert_temp(f64::NAN, TemperatureUnit::Celsius).is_nan());
        assert!(convert_temp(f64::INFINITY, TemperatureUnit::Celsius).is_nan());
        assert!(convert_temp(f64::NEG_INFINITY, TemperatureUnit::Fahrenheit).is_nan());
    }

    #[test]
    fn wind_conversion() {
        assert!((convert_wind(100.0, WindUnit::Mph) - 62.137_119_223_733).abs() < 1e-9);
        assert!(convert_wind(0.0, WindUnit::Mph).abs() < f64::EPSILON);
        assert!((convert_wind(15.0, WindUnit::Kmh) - 15.0).abs() < f64::EPSILON);
        assert!(convert_wind(f64::NAN, WindUnit::Mph).is_nan());
    }

    #[test]
    fn precipitation_conversion() {
        assert!((convert_precip(25.4, PrecipitationUnit::Inches) - 1.0).abs() < f64::EPSILON);
        assert!(convert_precip(0.0, PrecipitationUnit::Millimeters).abs() < f64::EPSILON);
        assert!(convert_precip(f64::NAN, PrecipitationUnit::Inches).is_nan());
    }

    #[test]
    fn unit_codes_parse() {
        assert_eq!("C".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Celsius));
        assert_eq!("F".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Fahrenheit));
        assert_eq!("mph".parse::<WindUnit>(), Ok(WindUnit::Mph));
        assert_eq!(" in ".parse::<PrecipitationUnit>(), Ok(PrecipitationUnit::Inches));
    }

    #[test]
    fn unknown_code_rejected() {
        let err = "K".parse::<TemperatureUnit>().expect_err("K is not a unit");
        assert_eq!(err, DomainError::invalid_unit("temperature", "K"));
        assert!("knots".parse::<WindUnit>().is_err());
        assert!("cm".parse::<PrecipitationUnit>().is_err());
    }

    #[test]
    fn display_matches_code() {
        assert_eq!(TemperatureUnit::Fahrenheit.to_string(), "F");
        assert_eq!(WindUnit::Kmh.to_string(), "kmh");
        assert_eq!(PrecipitationUnit::Millimeters.to_string(), "mm");
    }

    #[test]
    fn serde_uses_codes() {
        let prefs = UnitPreferences {
            temperature: TemperatureUnit::Fahrenheit,
            wind: WindUnit::Mph,
            precipitation: PrecipitationUnit::Inches,
        };
        let json = serde_json::to_value(prefs).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"temperature": "F", "wind": "mph", "precipitation": "in"})
        );
    }

    #[test]
    fn defaults_are_metric() {
        let prefs = UnitPreferences::default();
        assert_eq!(prefs.temperature, TemperatureUnit::Celsius);
        assert_eq!(prefs.wind, WindUnit::Kmh);
        assert_eq!(prefs.precipitation, PrecipitationUnit::Millimeters);
    }
}
