//! Weather-code classification
//!
//! Open-Meteo reports conditions as WMO weather interpretation codes.
//! [`WeatherKind::from_wmo_code`] is the only place those codes are bucketed;
//! icons, background presets and descriptions are all derived from the
//! resulting variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse weather category derived from a WMO code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherKind {
    /// Clear sky (0)
    Clear,
    /// Mainly clear to overcast sky (1-3)
    PartlyCloudy,
    /// Fog and depositing rime fog (45, 48)
    Fog,
    /// Drizzle, including freezing drizzle (51-57)
    Drizzle,
    /// Rain, freezing rain and showers (61-67, 80-82, 85-86)
    Rain,
    /// Snow fall and snow grains (71-77)
    Snow,
    /// Thunderstorms (95-99)
    Storm,
    /// Any other code
    Overcast,
}

/// Background animation preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundKind {
    Clear,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Storm,
}

impl WeatherKind {
    /// Classify a WMO weather code
    ///
    /// Total over all integers: unknown codes fall back to `Overcast`.
    #[must_use]
    pub const fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::PartlyCloudy,
            45 | 48 => Self::Fog,
            51..=57 => Self::Drizzle,
            61..=67 | 80..=82 | 85 | 86 => Self::Rain,
            71..=77 => Self::Snow,
            95..=99 => Self::Storm,
            _ => Self::Overcast,
        }
    }

    /// Kebab-case identifier, e.g. `partly-cloudy`
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Fog => "fog",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Storm => "storm",
            Self::Overcast => "overcast",
        }
    }

    /// Public path of the icon for this kind
    #[must_use]
    pub const fn icon_path(&self) -> &'static str {
        match self {
            Self::Clear => "/images/icon-sunny.webp",
            Self::PartlyCloudy => "/images/icon-partly-cloudy.webp",
            Self::Fog => "/images/icon-fog.webp",
            Self::Drizzle => "/images/icon-drizzle.webp",
            Self::Rain => "/images/icon-rain.webp",
            Self::Snow => "/images/icon-snow.webp",
            Self::Storm => "/images/icon-storm.webp",
            Self::Overcast => "/images/icon-overcast.webp",
        }
    }

    /// Background preset for this kind
    #[must_use]
    pub const fn background(&self) -> BackgroundKind {
        match self {
            Self::Clear => BackgroundKind::Clear,
            Self::PartlyCloudy | Self::Overcast => BackgroundKind::Cloudy,
            Self::Fog => BackgroundKind::Fog,
            Self::Drizzle | Self::Rain => BackgroundKind::Rain,
            Self::Snow => BackgroundKind::Snow,
            Self::Storm => BackgroundKind::Storm,
        }
    }

    /// Human-readable description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear sky",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Storm => "Thunderstorm",
            Self::Overcast => "Overcast",
        }
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl BackgroundKind {
    /// Kebab-case identifier
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Fog => "fog",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Storm => "storm",
        }
    }
}

impl fmt::Display for BackgroundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_codes() {
        assert_eq!(WeatherKind::from_wmo_code(0), WeatherKind::Clear);
        assert_eq!(WeatherKind::from_wmo_code(2), WeatherKind::PartlyCloudy);
        assert_eq!(WeatherKind::from_wmo_code(48), WeatherKind::Fog);
        assert_eq!(WeatherKind::from_wmo_code(65), WeatherKind::Rain);
        assert_eq!(WeatherKind::from_wmo_code(73), WeatherKind::Snow);
        assert_eq!(WeatherKind::from_wmo_code(99), WeatherKind::Storm);
    }

    #[test]
    fn unknown_codes_fall_back_to_overcast() {
        assert_eq!(WeatherKind::from_wmo_code(-1), WeatherKind::Overcast);
        assert_eq!(WeatherKind::from_wmo_code(4), WeatherKind::Overcast);
        assert_eq!(WeatherKind::from_wmo_code(100), WeatherKind::Overcast);
        assert_eq!(WeatherKind::from_wmo_code(i32::MIN), WeatherKind::Overcast);
    }

    #[test]
    fn three_and_four_land_in_defined_buckets() {
        assert_eq!(WeatherKind::from_wmo_code(3), WeatherKind::PartlyCloudy);
        assert_eq!(WeatherKind::from_wmo_code(4), WeatherKind::Overcast);
    }

    #[test]
    fn drizzle_and_rain_split_for_icons_merge_for_background() {
        let drizzle = WeatherKind::from_wmo_code(53);
        let rain = WeatherKind::from_wmo_code(81);
        assert_eq!(drizzle, WeatherKind::Drizzle);
        assert_eq!(rain, WeatherKind::Rain);
        assert_ne!(drizzle.icon_path(), rain.icon_path());
        assert_eq!(drizzle.background(), BackgroundKind::Rain);
        assert_eq!(rain.background(), BackgroundKind::Rain);
    }

    #[test]
    fn showers_of_snow_pellets_are_rain() {
        assert_eq!(WeatherKind::from_wmo_code(85), WeatherKind::Rain);
        assert_eq!(WeatherKind::from_wmo_code(86), WeatherKind::Rain);
    }

    #[test]
    fn icon_paths() {
        assert_eq!(WeatherKind::Clear.icon_path(), "/images/icon-sunny.webp");
        assert_eq!(
            WeatherKind::from_wmo_code(4).icon_path(),
            "/images/icon-overcast.webp"
        );
    }

    #[test]
    fn cloudy_background_covers_partly_cloudy_and_overcast() {
        assert_eq!(WeatherKind::PartlyCloudy.background(), BackgroundKind::Cloudy);
        assert_eq!(WeatherKind::Overcast.background(), BackgroundKind::Cloudy);
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&WeatherKind::PartlyCloudy).expect("serialize");
        assert_eq!(json, "\"partly-cloudy\"");
        assert_eq!(WeatherKind::PartlyCloudy.to_string(), "partly-cloudy");
    }
}
