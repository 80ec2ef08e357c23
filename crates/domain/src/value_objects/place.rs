//! Place names and resolved user locations

use serde::{Deserialize, Serialize};

use super::GeoLocation;

/// Best-effort place names for a coordinate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceDetails {
    /// City, town, village or hamlet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State, province or county
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Country name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl PlaceDetails {
    /// Build from optional parts, dropping blank strings
    #[must_use]
    pub fn new(city: Option<String>, region: Option<String>, country: Option<String>) -> Self {
        Self {
            city: non_blank(city),
            region: non_blank(region),
            country: non_blank(country),
        }
    }

    /// Whether no field is known
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.city.is_none() && self.region.is_none() && self.country.is_none()
    }

    /// Fill each missing field from `fallback`
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            city: self.city.or(fallback.city),
            region: self.region.or(fallback.region),
            country: self.country.or(fallback.country),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// A resolved user location
///
/// Coordinates are always present; place names may not be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl UserLocation {
    /// Combine a coordinate with place details
    #[must_use]
    pub fn new(position: GeoLocation, place: PlaceDetails) -> Self {
        Self {
            latitude: position.latitude(),
            longitude: position.longitude(),
            city: place.city,
            region: place.region,
            country: place.country,
        }
    }

    /// Coordinates as a value object
    #[must_use]
    pub const fn position(&self) -> GeoLocation {
        GeoLocation::new_unchecked(self.latitude, self.longitude)
    }

    /// Place names as a value object
    #[must_use]
    pub fn place(&self) -> PlaceDetails {
        PlaceDetails {
            city: self.city.clone(),
            region: self.region.clone(),
            country: self.country.clone(),
        }
    }

    /// Label for display
    ///
    /// `"City, Country"` when both are known, otherwise the most specific
    /// name available, otherwise the coordinates.
    #[must_use]
    pub fn display_name(&self) -> String {
        let place = self.city.as_deref().or(self.region.as_deref());
        match (place, self.country.as_deref()) {
            (Some(place), Some(country)) => format!("{place}, {country}"),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => self.position().to_string(),
        }
    }
}
