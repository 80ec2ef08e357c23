//! Place search results

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// A place returned by a free-text search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    /// Provider identifier
    pub id: String,
    /// Place name
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// First-level administrative area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,
}

impl PlaceSuggestion {
    /// Coordinates of the place
    #[must_use]
    pub const fn position(&self) -> GeoLocation {
        GeoLocation::new_unchecked(self.latitude, self.longitude)
    }

    /// `"Name, Country"` or just the name
    #[must_use]
    pub fn label(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {country}", self.name),
            None => self.name.clone(),
        }
    }
}
