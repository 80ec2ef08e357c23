//! Provider response models

use domain::entities::PlaceSuggestion;
use domain::value_objects::PlaceDetails;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label used when reverse geocoding finds nothing
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// Result of a label-style reverse lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReverseLabel {
    /// `"{place}, {country}"`, or whichever half is known
    Found(String),
    /// The provider returned no results
    Unknown,
    /// The provider answered with a non-success status
    UpstreamFailed { status: u16, details: String },
}

impl ReverseLabel {
    /// Text shown for the label
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Found(label) => label,
            Self::Unknown | Self::UpstreamFailed { .. } => UNKNOWN_LOCATION,
        }
    }
}

/// Open-Meteo search/reverse response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct OpenMeteoResults {
    #[serde(default)]
    pub results: Vec<OpenMeteoPlace>,
}

/// One Open-Meteo geocoding result
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct OpenMeteoPlace {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl OpenMeteoPlace {
    /// Build a suggestion; results without coordinates or name are dropped
    pub fn into_suggestion(self) -> Option<PlaceSuggestion> {
        let latitude = self.latitude.filter(|v| v.is_finite())?;
        let longitude = self.longitude.filter(|v| v.is_finite())?;
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        let id = match self.id {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => format!("{name}-{latitude}-{longitude}"),
        };
        Some(PlaceSuggestion {
            id,
            name,
            latitude,
            longitude,
            country: self.country,
            admin1: self.admin1,
        })
    }

    /// `"{place}, {country}"` where place is the first known of name,
    /// locality, admin1 and county
    pub fn label(&self) -> ReverseLabel {
        let place = non_empty(self.name.as_ref())
            .or_else(|| non_empty(self.locality.as_ref()))
            .or_else(|| non_empty(self.admin1.as_ref()))
            .or_else(|| non_empty(self.county.as_ref()));
        let country = non_empty(self.country.as_ref());
        match (place, country) {
            (Some(place), Some(country)) => ReverseLabel::Found(format!("{place}, {country}")),
            (Some(only), None) | (None, Some(only)) => ReverseLabel::Found(only.to_string()),
            (None, None) => ReverseLabel::Unknown,
        }
    }
}

/// Nominatim `reverse` response (jsonv2)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NominatimReverse {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: Option<NominatimAddress>,
}

/// Address block of a Nominatim result
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NominatimAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub hamlet: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl NominatimAddress {
    /// City is the first non-blank of city, town, village, hamlet, then county;
    /// region is state, then county
    #[must_use]
    pub fn place_details(&self) -> PlaceDetails {
        let city = non_empty(self.city.as_ref())
            .or_else(|| non_empty(self.town.as_ref()))
            .or_else(|| non_empty(self.village.as_ref()))
            .or_else(|| non_empty(self.hamlet.as_ref()))
            .filter(|c| !c.trim().is_empty())
            .or_else(|| non_empty(self.county.as_ref()).filter(|c| !c.trim().is_empty()));
        let region = non_empty(self.state.as_ref()).or_else(|| non_empty(self.county.as_ref()));
        PlaceDetails::new(
            city.map(str::to_string),
            region.map(str::to_string),
            self.country.clone(),
        )
    }
}

impl NominatimReverse {
    /// Structured place names; empty when the address block is missing
    #[must_use]
    pub fn place_details(&self) -> PlaceDetails {
        self.address
            .as_ref()
            .map(NominatimAddress::place_details)
            .unwrap_or_default()
    }
}
