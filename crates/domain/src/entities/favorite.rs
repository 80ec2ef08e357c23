//! Saved favorite places
//!
//! A favorite is identified by a string derived from its trimmed name and
//! coordinates. Two entries are duplicates when both carry coordinates that
//! agree within [`GeoLocation::approx_eq`] tolerance, or, when either lacks
//! coordinates, when their names match case-insensitively after trimming.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// Normalize a name for duplicate comparison
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// A request to save a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewFavorite {
    /// Display name as typed or selected
    #[validate(
        custom(function = "not_blank"),
        length(max = 120, message = "must be at most 120 characters")
    )]
    pub name: String,
    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: Option<f64>,
}

impl NewFavorite {
    /// Favorite with a name only
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latitude: None,
            longitude: None,
        }
    }

    /// Favorite with a name and coordinates
    pub fn at(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Both coordinates, when present
    #[must_use]
    pub const fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Trimmed name of a request that passed validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` when the name is blank or too
    /// long, and `DomainError::InvalidCoordinates` when a coordinate is out
    /// of range or not a number.
    pub fn validated_name(&self) -> Result<&str, DomainError> {
        self.validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;
        if let Some((latitude, longitude)) = self.coordinates() {
            GeoLocation::new(latitude, longitude)?;
        }
        Ok(self.name.trim())
    }
}

/// A stored favorite place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteItem {
    /// Deterministic identifier, `"{name}-{lat|na}-{lon|na}"`
    pub id: String,
    /// Trimmed display name, original casing kept
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl FavoriteItem {
    /// Create a favorite, trimming the name and deriving the id
    #[must_use]
    pub fn new(name: &str, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        let name = name.trim().to_string();
        let id = Self::derive_id(&name, latitude, longitude);
        Self {
            id,
            name,
            latitude,
            longitude,
        }
    }

    /// Identifier for a name and optional coordinates
    #[must_use]
    pub fn derive_id(name: &str, latitude: Option<f64>, longitude: Option<f64>) -> String {
        fn part(value: Option<f64>) -> String {
            value.map_or_else(|| "na".to_string(), |v| v.to_string())
        }
        format!("{}-{}-{}", name.trim(), part(latitude), part(longitude))
    }

    /// Both coordinates, when present
    #[must_use]
    pub const fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Coordinates as a validated location
    #[must_use]
    pub fn position(&self) -> Option<GeoLocation> {
        GeoLocation::from_parts(self.latitude, self.longitude)
    }

    /// Whether this entry and a candidate name the same place
    #[must_use]
    pub fn is_duplicate_of(&self, name: &str, coordinates: Option<(f64, f64)>) -> bool {
        match (self.coordinates(), coordinates) {
            (Some((lat_a, lon_a)), Some((lat_b, lon_b))) => GeoLocation::new_unchecked(lat_a, lon_a)
                .approx_eq(&GeoLocation::new_unchecked(lat_b, lon_b)),
            _ => normalize_name(&self.name) == normalize_name(name),
        }
    }
}

/// First entry in `favorites` that duplicates the candidate
#[must_use]
pub fn find_duplicate<'a>(
    favorites: &'a [FavoriteItem],
    name: &str,
    coordinates: Option<(f64, f64)>,
) -> Option<&'a FavoriteItem> {
    favorites
        .iter()
        .find(|f| f.is_duplicate_of(name, coordinates))
}
