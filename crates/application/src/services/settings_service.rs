//! Unit preference service
//!
//! Loads the selected display units once and writes each change back to the
//! key-value store immediately.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use domain::value_objects::{PrecipitationUnit, TemperatureUnit, UnitPreferences, WindUnit};
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::KeyValueStorePort;

/// Storage key for the temperature unit
pub const TEMP_UNIT_KEY: &str = "wa_temp_unit";
/// Storage key for the wind unit
pub const WIND_UNIT_KEY: &str = "wa_wind_unit";
/// Storage key for the precipitation unit
pub const PRECIP_UNIT_KEY: &str = "wa_precip_unit";

/// Partial change to the unit preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct UnitPreferencesUpdate {
    #[serde(default)]
    pub temperature: Option<TemperatureUnit>,
    #[serde(default)]
    pub wind: Option<WindUnit>,
    #[serde(default)]
    pub precipitation: Option<PrecipitationUnit>,
}

/// Service owning the unit preferences
pub struct SettingsService {
    store: Arc<dyn KeyValueStorePort>,
    preferences: RwLock<UnitPreferences>,
}

impl fmt::Debug for SettingsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsService")
            .field("preferences", &*self.preferences.read())
            .finish_non_exhaustive()
    }
}

impl SettingsService {
    /// Create a service with default preferences
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self {
            store,
            preferences: RwLock::new(UnitPreferences::default()),
        }
    }

    /// Read persisted preferences, falling back to defaults per unit
    #[instrument(skip(self))]
    pub async fn load(&self) -> UnitPreferences {
        let loaded = UnitPreferences {
            temperature: self.read_unit(TEMP_UNIT_KEY).await,
            wind: self.read_unit(WIND_UNIT_KEY).await,
            precipitation: self.read_unit(PRECIP_UNIT_KEY).await,
        };
        *self.preferences.write() = loaded;
        debug!(?loaded, "Loaded unit preferences");
        loaded
    }

    /// Current preferences
    #[must_use]
    pub fn preferences(&self) -> UnitPreferences {
        *self.preferences.read()
    }

    /// Apply a partial change and persist the touched units
    ///
    /// Either every touched unit is stored or none is: when a write fails,
    /// keys already written are restored to their previous codes and the
    /// in-memory preferences stay unchanged.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        update: UnitPreferencesUpdate,
    ) -> Result<UnitPreferences, ApplicationError> {
        let previous = self.preferences();
        let mut next = previous;
        // (key, new code, previous code)
        let mut writes: Vec<(&'static str, &'static str, &'static str)> = Vec::new();
        if let Some(unit) = update.temperature {
            next.temperature = unit;
            writes.push((TEMP_UNIT_KEY, unit.code(), previous.temperature.code()));
        }
        if let Some(unit) = update.wind {
            next.wind = unit;
            writes.push((WIND_UNIT_KEY, unit.code(), previous.wind.code()));
        }
        if let Some(unit) = update.precipitation {
            next.precipitation = unit;
            writes.push((PRECIP_UNIT_KEY, unit.code(), previous.precipitation.code()));
        }

        for (done, (key, code, _)) in writes.iter().enumerate() {
            if let Err(e) = self.store.set(key, code).await {
                warn!(key, error = %e, "Failed to persist unit preference, rolling back");
                for (key, _, old) in &writes[..done] {
                    if let Err(e) = self.store.set(key, old).await {
                        warn!(key, error = %e, "Failed to restore unit preference");
                    }
                }
                return Err(e);
            }
        }

        *self.preferences.write() = next;
        Ok(next)
    }

    async fn read_unit<U>(&self, key: &str) -> U
    where
        U: FromStr + Default,
    {
        match self.store.get(key).await {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                warn!(key, value = %raw, "Ignoring unknown unit");
                U::default()
            }),
            Ok(None) => U::default(),
            Err(e) => {
                warn!(key, error = %e, "Failed to read unit preference");
                U::default()
            },
        }
    }
}
