//! Favorites service
//!
//! Keeps the de-duplicated list of saved places in memory and writes the
//! whole list back to the key-value store after every change.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::entities::{FavoriteItem, NewFavorite, find_duplicate};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::toast::{ToastNotifier, ToastState};
use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, KeyValueStorePort};

/// Storage key holding the serialized favorites array
pub const FAVORITES_KEY: &str = "wa_favorites";

/// Result of adding a favorite
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "favorite", rename_all = "snake_case")]
pub enum AddFavoriteOutcome {
    /// The place was appended
    Added(FavoriteItem),
    /// An equivalent entry already exists
    AlreadyExists(FavoriteItem),
}

impl AddFavoriteOutcome {
    /// The stored entry
    #[must_use]
    pub const fn favorite(&self) -> &FavoriteItem {
        match self {
            Self::Added(f) | Self::AlreadyExists(f) => f,
        }
    }

    /// Whether a new entry was stored
    #[must_use]
    pub const fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// Service owning the favorites list
pub struct FavoritesService {
    store: Arc<dyn KeyValueStorePort>,
    geocoding: Arc<dyn GeocodingPort>,
    favorites: RwLock<Vec<FavoriteItem>>,
    toast: ToastNotifier,
}

impl fmt::Debug for FavoritesService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesService")
            .field("toast", &self.toast)
            .finish_non_exhaustive()
    }
}

impl FavoritesService {
    /// Create an empty favorites service
    pub fn new(store: Arc<dyn KeyValueStorePort>, geocoding: Arc<dyn GeocodingPort>) -> Self {
        Self::with_toast_duration(store, geocoding, super::toast::DEFAULT_TOAST_DURATION)
    }

    /// Create a service whose toasts stay visible for `duration`
    pub fn with_toast_duration(
        store: Arc<dyn KeyValueStorePort>,
        geocoding: Arc<dyn GeocodingPort>,
        duration: Duration,
    ) -> Self {
        Self {
            store,
            geocoding,
            favorites: RwLock::new(Vec::new()),
            toast: ToastNotifier::new(duration),
        }
    }

    /// Rehydrate the list from storage
    ///
    /// Missing or unreadable data leaves the list empty. Returns the number
    /// of entries loaded.
    #[instrument(skip(self))]
    pub async fn load(&self) -> usize {
        let loaded = match self.store.get(FAVORITES_KEY).await {
            Ok(Some(raw)) => serde_json::from_str::<Vec<FavoriteItem>>(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring unreadable favorites");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read favorites");
                Vec::new()
            },
        };
        let count = loaded.len();
        *self.favorites.write().await = loaded;
        debug!(count, "Loaded favorites");
        count
    }

    /// All favorites in insertion order
    pub async fn list(&self) -> Vec<FavoriteItem> {
        self.favorites.read().await.clone()
    }

    /// Number of favorites
    pub async fn count(&self) -> usize {
        self.favorites.read().await.len()
    }

    /// Current toast state
    #[must_use]
    pub fn toast(&self) -> ToastState {
        self.toast.current()
    }

    /// Add a place unless an equivalent one is already saved
    ///
    /// Missing coordinates are resolved through a best-effort search. The
    /// duplicate check runs again under the write lock, so two concurrent
    /// adds of the same place store one entry.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn add_favorite(
        &self,
        request: NewFavorite,
    ) -> Result<AddFavoriteOutcome, ApplicationError> {
        let name = request
            .validated_name()
            .map_err(|e| ApplicationError::InvalidInput(e.to_string()))?
            .to_string();

        if let Some(existing) =
            find_duplicate(&self.favorites.read().await, &name, request.coordinates())
        {
            self.toast.show(format!("{name} is already in favorites"));
            return Ok(AddFavoriteOutcome::AlreadyExists(existing.clone()));
        }

        let coordinates = match request.coordinates() {
            Some(coords) => Some(coords),
            None => self.resolve_coordinates(&name).await,
        };
        let candidate = FavoriteItem::new(
            &name,
            coordinates.map(|(lat, _)| lat),
            coordinates.map(|(_, lon)| lon),
        );

        let mut favorites = self.favorites.write().await;
        if let Some(existing) = find_duplicate(&favorites, &name, coordinates) {
            debug!(id = %existing.id, "Concurrent add already stored this place");
            self.toast.show(format!("{name} is already in favorites"));
            return Ok(AddFavoriteOutcome::AlreadyExists(existing.clone()));
        }
        favorites.push(candidate.clone());
        self.persist(&favorites).await;
        drop(favorites);

        info!(id = %candidate.id, "Added favorite");
        self.toast.show(format!("Added {name} to favorites"));
        Ok(AddFavoriteOutcome::Added(candidate))
    }

    /// Remove a favorite by id
    ///
    /// Unknown ids are a no-op and show no toast.
    #[instrument(skip(self))]
    pub async fn remove_favorite(&self, id: &str) -> Option<FavoriteItem> {
        let mut favorites = self.favorites.write().await;
        let index = favorites.iter().position(|f| f.id == id)?;
        let removed = favorites.remove(index);
        self.persist(&favorites).await;
        drop(favorites);

        info!(id = %removed.id, "Removed favorite");
        self.toast
            .show(format!("Removed {} from favorites", removed.name));
        Some(removed)
    }

    async fn resolve_coordinates(&self, name: &str) -> Option<(f64, f64)> {
        match self.geocoding.search_places(name, 1).await {
            Ok(results) => results.first().map(|s| (s.latitude, s.longitude)),
            Err(e) => {
                warn!(error = %e, name, "Could not resolve favorite coordinates");
                None
            },
        }
    }

    async fn persist(&self, favorites: &[FavoriteItem]) {
        let serialized = match serde_json::to_string(favorites) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "Failed to serialize favorites");
                return;
            },
        };
        if let Err(e) = self.store.set(FAVORITES_KEY, &serialized).await {
            warn!(error = %e, "Failed to persist favorites");
        }
    }
}
