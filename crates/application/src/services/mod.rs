//! Application services - Use case implementations

mod dashboard_service;
mod favorites_service;
mod location_service;
mod search_service;
mod settings_service;
mod toast;

pub use dashboard_service::{DashboardService, DashboardSnapshot, DashboardView};
pub use favorites_service::{AddFavoriteOutcome, FAVORITES_KEY, FavoritesService};
pub use location_service::LocationResolver;
pub use search_service::{SearchConfig, SearchSnapshot, SearchState, SuggestionSearch};
pub use settings_service::{
    PRECIP_UNIT_KEY, SettingsService, TEMP_UNIT_KEY, UnitPreferencesUpdate, WIND_UNIT_KEY,
};
pub use toast::{DEFAULT_TOAST_DURATION, ToastNotifier, ToastState};
