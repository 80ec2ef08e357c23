//! Domain entities - Objects with identity and lifecycle

mod favorite;
mod suggestion;
mod weather;

pub use favorite::{FavoriteItem, NewFavorite, find_duplicate, normalize_name};
pub use suggestion::PlaceSuggestion;
pub use weather::{
    CurrentConditions, DAILY_DISPLAY_LIMIT, DailyForecastItem, HOURLY_LIMIT, HourlyForecastItem,
    WeatherPayload, WeatherProperties, parse_local_time,
};
