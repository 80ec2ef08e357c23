//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod place;
mod units;
mod weather_kind;

pub use geo_location::{COORDINATE_TOLERANCE, GeoLocation};
pub use place::{PlaceDetails, UserLocation};
pub use units::{
    KMH_TO_MPH, MM_PER_INCH, PrecipitationUnit, TemperatureUnit, UnitPreferences, WindUnit,
    convert_precip, convert_temp, convert_wind,
};
pub use weather_kind::{BackgroundKind, WeatherKind};
