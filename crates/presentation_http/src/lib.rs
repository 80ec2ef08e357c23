//! Skycast HTTP presentation layer
//!
//! JSON API over the application services plus the two reverse-geocoding
//! proxy endpoints used by browser clients.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{ValidatedJson, ValidationError};
pub use routes::{cors_layer, create_router};
pub use state::AppState;
