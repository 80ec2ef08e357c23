//! Application layer - Use cases and orchestration
//!
//! Contains the favorites store, unit preferences, location resolution,
//! debounced place search and dashboard orchestration, plus the ports that
//! infrastructure adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
