//! Domain layer for Skycast
//!
//! Contains the weather model, unit conversions, the weather-code classifier,
//! location values and the favorites de-duplication rule.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod formatting;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
