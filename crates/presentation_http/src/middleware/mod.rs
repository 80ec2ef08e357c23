//! HTTP middleware components
//!
//! Request extractors shared by the handlers.

pub mod validation;

pub use validation::{ValidatedJson, ValidationError};
