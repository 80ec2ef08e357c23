//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber with text or JSON output.

mod logging;

pub use logging::{LogFormat, TelemetryError, build_filter, init_logging};
