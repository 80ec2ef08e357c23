//! Skycast command-line client
//!
//! Argument parsing, command execution against the shared service graph
//! and plain-text rendering of the results.

pub mod cli;
pub mod commands;
pub mod render;

pub use cli::{Cli, Commands, FavoritesAction, UnitsAction};
pub use commands::{check_health, run};
