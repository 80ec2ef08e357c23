//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use domain::entities::DAILY_DISPLAY_LIMIT;
use domain::value_objects::{PrecipitationUnit, TemperatureUnit, WindUnit};

/// Skycast CLI
#[derive(Debug, Parser)]
#[command(name = "skycast-cli")]
#[command(author, version, about = "Weather forecasts from the command line", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file, without extension
    #[arg(short, long, default_value = "config", env = "SKYCAST_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the forecast for a coordinate, a place or the current location
    Weather {
        /// Latitude in degrees
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in degrees
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Place name, resolved through place search
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        place: Option<String>,

        /// Number of forecast days to print
        #[arg(long, default_value_t = DAILY_DISPLAY_LIMIT)]
        days: usize,
    },

    /// Suggest places matching a query
    Search {
        /// Free-text place name
        query: String,
    },

    /// Resolve the current location
    Locate,

    /// Manage saved places
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Show or change display units
    Units {
        #[command(subcommand)]
        action: UnitsAction,
    },

    /// Check a running server (used by container healthchecks)
    Health {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// List saved places
    List,

    /// Save a place
    Add {
        /// Display name
        name: String,

        /// Latitude; looked up by name when omitted
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Remove a saved place by id
    Remove {
        /// Favorite id as shown by `favorites list`
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum UnitsAction {
    /// Print the current units
    Show,

    /// Change one or more units
    Set {
        /// `C` or `F`
        #[arg(long)]
        temperature: Option<TemperatureUnit>,

        /// `kmh` or `mph`
        #[arg(long)]
        wind: Option<WindUnit>,

        /// `mm` or `in`
        #[arg(long)]
        precipitation: Option<PrecipitationUnit>,
    },
}

/// Determine log filter level from verbosity count
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
