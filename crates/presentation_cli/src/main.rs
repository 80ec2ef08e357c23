//! Skycast CLI
//!
//! Command-line interface for forecasts, place search, favorites and units.

#![allow(clippy::print_stdout)]

use std::io;

use clap::Parser;
use infrastructure::{AppConfig, LogFormat, ServiceContainer, init_logging};
use presentation_cli::cli::log_filter_from_verbosity;
use presentation_cli::{Cli, Commands, check_health, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(log_filter_from_verbosity(cli.verbose), LogFormat::Text)?;

    // Health does not need the service graph
    if let Commands::Health { url } = &cli.command {
        match check_health(url).await {
            Ok(true) => {
                println!("Healthy");
                std::process::exit(0);
            },
            Ok(false) => {
                println!("Unhealthy");
                std::process::exit(1);
            },
            Err(e) => {
                println!("Unhealthy: {e:#}");
                std::process::exit(1);
            },
        }
    }

    let config = AppConfig::load_from(&cli.config, None)?;
    let container = ServiceContainer::build(config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize services: {e}"))?;
    container.load_state().await;

    run(cli.command, &container, &mut io::stdout().lock()).await
}
