//! Command execution
//!
//! Commands run against a [`ServiceContainer`] and write their output to
//! any [`Write`] sink.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, bail};
use application::{DashboardView, SuggestionSearch, UnitPreferencesUpdate};
use domain::entities::NewFavorite;
use domain::value_objects::{GeoLocation, PlaceDetails, UserLocation};
use infrastructure::ServiceContainer;
use tracing::{debug, instrument};

use crate::cli::{Commands, FavoritesAction, UnitsAction};
use crate::render;

/// Run a command that needs the service graph
///
/// # Errors
///
/// Returns an error when the command cannot produce its output, for
/// example when no location resolves or a lookup fails.
pub async fn run(
    command: Commands,
    container: &ServiceContainer,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Commands::Weather {
            lat,
            lon,
            place,
            days,
        } => weather(container, lat.zip(lon), place, days, out).await,
        Commands::Search { query } => search(container, &query, out).await,
        Commands::Locate => {
            let location = container
                .resolver
                .resolve()
                .await
                .context("Location unavailable")?;
            writeln!(out, "{}", render::location(&location))?;
            Ok(())
        },
        Commands::Favorites { action } => favorites(container, action, out).await,
        Commands::Units { action } => units(container, action, out).await,
        Commands::Health { url } => {
            let healthy = check_health(&url).await?;
            writeln!(out, "Healthy: {healthy}")?;
            Ok(())
        },
    }
}

#[instrument(skip(container, out))]
async fn weather(
    container: &ServiceContainer,
    coordinates: Option<(f64, f64)>,
    place: Option<String>,
    days: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let view = match (coordinates, place) {
        (Some((lat, lon)), _) => {
            let position = GeoLocation::new(lat, lon)?;
            container
                .dashboard
                .load_location(UserLocation::new(position, PlaceDetails::default()))
                .await
        },
        (None, Some(place)) => container.dashboard.load_place(&place).await?,
        (None, None) => container.dashboard.load().await,
    };

    match view {
        DashboardView::Ready { location, weather } => {
            let units = container.settings.preferences();
            writeln!(out, "{}", render::weather(&location, &weather, units, days))?;
            Ok(())
        },
        DashboardView::NoLocation => {
            bail!("Could not determine your location; pass --lat/--lon or --place")
        },
        DashboardView::Error { message, .. } => bail!(message),
    }
}

async fn search(
    container: &ServiceContainer,
    query: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let search = SuggestionSearch::new(Arc::clone(&container.geocoding), container.config.search);
    let request_id = search.set_query(query);
    let snapshot = search.settled().await;
    search.shutdown();
    debug!(request_id, state = ?snapshot.state, "Search settled");

    if snapshot.is_empty_result() {
        writeln!(out, "No results found")?;
    } else if !snapshot.suggestions.is_empty() {
        writeln!(out, "{}", render::suggestions(&snapshot.suggestions))?;
    }
    Ok(())
}

async fn favorites(
    container: &ServiceContainer,
    action: FavoritesAction,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let service = &container.favorites;
    match action {
        FavoritesAction::List => {
            writeln!(out, "{}", render::favorites(&service.list().await))?;
        },
        FavoritesAction::Add { name, lat, lon } => {
            service
                .add_favorite(NewFavorite {
                    name,
                    latitude: lat,
                    longitude: lon,
                })
                .await?;
            if let Some(message) = service.toast().message {
                writeln!(out, "{message}")?;
            }
        },
        FavoritesAction::Remove { id } => {
            if service.remove_favorite(&id).await.is_none() {
                bail!("No favorite with id {id}");
            }
            if let Some(message) = service.toast().message {
                writeln!(out, "{message}")?;
            }
        },
    }
    Ok(())
}

async fn units(
    container: &ServiceContainer,
    action: UnitsAction,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let preferences = match action {
        UnitsAction::Show => container.settings.preferences(),
        UnitsAction::Set {
            temperature,
            wind,
            precipitation,
        } => {
            container
                .settings
                .update(UnitPreferencesUpdate {
                    temperature,
                    wind,
                    precipitation,
                })
                .await?
        },
    };
    writeln!(out, "{}", render::units(preferences))?;
    Ok(())
}

/// Query a server's `/health` endpoint
///
/// # Errors
///
/// Returns an error if the server cannot be reached.
pub async fn check_health(base_url: &str) -> anyhow::Result<bool> {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Failed to reach {url}"))?;
    Ok(response.status().is_success())
}
