use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use nearby::config::Config;
use nearby::location::{AuthorizationStatus, SimulatedLocationProvider};
use nearby::logging::init_tracing;
use nearby::map::{AppState, Category, Coordinate, MapIntent, MapReducer};
use nearby::search::CatalogSearchProvider;
use nearby::store::{Store, StoreHandle};

/// How long the demo waits for each asynchronous step.
const STEP_TIMEOUT: Duration = Duration::from_secs(10);

/// Locate the device, then list nearby places of one category.
#[derive(Debug, Parser)]
#[command(name = "nearby", version)]
struct Cli {
    /// Config file (default: <config dir>/nearby/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Category to search for (cafe, museum, nightlife, park, restaurant).
    #[arg(long)]
    category: Option<Category>,

    /// Simulated location permission (not_determined, restricted, denied, always, when_in_use).
    #[arg(long)]
    auth: Option<AuthorizationStatus>,

    /// Simulated device latitude.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Simulated device longitude.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    init_tracing(&config.logging.level);

    if let Some(status) = cli.auth {
        config.demo.authorization = status;
    }
    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        config.demo.latitude = lat;
        config.demo.longitude = lon;
    }
    config.validate()?;
    let category = cli.category.unwrap_or(config.demo.category);

    let location = Arc::new(SimulatedLocationProvider::new(
        config.demo.authorization,
        Some(config.demo.position()),
    ));
    let search = Arc::new(CatalogSearchProvider::from_config(&config));
    let reducer = MapReducer::new(location.clone()).with_fix_span(config.fix_span());
    let store = Store::new(reducer, location, search).start(AppState::default());

    let outcome = tokio::select! {
        outcome = run_session(&store, category) => outcome,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
            Ok(None)
        }
    };

    if store.send(MapIntent::ViewBecameInactive).is_err() {
        tracing::debug!("Store already closed");
    }
    store.shutdown().await;

    if let Some(state) = outcome? {
        print_results(&state, category, cli.json)?;
    }
    Ok(())
}

/// Drive one view session. Returns `None` if the session ended with an alert.
async fn run_session(store: &StoreHandle, category: Category) -> Result<Option<AppState>> {
    store.send(MapIntent::ViewBecameActive)?;
    store.send(MapIntent::CurrentLocationRequested)?;

    let state = step(store.wait_for(|s| s.region.is_some() || s.alert.is_some())).await?;
    if let Some(alert) = state.alert {
        eprintln!("{}", alert.text);
        return Ok(None);
    }
    let Some(region) = state.region else {
        bail!("location fix produced no region");
    };
    tracing::info!(
        latitude = region.center.latitude,
        longitude = region.center.longitude,
        "Map centered on current location"
    );

    // A fix only moves the viewport; the map reports it back like a drag.
    store.send(MapIntent::RegionChanged(region))?;
    store.send(MapIntent::CategorySelected(category))?;

    let state = step(store.wait_for(|s| {
        (s.category == Some(category) && !s.is_searching()) || s.alert.is_some()
    }))
    .await?;
    if let Some(alert) = &state.alert {
        eprintln!("{}", alert.text);
        return Ok(None);
    }
    Ok(Some(state))
}

async fn step<F, T>(future: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T, nearby::store::StoreError>>,
{
    let value = tokio::time::timeout(STEP_TIMEOUT, future)
        .await
        .context("timed out waiting for the map")??;
    Ok(value)
}

fn print_results(state: &AppState, category: Category, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&state.points_of_interest)?);
        return Ok(());
    }

    let center = state
        .region
        .map(|r| r.center)
        .unwrap_or_else(|| Coordinate::new(0.0, 0.0));
    println!(
        "{} {} near ({:.4}, {:.4}):",
        state.points_of_interest.len(),
        category,
        center.latitude,
        center.longitude
    );
    for poi in &state.points_of_interest {
        println!(
            "  {:<24} {:<24} ({:.4}, {:.4})",
            poi.title.as_deref().unwrap_or("(unnamed)"),
            poi.subtitle.as_deref().unwrap_or(""),
            poi.coordinate.latitude,
            poi.coordinate.longitude
        );
    }
    Ok(())
}
