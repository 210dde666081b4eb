//! Salesboard Dashboard Server
//!
//! Run with: cargo run --bin salesboard
//!
//! # Configuration
//!
//! Read from the first config.toml found in the user config directory,
//! `/etc/salesboard` or the working directory. Environment variables:
//! - `SALESBOARD_DATASET`: Sales records (default: assets/Amazon dataset.json)
//! - `SALESBOARD_BOUNDARIES`: State boundaries (default: assets/india_states.geojson)
//! - `SALESBOARD_FEATURE_KEY`: Boundary property matched against state names
//! - `SALESBOARD_API_HOST`: Host to bind to (default: 127.0.0.1)
//! - `SALESBOARD_API_PORT`: Port to listen on (default: 8050)
//! - `SALESBOARD_LOG_FORMAT`: pretty or json
//! - `RUST_LOG`: Log filter (default: salesboard=info,tower_http=debug)

use anyhow::Context;
use salesboard::api::{serve, AppState};
use salesboard::config::{Config, LoggingConfig};
use salesboard::dashboard::Dashboard;
use salesboard::dataset::load_dataset;
use salesboard::geo::BoundaryDocument;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();

    init_tracing(&config.logging);

    tracing::info!("Starting Salesboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Dataset: {:?}", config.data.dataset_path);
    tracing::info!("Boundaries: {:?}", config.data.boundaries_path);

    // Both inputs are required; a missing or malformed file stops startup
    let dataset = load_dataset(&config.data.dataset_path)
        .with_context(|| format!("loading dataset {:?}", config.data.dataset_path))?;

    let boundaries =
        BoundaryDocument::load(&config.data.boundaries_path, &config.data.feature_id_key)
            .with_context(|| format!("loading boundaries {:?}", config.data.boundaries_path))?;

    let dashboard = Dashboard::new(dataset, boundaries);

    let summary = dashboard.summary();
    let unmatched = dashboard
        .boundaries()
        .unmatched(summary.states.iter().map(String::as_str));
    if !unmatched.is_empty() {
        tracing::warn!(
            count = unmatched.len(),
            states = ?unmatched,
            "Dataset states missing from the boundary document"
        );
    }

    let state = AppState::new(dashboard, &config.page.layout_options(), config.api.clone());

    serve(state, &config.api).await?;

    tracing::info!("Salesboard stopped");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
