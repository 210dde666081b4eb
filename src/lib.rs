//! # Salesboard
//!
//! Interactive sales dashboard over a static order dataset, served with Axum.
//!
//! ## Features
//!
//! - **Loader**: JSON-lines or CSV order records, parsed once at startup
//! - **Filtering**: year, state and sub-category dropdowns, combined with AND
//! - **Charts**: seven aggregations plus a popup copy, shipped as Plotly figures
//! - **Choropleth**: state boundaries from a GeoJSON document
//!
//! ## Modules
//!
//! - [`dataset`]: Record types, loading and the startup summary
//! - [`geo`]: State boundary document
//! - [`dashboard`]: Filter, aggregate and chart the records for one update
//! - [`layout`]: Static page structure and HTML rendering
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use salesboard::dashboard::{Dashboard, FilterSelection, UpdateInputs};
//! use salesboard::dataset::load_dataset;
//! use salesboard::geo::BoundaryDocument;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = load_dataset(Path::new("assets/Amazon dataset.json"))?;
//!     let boundaries = BoundaryDocument::load(
//!         Path::new("assets/india_states.geojson"),
//!         "properties.NAME_1",
//!     )?;
//!
//!     let dashboard = Dashboard::new(dataset, boundaries);
//!     let outputs = dashboard.update(&UpdateInputs::new(FilterSelection::new().year(2019)));
//!
//!     println!("{} records in 2019", outputs.record_count);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod geo;
pub mod layout;

// Re-export top-level types for convenience
pub use dataset::{
    load_dataset, DatasetSummary, LoadError, LoadResult, SalesDataset, SalesRecord,
};

pub use geo::BoundaryDocument;

pub use dashboard::{
    ChartKind, ChartResult, Dashboard, DashboardOutputs, FilterSelection, ModalVisibility,
    UpdateInputs,
};

pub use layout::{build_layout, render_page, LayoutOptions};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError};
