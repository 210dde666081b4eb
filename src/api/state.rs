//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks. Everything in
//! here is built once at startup and only read afterwards.

use crate::config::ApiConfig;
use crate::dashboard::Dashboard;
use crate::layout::{build_layout, render_page, LayoutOptions};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Dataset, boundaries and the update callback
    pub dashboard: Arc<Dashboard>,
    /// Rendered page, built once from the dataset summary
    pub page: Arc<str>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Build the page and wrap everything for sharing
    pub fn new(dashboard: Dashboard, layout: &LayoutOptions, config: ApiConfig) -> Self {
        let tree = build_layout(dashboard.summary(), layout);
        let page = render_page(&tree, layout);

        tracing::info!(
            records = dashboard.dataset().len(),
            years = dashboard.summary().years.len(),
            states = dashboard.summary().states.len(),
            sub_categories = dashboard.summary().sub_categories.len(),
            "Dashboard layout built"
        );

        Self {
            dashboard: Arc::new(dashboard),
            page: Arc::from(page),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
