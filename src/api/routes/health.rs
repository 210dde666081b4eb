//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// The dataset and boundaries are loaded before the listener is bound, so a
/// running server is always ready.
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Full health status with dataset details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dashboard = &state.dashboard;

    // an empty dataset serves nothing but empty charts
    let status = if dashboard.dataset().is_empty() {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        records: dashboard.dataset().len(),
        boundary_features: dashboard.boundaries().feature_count(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::dashboard::Dashboard;
    use crate::dataset::SalesDataset;
    use crate::geo::BoundaryDocument;
    use crate::layout::LayoutOptions;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness() {
        assert_eq!(readiness().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_dataset_is_degraded() {
        let dashboard = Dashboard::new(SalesDataset::default(), BoundaryDocument::empty());
        let state = AppState::new(dashboard, &LayoutOptions::default(), ApiConfig::default());

        let Json(health) = full_health(State(Arc::new(state))).await;
        assert_eq!(health.status, "degraded");
        assert_eq!(health.records, 0);
    }
}
