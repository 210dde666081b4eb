//! Salesboard HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - The dashboard page
//!
//! ## Dashboard
//! - `POST /api/v1/update` - Recompute all charts for a filter selection
//! - `GET /api/v1/summary` - Totals and dropdown options
//! - `GET /api/v1/geojson` - State boundary document
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use salesboard::api::{serve, AppState};
//! use salesboard::config::ApiConfig;
//! use salesboard::dashboard::Dashboard;
//! use salesboard::dataset::load_dataset;
//! use salesboard::geo::BoundaryDocument;
//! use salesboard::layout::LayoutOptions;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let dataset = load_dataset("assets/Amazon dataset.json".as_ref())?;
//!     let boundaries = BoundaryDocument::load("assets/india_states.geojson".as_ref(), "properties.NAME_1")?;
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(Dashboard::new(dataset, boundaries), &LayoutOptions::default(), config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/update", post(routes::dashboard::update))
        .route("/summary", get(routes::dashboard::summary))
        .route("/geojson", get(routes::dashboard::geojson));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .fallback(routes::dashboard::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS from the configured origins; any origin when none are listed
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::dataset::{SalesDataset, SalesRecord};
    use crate::geo::BoundaryDocument;
    use crate::layout::LayoutOptions;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let d = |y, m| NaiveDate::from_ymd_opt(y, m, 1).unwrap();
        let dataset = SalesDataset::new(vec![
            SalesRecord::new(d(2019, 3), 100.0, 20.0)
                .category("Tech")
                .sub_category("Phones")
                .product("Phone")
                .region("South")
                .state("X")
                .customer("C1"),
            SalesRecord::new(d(2020, 3), 50.0, -5.0)
                .category("Tech")
                .sub_category("Phones")
                .product("Cable")
                .region("North")
                .state("Y")
                .customer("C2"),
        ]);
        let boundaries = BoundaryDocument::from_value(
            json!({
                "type": "FeatureCollection",
                "features": [{ "type": "Feature", "properties": { "NAME_1": "X" }, "geometry": null }]
            }),
            "properties.NAME_1",
        )
        .unwrap();

        let state = AppState::new(
            Dashboard::new(dataset, boundaries),
            &LayoutOptions::default(),
            ApiConfig::default(),
        );
        build_router(state)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_update(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/update")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["records"], 2);
        assert_eq!(json["boundary_features"], 1);
    }

    #[tokio::test]
    async fn test_index_page() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Total Sales: $150.00"));
        assert!(html.contains("Total Customers: 2"));
        assert!(html.contains("id=\"profit_by_state\""));
    }

    #[tokio::test]
    async fn test_update_with_year_filter() {
        let app = create_test_app();

        let response = app
            .oneshot(post_update(r#"{"year": 2019, "open_clicks": 1, "close_clicks": 0}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        assert_eq!(json["record_count"], 1);
        assert_eq!(json["modal"]["style"]["display"], "block");

        let charts = json["charts"].as_array().unwrap();
        assert_eq!(charts.len(), 8);
        assert_eq!(charts[0]["id"], "profit_by_category");
        assert_eq!(charts[0]["points"], json!([{ "label": "Tech", "value": 20.0 }]));
        assert_eq!(charts[3]["points"], json!([{ "label": 2019, "value": 100.0 }]));
        assert_eq!(charts[6]["points"], json!([{ "label": "X", "value": 20.0 }]));
        assert_eq!(charts[6]["figure"]["data"][0]["geojson"], "/api/v1/geojson");
        assert_eq!(charts[7]["id"], "profit_by_category_modal");
    }

    #[tokio::test]
    async fn test_update_unknown_state_returns_empty_charts() {
        let app = create_test_app();

        let response = app
            .oneshot(post_update(r#"{"state": "Atlantis", "close_clicks": 1}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        assert_eq!(json["record_count"], 0);
        assert_eq!(json["modal"]["visible"], false);
        for chart in json["charts"].as_array().unwrap() {
            assert_eq!(chart["points"], json!([]));
        }
    }

    #[tokio::test]
    async fn test_update_invalid_json() {
        let app = create_test_app();

        let response = app.oneshot(post_update("not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_summary() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["total_sales"], 150.0);
        assert_eq!(json["total_profit"], 15.0);
        assert_eq!(json["options"]["years"], json!([2019, 2020]));
        assert_eq!(json["options"]["states"], json!(["X", "Y"]));
    }

    #[tokio::test]
    async fn test_geojson_passthrough() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/geojson")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["properties"]["NAME_1"], "X");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/nothing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
