//! Dashboard Routes
//!
//! - GET / - The dashboard page
//! - POST /api/v1/update - Recompute all charts for a filter selection
//! - GET /api/v1/summary - Headline totals and dropdown options
//! - GET /api/v1/geojson - The boundary document, unchanged

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Uri},
    response::{Html, IntoResponse},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{SummaryResponse, UpdateRequest, UpdateResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::UpdateInputs;

/// GET /
///
/// The page rendered at startup.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.to_string())
}

/// POST /api/v1/update
///
/// Run the dashboard callback. Filter values that match nothing produce
/// empty charts, not an error.
pub async fn update(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UpdateRequest>, JsonRejection>,
) -> ApiResult<Json<UpdateResponse>> {
    let Json(req) = body.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    let inputs = UpdateInputs::from(req);
    let outputs = state.dashboard.update(&inputs);

    Ok(Json(UpdateResponse::from(&outputs)))
}

/// GET /api/v1/summary
pub async fn summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse::from(state.dashboard.summary()))
}

/// GET /api/v1/geojson
///
/// Served as-is; the choropleth trace references this URL.
pub async fn geojson(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let body = serde_json::to_vec(state.dashboard.boundaries().document())
        .map_err(|e| ApiError::Internal(format!("Failed to serialize boundaries: {}", e)))?;

    Ok(([(header::CONTENT_TYPE, "application/geo+json")], body))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
