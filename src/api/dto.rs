//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::dashboard::{
    ChartKind, ChartResult, DashboardOutputs, FilterSelection, ModalVisibility, Point,
    UpdateInputs,
};
use crate::dataset::DatasetSummary;
use serde::{Deserialize, Serialize};

// ============================================
// UPDATE DTOs
// ============================================

/// Dashboard update request: the three dropdowns and the two click counters
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub open_clicks: Option<u64>,
    #[serde(default)]
    pub close_clicks: Option<u64>,
}

impl From<UpdateRequest> for UpdateInputs {
    fn from(req: UpdateRequest) -> Self {
        let filter = FilterSelection {
            year: req.year,
            state: req.state,
            sub_category: req.sub_category,
        }
        .normalized();

        UpdateInputs::new(filter).clicks(
            req.open_clicks.unwrap_or(0),
            req.close_clicks.unwrap_or(0),
        )
    }
}

/// Dashboard update response
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Eight charts: the grid in page order, then the popup
    pub charts: Vec<ChartResponse>,
    pub modal: ModalResponse,
    /// Records matching the filters
    pub record_count: usize,
}

/// One chart with its data and a ready-to-draw figure
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub points: Vec<Point>,
    pub figure: serde_json::Value,
}

impl From<&ChartResult> for ChartResponse {
    fn from(chart: &ChartResult) -> Self {
        Self {
            id: chart.id.clone(),
            title: chart.title.clone(),
            kind: chart.kind,
            points: chart.points.clone(),
            figure: chart.figure(),
        }
    }
}

/// Popup visibility plus the style the page applies
#[derive(Debug, Serialize)]
pub struct ModalResponse {
    pub visible: bool,
    pub style: ModalStyle,
}

#[derive(Debug, Serialize)]
pub struct ModalStyle {
    pub display: String,
}

impl From<ModalVisibility> for ModalResponse {
    fn from(visibility: ModalVisibility) -> Self {
        Self {
            visible: visibility.is_open(),
            style: ModalStyle {
                display: visibility.display().to_string(),
            },
        }
    }
}

impl From<&DashboardOutputs> for UpdateResponse {
    fn from(outputs: &DashboardOutputs) -> Self {
        Self {
            charts: outputs.charts().into_iter().map(ChartResponse::from).collect(),
            modal: outputs.modal.into(),
            record_count: outputs.record_count,
        }
    }
}

// ============================================
// SUMMARY DTOs
// ============================================

/// Headline totals and dropdown options
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub record_count: usize,
    pub total_sales: f64,
    pub total_profit: f64,
    pub total_customers: usize,
    pub options: FilterOptions,
}

/// Values offered by the three dropdowns
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub years: Vec<i32>,
    pub states: Vec<String>,
    pub sub_categories: Vec<String>,
}

impl From<&DatasetSummary> for SummaryResponse {
    fn from(summary: &DatasetSummary) -> Self {
        Self {
            record_count: summary.record_count,
            total_sales: summary.total_sales,
            total_profit: summary.total_profit,
            total_customers: summary.total_customers,
            options: FilterOptions {
                years: summary.years.clone(),
                states: summary.states.clone(),
                sub_categories: summary.sub_categories.clone(),
            },
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub records: usize,
    pub boundary_features: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
