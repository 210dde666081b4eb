//! Dashboard callback
//!
//! The single reactive computation behind the page. Given the dropdown
//! selection and the two click counters it:
//!
//! 1. derives popup visibility from the counters
//! 2. filters the full dataset (year AND state AND sub-category)
//! 3. runs seven independent aggregations
//! 4. repeats the category chart for the popup
//!
//! ```text
//! UpdateInputs → Filter → Aggregate ×7 → ChartResult ×8 + ModalVisibility
//! ```
//!
//! Nothing is cached: every call recomputes from the full record set. The
//! dataset and boundary document are never mutated, so a `Dashboard` can be
//! shared across threads behind an `Arc` without locking.

pub mod aggregate;
pub mod chart;
pub mod filter;
pub mod modal;

pub use chart::{ChartKind, ChartResult, ColorMode, GeoBinding, Label, Point};
pub use filter::FilterSelection;
pub use modal::ModalVisibility;

use crate::dataset::{DatasetSummary, SalesDataset};
use crate::geo::BoundaryDocument;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Where the page fetches the boundary document from
pub const GEOJSON_PATH: &str = "/api/v1/geojson";

/// Entries kept in the top products chart
pub const TOP_PRODUCTS_LIMIT: usize = 10;

/// DOM ids of the chart placeholders, in page order
pub mod ids {
    pub const PROFIT_BY_CATEGORY: &str = "profit_by_category";
    pub const TOP_PROFITED_PRODUCTS: &str = "top_profited_products";
    pub const SALES_BY_REGION: &str = "sales_by_region";
    pub const YEARLY_SALES_TRENDS: &str = "yearly_sales_trends";
    pub const PROFIT_BY_MONTH: &str = "profit_by_month";
    pub const QUANTITY_BY_CATEGORY: &str = "quantity_by_category";
    pub const PROFIT_BY_STATE: &str = "profit_by_state";
    pub const PROFIT_BY_CATEGORY_MODAL: &str = "profit_by_category_modal";

    /// The seven charts on the main grid
    pub const GRID: [&str; 7] = [
        PROFIT_BY_CATEGORY,
        TOP_PROFITED_PRODUCTS,
        SALES_BY_REGION,
        YEARLY_SALES_TRENDS,
        PROFIT_BY_MONTH,
        QUANTITY_BY_CATEGORY,
        PROFIT_BY_STATE,
    ];
}

/// Inputs of one update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInputs {
    pub filter: FilterSelection,
    pub open_clicks: u64,
    pub close_clicks: u64,
}

impl UpdateInputs {
    pub fn new(filter: FilterSelection) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    /// Builder method: set the click counters
    pub fn clicks(mut self, open_clicks: u64, close_clicks: u64) -> Self {
        self.open_clicks = open_clicks;
        self.close_clicks = close_clicks;
        self
    }
}

/// Everything the page redraws after an update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOutputs {
    pub profit_by_category: ChartResult,
    pub top_profited_products: ChartResult,
    pub sales_by_region: ChartResult,
    pub yearly_sales_trends: ChartResult,
    pub profit_by_month: ChartResult,
    pub quantity_by_category: ChartResult,
    pub profit_by_state: ChartResult,
    pub profit_by_category_modal: ChartResult,
    pub modal: ModalVisibility,
    /// Records left after filtering
    pub record_count: usize,
}

impl DashboardOutputs {
    /// All eight charts, grid first, popup last
    pub fn charts(&self) -> [&ChartResult; 8] {
        [
            &self.profit_by_category,
            &self.top_profited_products,
            &self.sales_by_region,
            &self.yearly_sales_trends,
            &self.profit_by_month,
            &self.quantity_by_category,
            &self.profit_by_state,
            &self.profit_by_category_modal,
        ]
    }
}

/// Immutable dashboard context: dataset, boundaries, startup summary
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: SalesDataset,
    boundaries: BoundaryDocument,
    summary: DatasetSummary,
    geojson_url: String,
}

impl Dashboard {
    pub fn new(dataset: SalesDataset, boundaries: BoundaryDocument) -> Self {
        let summary = DatasetSummary::from_dataset(&dataset);
        Self {
            dataset,
            boundaries,
            summary,
            geojson_url: GEOJSON_PATH.to_string(),
        }
    }

    /// Builder method: serve the boundary document from another URL
    pub fn with_geojson_url(mut self, url: impl Into<String>) -> Self {
        self.geojson_url = url.into();
        self
    }

    pub fn dataset(&self) -> &SalesDataset {
        &self.dataset
    }

    pub fn boundaries(&self) -> &BoundaryDocument {
        &self.boundaries
    }

    pub fn summary(&self) -> &DatasetSummary {
        &self.summary
    }

    /// Recompute every chart for the given inputs
    pub fn update(&self, inputs: &UpdateInputs) -> DashboardOutputs {
        let start = Instant::now();

        let modal = ModalVisibility::from_clicks(inputs.open_clicks, inputs.close_clicks);
        let filtered = inputs.filter.apply(self.dataset.records());

        let by_category = aggregate::profit_by_category(&filtered);

        let profit_by_category = ChartResult::new(
            ids::PROFIT_BY_CATEGORY,
            ChartKind::Bar,
            "Profit by Category",
            "Category",
            "Profit",
        )
        .color(ColorMode::Discrete)
        .points(by_category.iter().copied());

        let profit_by_category_modal = ChartResult::new(
            ids::PROFIT_BY_CATEGORY_MODAL,
            ChartKind::Bar,
            "Profit by Category (Popup)",
            "Category",
            "Profit",
        )
        .color(ColorMode::Discrete)
        .points(by_category);

        let top_profited_products = ChartResult::new(
            ids::TOP_PROFITED_PRODUCTS,
            ChartKind::Bar,
            "Top Profited Products",
            "Product Name",
            "Profit",
        )
        .color(ColorMode::Continuous)
        .points(aggregate::top_profited_products(&filtered, TOP_PRODUCTS_LIMIT));

        let sales_by_region = ChartResult::new(
            ids::SALES_BY_REGION,
            ChartKind::Pie,
            "Sales by Region",
            "Region",
            "Sales",
        )
        .points(aggregate::sales_by_region(&filtered));

        let yearly_sales_trends = ChartResult::new(
            ids::YEARLY_SALES_TRENDS,
            ChartKind::Line,
            "Yearly Sales Trends",
            "Year",
            "Sales",
        )
        .points(aggregate::yearly_sales(&filtered));

        let profit_by_month = ChartResult::new(
            ids::PROFIT_BY_MONTH,
            ChartKind::Bar,
            "Profit by Month",
            "Month",
            "Profit",
        )
        .color(ColorMode::Continuous)
        .points(aggregate::profit_by_month(&filtered));

        let quantity_by_category = ChartResult::new(
            ids::QUANTITY_BY_CATEGORY,
            ChartKind::Bar,
            "Quantity by Category",
            "Category",
            "Quantity",
        )
        .color(ColorMode::Continuous)
        .points(
            aggregate::quantity_by_category(&filtered)
                .into_iter()
                .map(|(category, quantity)| (category, quantity as f64)),
        );

        let by_state = aggregate::profit_by_state(&filtered);
        let unmatched = self.boundaries.unmatched(by_state.iter().map(|(state, _)| *state));
        if !unmatched.is_empty() {
            tracing::debug!(
                unmatched = ?unmatched,
                "States without boundary geometry will not be drawn"
            );
        }

        let profit_by_state = ChartResult::new(
            ids::PROFIT_BY_STATE,
            ChartKind::Choropleth,
            "Profit by State",
            "State",
            "Profit",
        )
        .geo(GeoBinding {
            geojson_url: self.geojson_url.clone(),
            feature_id_key: self.boundaries.feature_id_key().to_string(),
        })
        .points(by_state);

        tracing::debug!(
            year = ?inputs.filter.year,
            state = ?inputs.filter.state,
            sub_category = ?inputs.filter.sub_category,
            records = filtered.len(),
            modal = ?modal,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Dashboard updated"
        );

        DashboardOutputs {
            profit_by_category,
            top_profited_products,
            sales_by_region,
            yearly_sales_trends,
            profit_by_month,
            quantity_by_category,
            profit_by_state,
            profit_by_category_modal,
            modal,
            record_count: filtered.len(),
        }
    }
}
