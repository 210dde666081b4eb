//! Layout Builder
//!
//! Declares the static page once at startup from the dataset summary:
//!
//! - header
//! - three metric boxes (total sales, total profit, distinct customers)
//! - three dropdown filters populated from the column domains
//! - seven chart placeholders and the popup trigger
//! - the popup container, initially hidden
//!
//! No behaviour lives here; the page script posts every interaction to the
//! update endpoint and redraws from the response.

mod node;
mod render;

pub use node::{Element, Node};
pub use render::{escape_html, render_node, render_page};

use crate::dashboard::ids;
use crate::dataset::DatasetSummary;

/// DOM ids of the interactive controls
pub mod controls {
    pub const YEAR_FILTER: &str = "year_filter";
    pub const STATE_FILTER: &str = "state_filter";
    pub const SUBCATEGORY_FILTER: &str = "subcategory_filter";
    pub const OPEN_MODAL_BUTTON: &str = "open-modal-button";
    pub const CLOSE_MODAL: &str = "close-modal";
    pub const MODAL: &str = "modal";
}

/// Page-level settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Header and document title
    pub title: String,
    /// Endpoint the page posts updates to
    pub update_url: String,
    /// Plotly bundle URL
    pub plotly_src: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            title: "Amazon Sales Dashboard".to_string(),
            update_url: "/api/v1/update".to_string(),
            plotly_src: "https://cdn.plot.ly/plotly-2.35.2.min.js".to_string(),
        }
    }
}

/// Build the page tree
pub fn build_layout(summary: &DatasetSummary, options: &LayoutOptions) -> Node {
    let header = Element::new("div").child(
        Element::new("h1")
            .class("dashboard-header")
            .text(options.title.as_str()),
    );

    let metrics = Element::new("div").class("metric-container").children([
        metric_box(format!("Total Sales: {}", format_currency(summary.total_sales))),
        metric_box(format!("Total Profit: {}", format_currency(summary.total_profit))),
        metric_box(format!("Total Customers: {}", summary.total_customers)),
    ]);

    let filters = Element::new("div").class("filter-section").children([
        dropdown(
            "Filter by Year",
            controls::YEAR_FILTER,
            "Select a year",
            summary.years.iter().map(|y| y.to_string()),
        ),
        dropdown(
            "Filter by State",
            controls::STATE_FILTER,
            "Select a state",
            summary.states.iter().cloned(),
        ),
        dropdown(
            "Filter by Sub-Category",
            controls::SUBCATEGORY_FILTER,
            "Select a sub-category",
            summary.sub_categories.iter().cloned(),
        ),
    ]);

    let graphs = Element::new("div")
        .class("graph-container")
        .children(ids::GRID.iter().map(|id| graph(id)))
        .child(
            Element::new("button")
                .id(controls::OPEN_MODAL_BUTTON)
                .attr("type", "button")
                .text("Open Profit by Category"),
        );

    let modal = Element::new("div")
        .id(controls::MODAL)
        .class("modal")
        .style("display: none")
        .child(
            Element::new("div")
                .class("modal-content")
                .child(
                    Element::new("span")
                        .class("close")
                        .id(controls::CLOSE_MODAL)
                        .text("\u{00d7}"),
                )
                .child(graph(ids::PROFIT_BY_CATEGORY_MODAL)),
        );

    Element::new("div")
        .class("dashboard")
        .child(header)
        .child(metrics)
        .child(filters)
        .child(graphs)
        .child(modal)
        .into()
}

fn metric_box(text: String) -> Element {
    Element::new("div")
        .class("metric-box")
        .child(Element::new("h4").class("metric-box").text(text))
}

fn dropdown<I>(label: &str, id: &str, placeholder: &str, values: I) -> Element
where
    I: IntoIterator<Item = String>,
{
    let select = Element::new("select")
        .id(id)
        .class("dropdown")
        .child(
            Element::new("option")
                .attr("value", "")
                .text(placeholder),
        )
        .children(values.into_iter().map(|value| {
            Element::new("option")
                .attr("value", value.as_str())
                .text(value)
        }));

    Element::new("div")
        .style("width: 30%; display: inline-block")
        .child(Element::new("label").attr("for", id).text(label))
        .child(select)
}

fn graph(id: &str) -> Element {
    Element::new("div").id(id).class("fade-in graph")
}

/// `$1,234.56`; negative amounts render as `$-1,234.56`
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("${}{}.{}", sign, grouped, frac_part)
}
