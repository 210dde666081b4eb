//! Dataset summary statistics
//!
//! Computed once at startup and fed to the layout builder: headline totals
//! plus the distinct values that populate the three dropdown filters.

use super::types::SalesDataset;
use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;

/// Headline totals and filter domains
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetSummary {
    pub record_count: usize,
    pub total_sales: f64,
    pub total_profit: f64,
    /// Number of distinct customer ids
    pub total_customers: usize,
    /// Distinct order years, first-appearance order
    pub years: Vec<i32>,
    /// Distinct states, first-appearance order
    pub states: Vec<String>,
    /// Distinct sub-categories, first-appearance order
    pub sub_categories: Vec<String>,
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &SalesDataset) -> Self {
        let records = dataset.records();

        let total_sales = records.iter().map(|r| r.sales).sum();
        let total_profit = records.iter().map(|r| r.profit).sum();
        let total_customers = records
            .iter()
            .map(|r| r.customer_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            record_count: records.len(),
            total_sales,
            total_profit,
            total_customers,
            years: distinct(records.iter().map(|r| r.year())),
            states: distinct(records.iter().map(|r| r.state.clone())),
            sub_categories: distinct(records.iter().map(|r| r.sub_category.clone())),
        }
    }
}

/// Unique values, keeping the order in which they first appear
fn distinct<T, I>(values: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}
