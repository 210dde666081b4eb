//! Core data types for the sales dataset
//!
//! - `SalesRecord`: one order line
//! - `SalesDataset`: the immutable, in-memory record set

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single sales order line
///
/// Immutable after load. Text columns are kept as raw strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesRecord {
    /// Order date (time of day is discarded on load)
    pub order_date: NaiveDate,
    /// Sales amount
    pub sales: f64,
    /// Profit amount, may be negative
    pub profit: f64,
    /// Units ordered
    pub quantity: i64,
    pub category: String,
    pub sub_category: String,
    pub product_name: String,
    pub region: String,
    pub state: String,
    pub customer_id: String,
}

impl SalesRecord {
    /// Create a record with empty text columns and a quantity of 1
    pub fn new(order_date: NaiveDate, sales: f64, profit: f64) -> Self {
        Self {
            order_date,
            sales,
            profit,
            quantity: 1,
            category: String::new(),
            sub_category: String::new(),
            product_name: String::new(),
            region: String::new(),
            state: String::new(),
            customer_id: String::new(),
        }
    }

    /// Builder method: set quantity
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Builder method: set category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder method: set sub-category
    pub fn sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = sub_category.into();
        self
    }

    /// Builder method: set product name
    pub fn product(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = product_name.into();
        self
    }

    /// Builder method: set region
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Builder method: set state
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Builder method: set customer id
    pub fn customer(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = customer_id.into();
        self
    }

    /// Calendar year of the order
    pub fn year(&self) -> i32 {
        self.order_date.year()
    }

    /// Month of the order, 1-12
    pub fn month(&self) -> u32 {
        self.order_date.month()
    }
}

/// The full record set, held for the process lifetime
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
}

impl SalesDataset {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    /// All records in file order
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }
}

impl FromIterator<SalesRecord> for SalesDataset {
    fn from_iter<I: IntoIterator<Item = SalesRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let date = NaiveDate::from_ymd_opt(2019, 3, 1).unwrap();
        let record = SalesRecord::new(date, 100.0, 20.0)
            .quantity(3)
            .category("Technology")
            .sub_category("Phones")
            .state("Kerala");

        assert_eq!(record.year(), 2019);
        assert_eq!(record.month(), 3);
        assert_eq!(record.quantity, 3);
        assert_eq!(record.category, "Technology");
        assert_eq!(record.sub_category, "Phones");
        assert_eq!(record.state, "Kerala");
        assert!(record.region.is_empty());
    }

    #[test]
    fn test_dataset_from_iter() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
        let dataset: SalesDataset = (0..3)
            .map(|i| SalesRecord::new(date, i as f64, 0.0))
            .collect();

        assert_eq!(dataset.len(), 3);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.records()[2].sales, 2.0);
        assert!(SalesDataset::default().is_empty());
    }
}
