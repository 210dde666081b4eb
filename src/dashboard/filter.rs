//! Filter selection
//!
//! The three dropdown values. Each present value adds an equality predicate;
//! predicates are combined with AND. A value that matches nothing simply
//! produces an empty record set.

use crate::dataset::SalesRecord;
use serde::{Deserialize, Serialize};

/// Current dropdown selection, `None` meaning "all"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
}

impl FilterSelection {
    /// Selection with every filter cleared
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: filter on order year
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Builder method: filter on state
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Builder method: filter on sub-category
    pub fn sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    /// Treat empty strings as a cleared dropdown
    pub fn normalized(self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Self {
            year: self.year,
            state: non_empty(self.state),
            sub_category: non_empty(self.sub_category),
        }
    }

    /// True when no predicate is active
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.state.is_none() && self.sub_category.is_none()
    }

    /// Check a record against every active predicate
    pub fn matches(&self, record: &SalesRecord) -> bool {
        if let Some(year) = self.year {
            if record.year() != year {
                return false;
            }
        }
        if let Some(state) = &self.state {
            if &record.state != state {
                return false;
            }
        }
        if let Some(sub_category) = &self.sub_category {
            if &record.sub_category != sub_category {
                return false;
            }
        }
        true
    }

    /// Matching records, in dataset order
    pub fn apply<'a>(&self, records: &'a [SalesRecord]) -> Vec<&'a SalesRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn records() -> Vec<SalesRecord> {
        let d = |y, m| NaiveDate::from_ymd_opt(y, m, 1).unwrap();
        vec![
            SalesRecord::new(d(2019, 1), 10.0, 1.0).state("Goa").sub_category("Chairs"),
            SalesRecord::new(d(2019, 6), 20.0, 2.0).state("Kerala").sub_category("Phones"),
            SalesRecord::new(d(2020, 2), 30.0, 3.0).state("Goa").sub_category("Phones"),
            SalesRecord::new(d(2021, 9), 40.0, 4.0).state("Goa").sub_category("Chairs"),
        ]
    }

    #[test]
    fn test_empty_selection_keeps_everything() {
        let records = records();
        let selection = FilterSelection::new();
        assert!(selection.is_empty());
        assert_eq!(selection.apply(&records).len(), records.len());
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let records = records();
        let selection = FilterSelection::new().state("Goa").sub_category("Chairs");
        let filtered = selection.apply(&records);

        assert_eq!(filtered.len(), 2);
        assert!(filtered
            .iter()
            .all(|r| r.state == "Goa" && r.sub_category == "Chairs"));
    }

    #[test]
    fn test_year_filter_uses_order_year() {
        let records = records();
        let filtered = FilterSelection::new().year(2019).apply(&records);
        let sales: Vec<f64> = filtered.iter().map(|r| r.sales).collect();
        assert_eq!(sales, vec![10.0, 20.0]);
    }

    #[test]
    fn test_unknown_value_yields_empty_set() {
        let records = records();
        assert!(FilterSelection::new().state("Atlantis").apply(&records).is_empty());
        assert!(FilterSelection::new().year(1999).apply(&records).is_empty());
    }

    #[test]
    fn test_filtered_set_is_subset() {
        let records = records();
        let combos = [
            FilterSelection::new().year(2019),
            FilterSelection::new().year(2020).state("Goa"),
            FilterSelection::new().state("Goa").sub_category("Phones"),
            FilterSelection::new().year(2021).state("Goa").sub_category("Chairs"),
        ];

        for selection in combos {
            for record in selection.apply(&records) {
                assert!(records.contains(record));
                assert!(selection.matches(record));
            }
        }
    }

    #[test]
    fn test_normalized_clears_empty_strings() {
        let selection = FilterSelection::new().state("").sub_category("Chairs").normalized();
        assert_eq!(selection.state, None);
        assert_eq!(selection.sub_category.as_deref(), Some("Chairs"));
    }
}
