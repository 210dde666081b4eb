//! Grouped aggregations
//!
//! Every chart is one group-by-and-sum over the filtered records. Groups come
//! out in ascending key order; values are summed in record order, so repeated
//! calls over the same input give bit-identical results.

use crate::dataset::SalesRecord;
use std::collections::BTreeMap;

/// Sum `value` per `key`, ordered by key
pub fn sum_by<'a, K, F, V>(records: &[&'a SalesRecord], key: F, value: V) -> Vec<(K, f64)>
where
    K: Ord,
    F: Fn(&'a SalesRecord) -> K,
    V: Fn(&SalesRecord) -> f64,
{
    let mut groups: BTreeMap<K, f64> = BTreeMap::new();
    for &record in records {
        *groups.entry(key(record)).or_insert(0.0) += value(record);
    }
    groups.into_iter().collect()
}

/// The `n` largest groups, descending by value
///
/// The sort is stable, so equal values keep ascending key order.
pub fn largest<K>(mut groups: Vec<(K, f64)>, n: usize) -> Vec<(K, f64)> {
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));
    groups.truncate(n);
    groups
}

pub fn profit_by_category<'a>(records: &[&'a SalesRecord]) -> Vec<(&'a str, f64)> {
    sum_by(records, |r| r.category.as_str(), |r| r.profit)
}

pub fn top_profited_products<'a>(records: &[&'a SalesRecord], n: usize) -> Vec<(&'a str, f64)> {
    largest(sum_by(records, |r| r.product_name.as_str(), |r| r.profit), n)
}

pub fn sales_by_region<'a>(records: &[&'a SalesRecord]) -> Vec<(&'a str, f64)> {
    sum_by(records, |r| r.region.as_str(), |r| r.sales)
}

/// Ascending by year
pub fn yearly_sales(records: &[&SalesRecord]) -> Vec<(i32, f64)> {
    sum_by(records, |r| r.year(), |r| r.sales)
}

/// Months 1-12; the same month of different years lands in one group
pub fn profit_by_month(records: &[&SalesRecord]) -> Vec<(u32, f64)> {
    sum_by(records, |r| r.month(), |r| r.profit)
}

/// Integer sums, saturating at `i64::MAX`
pub fn quantity_by_category<'a>(records: &[&'a SalesRecord]) -> Vec<(&'a str, i64)> {
    let mut groups: BTreeMap<&'a str, i64> = BTreeMap::new();
    for &record in records {
        let total = groups.entry(record.category.as_str()).or_insert(0);
        *total = total.saturating_add(record.quantity);
    }
    groups.into_iter().collect()
}

pub fn profit_by_state<'a>(records: &[&'a SalesRecord]) -> Vec<(&'a str, f64)> {
    sum_by(records, |r| r.state.as_str(), |r| r.profit)
}
