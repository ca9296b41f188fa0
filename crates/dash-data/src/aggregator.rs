//! Group-by and binning primitives used by the figure functions.

use std::collections::{BTreeMap, HashMap};

use dash_core::models::{CategoricalField, Record, YearMonth};
use dash_core::stats;

// ── Category totals ───────────────────────────────────────────────────────────

/// Values keyed by `(group, category)`, both axes in first-appearance order.
///
/// `values[g][c]` is the total for group `groups[g]` at category
/// `categories[c]`; pairs never seen are `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedTotals {
    pub categories: Vec<String>,
    pub groups: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl GroupedTotals {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Stateless aggregation helpers over borrowed records.
pub struct Aggregator;

impl Aggregator {
    /// Count rows per value of `field`, in first-appearance order.
    pub fn count_by_category<'a>(
        rows: impl IntoIterator<Item = &'a Record>,
        field: CategoricalField,
    ) -> Vec<(String, usize)> {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();
        for record in rows {
            let key = record.category(field);
            match index.get(key) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(key, counts.len());
                    counts.push((key.to_string(), 1));
                }
            }
        }
        counts
    }

    /// Sum present billing amounts per `(group_field, category_field)` pair.
    ///
    /// Rows without a billing amount do not contribute and do not introduce
    /// new categories or groups.
    pub fn sum_billing_by<'a>(
        rows: impl IntoIterator<Item = &'a Record>,
        category_field: CategoricalField,
        group_field: CategoricalField,
    ) -> GroupedTotals {
        let mut categories: Vec<String> = Vec::new();
        let mut groups: Vec<String> = Vec::new();
        let mut cat_index: HashMap<&'a str, usize> = HashMap::new();
        let mut group_index: HashMap<&'a str, usize> = HashMap::new();
        let mut sums: HashMap<(usize, usize), f64> = HashMap::new();

        for record in rows {
            let Some(amount) = record.billing_amount else {
                continue;
            };
            let cat = record.category(category_field);
            let group = record.category(group_field);

            let c = *cat_index.entry(cat).or_insert_with(|| {
                categories.push(cat.to_string());
                categories.len() - 1
            });
            let g = *group_index.entry(group).or_insert_with(|| {
                groups.push(group.to_string());
                groups.len() - 1
            });
            *sums.entry((g, c)).or_insert(0.0) += amount;
        }

        let values = (0..groups.len())
            .map(|g| {
                (0..categories.len())
                    .map(|c| sums.get(&(g, c)).copied().unwrap_or(0.0))
                    .collect()
            })
            .collect();

        GroupedTotals {
            categories,
            groups,
            values,
        }
    }

    /// Count rows per admission month, ascending.  Rows with no bucket are
    /// dropped.
    pub fn count_by_month<'a>(rows: impl IntoIterator<Item = &'a Record>) -> Vec<(YearMonth, usize)> {
        let mut buckets: BTreeMap<YearMonth, usize> = BTreeMap::new();
        for record in rows {
            if let Some(ym) = record.year_month {
                *buckets.entry(ym).or_insert(0) += 1;
            }
        }
        buckets.into_iter().collect()
    }

    /// Count `values` into the bins described by `edges`.
    ///
    /// Returns `edges.len() - 1` counts; values outside the edges are ignored.
    pub fn histogram(values: &[f64], edges: &[f64]) -> Vec<f64> {
        let bins = edges.len().saturating_sub(1);
        let mut counts = vec![0.0; bins];
        for &value in values {
            if let Some(i) = stats::bin_index(edges, value) {
                counts[i] += 1.0;
            }
        }
        counts
    }
}
