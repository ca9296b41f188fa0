//! The immutable, in-memory healthcare dataset and borrowed views over it.
//!
//! A [`Dataset`] is built once during startup and never mutated afterwards.
//! Every filter produces a new [`View`] of borrowed rows.

use std::collections::HashSet;

use dash_core::models::{CategoricalField, Record};
use dash_core::stats;
use serde::Serialize;

// ── SummaryStats ──────────────────────────────────────────────────────────────

/// Header figures computed once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Total number of rows, including rows with missing fields.
    pub record_count: usize,
    /// Mean billing amount over rows where it is present; `0.0` when none are.
    pub average_billing: f64,
}

impl SummaryStats {
    pub fn from_records(records: &[Record]) -> Self {
        let amounts: Vec<f64> = records.iter().filter_map(|r| r.billing_amount).collect();
        Self {
            record_count: records.len(),
            average_billing: stats::mean(&amounts),
        }
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// The loaded dataset plus facts derived from it at load time.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    genders: Vec<String>,
    conditions: Vec<String>,
    /// Present billing amounts, ascending.
    billing_sorted: Vec<f64>,
    summary: SummaryStats,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        let genders = distinct_in_order(&records, CategoricalField::Gender);
        let conditions = distinct_in_order(&records, CategoricalField::MedicalCondition);
        let billing_sorted = stats::sorted_finite(records.iter().filter_map(|r| r.billing_amount));
        let summary = SummaryStats::from_records(&records);

        Self {
            records,
            genders,
            conditions,
            billing_sorted,
            summary,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A view over every row.
    pub fn view(&self) -> View<'_> {
        View {
            rows: self.records.iter().collect(),
        }
    }

    pub fn summary(&self) -> SummaryStats {
        self.summary
    }

    /// Distinct genders in order of first appearance.
    pub fn genders(&self) -> &[String] {
        &self.genders
    }

    /// Distinct medical conditions in order of first appearance.
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    /// Present billing amounts, sorted ascending.
    pub fn billing_values(&self) -> &[f64] {
        &self.billing_sorted
    }

    /// `(min, max)` of the present billing amounts.
    pub fn billing_range(&self) -> Option<(f64, f64)> {
        let first = *self.billing_sorted.first()?;
        let last = *self.billing_sorted.last()?;
        Some((first, last))
    }

    /// Billing quantile for `q` in `[0, 1]`, linearly interpolated.
    pub fn billing_quantile(&self, q: f64) -> Option<f64> {
        if self.billing_sorted.is_empty() {
            return None;
        }
        Some(stats::percentile(&self.billing_sorted, q * 100.0))
    }

    pub fn billing_median(&self) -> Option<f64> {
        self.billing_quantile(0.5)
    }
}

/// Non-empty values of `field`, deduplicated, in first-appearance order.
fn distinct_in_order(records: &[Record], field: CategoricalField) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for record in records {
        let value = record.category(field);
        if !value.is_empty() && seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}

// ── View ──────────────────────────────────────────────────────────────────────

/// A filtered selection of borrowed rows, in dataset order.
#[derive(Debug, Clone)]
pub struct View<'a> {
    rows: Vec<&'a Record>,
}

impl<'a> View<'a> {
    /// Keep rows whose `field` equals `value`; `None` keeps every row.
    pub fn filter_eq(self, field: CategoricalField, value: Option<&str>) -> View<'a> {
        match value {
            Some(wanted) => self.filter(|r| r.category(field) == wanted),
            None => self,
        }
    }

    /// Keep rows satisfying `pred`.
    pub fn filter(self, pred: impl Fn(&Record) -> bool) -> View<'a> {
        View {
            rows: self.rows.into_iter().filter(|r| pred(r)).collect(),
        }
    }

    /// Split into `(matching, rest)` on `field == value`.
    pub fn partition_eq(&self, field: CategoricalField, value: &str) -> (View<'a>, View<'a>) {
        let (matching, rest): (Vec<&'a Record>, Vec<&'a Record>) = self
            .rows
            .iter()
            .copied()
            .partition(|r| r.category(field) == value);
        (View { rows: matching }, View { rows: rest })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().copied()
    }

    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }
}
