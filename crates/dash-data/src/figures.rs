//! The five figure functions behind the dashboard charts.
//!
//! Each one is a pure function of the dataset and the current control values.
//! An empty selection yields [`Figure::Empty`] rather than an empty chart.

use dash_core::chart::{
    palette_color, BarMode, ChartKind, ChartSpec, ChartStyle, Figure, Series, GENDER_COLORS,
    SET2_COLORS,
};
use dash_core::formatting::format_compact;
use dash_core::models::CategoricalField;
use dash_core::stats;
use tracing::debug;

use crate::aggregator::Aggregator;
use crate::dataset::{Dataset, View};

/// Number of equal-width bins in both histograms.
pub const HISTOGRAM_BINS: usize = 20;

pub const AGE_TITLE: &str = "Age distribution by Gender";
pub const CONDITION_TITLE: &str = "Medical Condition Distribution";
pub const INSURANCE_TITLE: &str = "Insurance Provider Price Comparison";
pub const BILLING_TITLE: &str = "Billing Amount Distribution";
pub const TRENDS_TITLE: &str = "admission trends over time";

// ── Age distribution ──────────────────────────────────────────────────────────

/// Age histogram for the selected gender (all rows when `None`), one series
/// per gender sharing the same bins.
pub fn age_distribution(dataset: &Dataset, gender: Option<&str>) -> Figure {
    let selection = select_gender(dataset, gender);
    if selection.is_empty() {
        debug!(?gender, "age distribution: empty selection");
        return Figure::Empty;
    }

    let ages: Vec<f64> = selection
        .iter()
        .filter_map(|r| r.age.map(f64::from))
        .collect();
    let sorted = stats::sorted_finite(ages);
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Figure::Empty;
    };
    let edges = stats::bin_edges(min, max, HISTOGRAM_BINS);

    let series = Aggregator::count_by_category(selection.iter(), CategoricalField::Gender)
        .into_iter()
        .enumerate()
        .map(|(i, (name, _))| {
            let values: Vec<f64> = selection
                .iter()
                .filter(|r| r.gender == name)
                .filter_map(|r| r.age.map(f64::from))
                .collect();
            Series {
                color: palette_color(GENDER_COLORS, i),
                values: Aggregator::histogram(&values, &edges),
                name,
            }
        })
        .collect();

    Figure::Chart(ChartSpec {
        kind: ChartKind::Histogram,
        title: AGE_TITLE.to_string(),
        x_label: "Age".to_string(),
        y_label: "count".to_string(),
        categories: bin_labels(&edges),
        series,
        bar_mode: Some(BarMode::Stack),
        bin_edges: edges,
        row_count: selection.len(),
    })
}

// ── Medical condition distribution ────────────────────────────────────────────

/// Share of each medical condition within the selected gender.
pub fn condition_distribution(dataset: &Dataset, gender: Option<&str>) -> Figure {
    let selection = select_gender(dataset, gender);
    if selection.is_empty() {
        debug!(?gender, "condition distribution: empty selection");
        return Figure::Empty;
    }

    let (categories, values): (Vec<String>, Vec<f64>) =
        Aggregator::count_by_category(selection.iter(), CategoricalField::MedicalCondition)
            .into_iter()
            .map(|(name, count)| (name, count as f64))
            .unzip();

    Figure::Chart(ChartSpec {
        kind: ChartKind::Pie,
        title: CONDITION_TITLE.to_string(),
        x_label: CategoricalField::MedicalCondition.column_name().to_string(),
        y_label: "count".to_string(),
        categories,
        series: vec![Series {
            name: "count".to_string(),
            color: None,
            values,
        }],
        bar_mode: None,
        bin_edges: Vec::new(),
        row_count: selection.len(),
    })
}

// ── Insurance comparison ──────────────────────────────────────────────────────

/// Total billing per insurance provider, grouped by medical condition.
pub fn insurance_comparison(dataset: &Dataset, gender: Option<&str>) -> Figure {
    let selection = select_gender(dataset, gender);
    if selection.is_empty() {
        debug!(?gender, "insurance comparison: empty selection");
        return Figure::Empty;
    }

    let totals = Aggregator::sum_billing_by(
        selection.iter(),
        CategoricalField::InsuranceProvider,
        CategoricalField::MedicalCondition,
    );
    if totals.is_empty() {
        return Figure::Empty;
    }

    let series = totals
        .groups
        .into_iter()
        .zip(totals.values)
        .enumerate()
        .map(|(i, (name, values))| Series {
            name,
            color: palette_color(SET2_COLORS, i),
            values,
        })
        .collect();

    Figure::Chart(ChartSpec {
        kind: ChartKind::Bar,
        title: INSURANCE_TITLE.to_string(),
        x_label: CategoricalField::InsuranceProvider.column_name().to_string(),
        y_label: "Billing Amount".to_string(),
        categories: totals.categories,
        series,
        bar_mode: Some(BarMode::Group),
        bin_edges: Vec::new(),
        row_count: selection.len(),
    })
}

// ── Billing distribution ──────────────────────────────────────────────────────

/// Histogram of billing amounts at or below `ceiling` for the selected gender.
pub fn billing_distribution(dataset: &Dataset, gender: Option<&str>, ceiling: f64) -> Figure {
    let selection = select_gender(dataset, gender)
        .filter(|r| r.billing_amount.is_some_and(|amount| amount <= ceiling));
    if selection.is_empty() {
        debug!(?gender, ceiling, "billing distribution: empty selection");
        return Figure::Empty;
    }

    let sorted = stats::sorted_finite(selection.iter().filter_map(|r| r.billing_amount));
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Figure::Empty;
    };
    let edges = stats::bin_edges(min, max, HISTOGRAM_BINS);

    Figure::Chart(ChartSpec {
        kind: ChartKind::Histogram,
        title: BILLING_TITLE.to_string(),
        x_label: "Billing Amount".to_string(),
        y_label: "count".to_string(),
        categories: bin_labels(&edges),
        series: vec![Series {
            name: "Billing Amount".to_string(),
            color: None,
            values: Aggregator::histogram(&sorted, &edges),
        }],
        bar_mode: None,
        bin_edges: edges,
        row_count: selection.len(),
    })
}

// ── Admission trends ──────────────────────────────────────────────────────────

/// Admissions per month for the selected condition, drawn as `style`.
pub fn admission_trends(dataset: &Dataset, style: ChartStyle, condition: Option<&str>) -> Figure {
    let selection = dataset
        .view()
        .filter_eq(CategoricalField::MedicalCondition, condition);
    let buckets = Aggregator::count_by_month(selection.iter());
    if buckets.is_empty() {
        debug!(?condition, "admission trends: no dated rows");
        return Figure::Empty;
    }

    let row_count: usize = buckets.iter().map(|(_, n)| n).sum();
    let (categories, values): (Vec<String>, Vec<f64>) = buckets
        .into_iter()
        .map(|(ym, n)| (ym.to_string(), n as f64))
        .unzip();

    Figure::Chart(ChartSpec {
        kind: match style {
            ChartStyle::Line => ChartKind::Line,
            ChartStyle::Bar => ChartKind::Bar,
        },
        title: TRENDS_TITLE.to_string(),
        x_label: "year month".to_string(),
        y_label: "Count".to_string(),
        categories,
        series: vec![Series {
            name: "Count".to_string(),
            color: None,
            values,
        }],
        bar_mode: None,
        bin_edges: Vec::new(),
        row_count,
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn select_gender<'a>(dataset: &'a Dataset, gender: Option<&str>) -> View<'a> {
    dataset.view().filter_eq(CategoricalField::Gender, gender)
}

/// `lo-hi` label for each bin.
fn bin_labels(edges: &[f64]) -> Vec<String> {
    edges
        .windows(2)
        .map(|w| format!("{}-{}", format_compact(w[0]), format_compact(w[1])))
        .collect()
}
