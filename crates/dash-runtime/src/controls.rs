//! Dashboard controls: their current values, the changes the UI can request,
//! and the option lists and slider bounds derived from the dataset.

use std::collections::BTreeMap;

use dash_core::chart::ChartStyle;
use dash_core::formatting::format_whole_dollars;
use dash_data::dataset::Dataset;
use serde::Serialize;

/// Placeholder shown while no gender is selected.
pub const GENDER_PLACEHOLDER: &str = "Select Gender";
/// Placeholder shown while no medical condition is selected.
pub const CONDITION_PLACEHOLDER: &str = "Select a condition";

/// Billing slider increment.
pub const SLIDER_STEP: f64 = 100.0;
/// Quantiles at which slider marks are placed.
pub const MARK_QUANTILES: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

// ── Control identity and values ───────────────────────────────────────────────

/// The four input controls a figure can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlId {
    Gender,
    BillingCeiling,
    Condition,
    ChartStyle,
}

/// A request to set one control to a new value.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlChange {
    Gender(Option<String>),
    BillingCeiling(f64),
    Condition(Option<String>),
    ChartStyle(ChartStyle),
}

impl ControlChange {
    pub fn control(&self) -> ControlId {
        match self {
            ControlChange::Gender(_) => ControlId::Gender,
            ControlChange::BillingCeiling(_) => ControlId::BillingCeiling,
            ControlChange::Condition(_) => ControlId::Condition,
            ControlChange::ChartStyle(_) => ControlId::ChartStyle,
        }
    }
}

/// Current value of every control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    pub gender: Option<String>,
    pub billing_ceiling: f64,
    pub condition: Option<String>,
    pub chart_style: ChartStyle,
}

impl Controls {
    /// Apply `change`; returns `false` when the control already held the value.
    pub fn apply(&mut self, change: ControlChange) -> bool {
        match change {
            ControlChange::Gender(v) => replace_if_changed(&mut self.gender, v),
            ControlChange::Condition(v) => replace_if_changed(&mut self.condition, v),
            ControlChange::ChartStyle(v) => replace_if_changed(&mut self.chart_style, v),
            ControlChange::BillingCeiling(v) => {
                if self.billing_ceiling == v || v.is_nan() {
                    false
                } else {
                    self.billing_ceiling = v;
                    true
                }
            }
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

// ── BillingSlider ─────────────────────────────────────────────────────────────

/// Bounds, step and marks of the billing-ceiling slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillingSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Initial value: the median billing amount.
    pub default_value: f64,
    /// Quantile positions, in [`MARK_QUANTILES`] order.
    pub mark_values: Vec<f64>,
    /// Marks keyed by the truncated integer value, labelled `$12,345`.
    pub marks: BTreeMap<i64, String>,
}

impl BillingSlider {
    /// Derive the slider from the dataset's billing column.  A dataset with no
    /// billing values yields a collapsed `[0, 0]` slider without marks.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let Some((min, max)) = dataset.billing_range() else {
            return Self {
                min: 0.0,
                max: 0.0,
                step: SLIDER_STEP,
                default_value: 0.0,
                mark_values: Vec::new(),
                marks: BTreeMap::new(),
            };
        };

        let mark_values: Vec<f64> = MARK_QUANTILES
            .iter()
            .filter_map(|&q| dataset.billing_quantile(q))
            .collect();
        let marks = mark_values
            .iter()
            .map(|&v| (v.trunc() as i64, format_whole_dollars(v)))
            .collect();

        Self {
            min,
            max,
            step: SLIDER_STEP,
            default_value: dataset.billing_median().unwrap_or(min),
            mark_values,
            marks,
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Move `value` by `steps` increments, clamped to the bounds.
    pub fn step_by(&self, value: f64, steps: i32) -> f64 {
        self.clamp(value + self.step * f64::from(steps))
    }

    /// First mark strictly above `value`, or the maximum.
    pub fn next_mark(&self, value: f64) -> f64 {
        self.mark_values
            .iter()
            .copied()
            .find(|&m| m > value)
            .unwrap_or(self.max)
    }

    /// Last mark strictly below `value`, or the minimum.
    pub fn prev_mark(&self, value: f64) -> f64 {
        self.mark_values
            .iter()
            .rev()
            .copied()
            .find(|&m| m < value)
            .unwrap_or(self.min)
    }

    /// Position of `value` within the bounds as a fraction in `[0, 1]`.
    pub fn ratio(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 1.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

// ── ControlOptions ────────────────────────────────────────────────────────────

/// Everything the control widgets need that is derived from the dataset.
#[derive(Debug, Clone)]
pub struct ControlOptions {
    pub genders: Vec<String>,
    pub conditions: Vec<String>,
    pub slider: BillingSlider,
}

impl ControlOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            genders: dataset.genders().to_vec(),
            conditions: dataset.conditions().to_vec(),
            slider: BillingSlider::from_dataset(dataset),
        }
    }

    /// Controls as they stand when the dashboard opens.
    pub fn initial_controls(&self) -> Controls {
        Controls {
            gender: None,
            billing_ceiling: self.slider.default_value,
            condition: None,
            chart_style: ChartStyle::default(),
        }
    }

    /// Next gender in the cycle none → each option → none.
    pub fn next_gender(&self, current: Option<&str>) -> Option<String> {
        cycle_option(&self.genders, current)
    }

    /// Next condition in the cycle none → each option → none.
    pub fn next_condition(&self, current: Option<&str>) -> Option<String> {
        cycle_option(&self.conditions, current)
    }
}

fn cycle_option(options: &[String], current: Option<&str>) -> Option<String> {
    let next_index = match current {
        None => 0,
        Some(value) => match options.iter().position(|o| o == value) {
            Some(i) => i + 1,
            None => 0,
        },
    };
    options.get(next_index).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::models::Record;

    fn billing_dataset(amounts: &[f64]) -> Dataset {
        let records = amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| Record {
                gender: if i % 2 == 0 { "Male" } else { "Female" }.to_string(),
                age: Some(40),
                medical_condition: if i % 3 == 0 { "Flu" } else { "Asthma" }.to_string(),
                insurance_provider: "Aetna".to_string(),
                billing_amount: Some(amount),
                admission_date: None,
                year_month: None,
            })
            .collect();
        Dataset::new(records)
    }

    #[test]
    fn test_controls_apply_reports_change() {
        let mut controls = Controls {
            gender: None,
            billing_ceiling: 100.0,
            condition: None,
            chart_style: ChartStyle::Line,
        };
        assert!(controls.apply(ControlChange::Gender(Some("Female".into()))));
        assert!(!controls.apply(ControlChange::Gender(Some("Female".into()))));
        assert!(!controls.apply(ControlChange::BillingCeiling(100.0)));
        assert!(controls.apply(ControlChange::BillingCeiling(200.0)));
        assert!(!controls.apply(ControlChange::BillingCeiling(f64::NAN)));
        assert!(controls.apply(ControlChange::ChartStyle(ChartStyle::Bar)));
        assert!(!controls.apply(ControlChange::Condition(None)));
        assert_eq!(controls.gender.as_deref(), Some("Female"));
        assert_eq!(controls.billing_ceiling, 200.0);
        assert_eq!(controls.chart_style, ChartStyle::Bar);
    }

    #[test]
    fn test_change_control_ids() {
        assert_eq!(ControlChange::Gender(None).control(), ControlId::Gender);
        assert_eq!(
            ControlChange::BillingCeiling(1.0).control(),
            ControlId::BillingCeiling
        );
        assert_eq!(ControlChange::Condition(None).control(), ControlId::Condition);
        assert_eq!(
            ControlChange::ChartStyle(ChartStyle::Bar).control(),
            ControlId::ChartStyle
        );
    }

    #[test]
    fn test_slider_bounds_and_default() {
        let ds = billing_dataset(&[1_000.0, 4_000.0, 2_000.0, 3_000.0, 5_000.0]);
        let slider = BillingSlider::from_dataset(&ds);
        assert_eq!(slider.min, 1_000.0);
        assert_eq!(slider.max, 5_000.0);
        assert_eq!(slider.step, 100.0);
        assert_eq!(slider.default_value, 3_000.0);
    }

    #[test]
    fn test_slider_marks_non_decreasing_and_span_range() {
        let ds = billing_dataset(&[1_234.56, 98_765.4, 20_000.0, 45_500.75, 7_000.0, 61_000.0]);
        let slider = BillingSlider::from_dataset(&ds);

        assert_eq!(slider.mark_values.len(), 5);
        assert!(slider.mark_values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(slider.mark_values[0], slider.min);
        assert_eq!(slider.mark_values[4], slider.max);

        assert_eq!(slider.marks.get(&1_234).map(String::as_str), Some("$1,234"));
        assert_eq!(slider.marks.get(&98_765).map(String::as_str), Some("$98,765"));
    }

    #[test]
    fn test_slider_marks_collapse_on_equal_quantiles() {
        let ds = billing_dataset(&[500.0, 500.0, 500.0]);
        let slider = BillingSlider::from_dataset(&ds);
        assert_eq!(slider.marks.len(), 1);
        assert_eq!(slider.marks[&500], "$500");
        assert_eq!(slider.ratio(500.0), 1.0);
    }

    #[test]
    fn test_slider_without_billing_values() {
        let slider = BillingSlider::from_dataset(&Dataset::new(Vec::new()));
        assert_eq!((slider.min, slider.max), (0.0, 0.0));
        assert!(slider.marks.is_empty());
        assert_eq!(slider.step_by(0.0, 3), 0.0);
    }

    #[test]
    fn test_slider_step_and_mark_jumps() {
        let ds = billing_dataset(&[1_000.0, 2_000.0, 3_000.0, 4_000.0, 5_000.0]);
        let slider = BillingSlider::from_dataset(&ds);

        assert_eq!(slider.step_by(3_000.0, 1), 3_100.0);
        assert_eq!(slider.step_by(3_000.0, -2), 2_800.0);
        assert_eq!(slider.step_by(4_950.0, 1), 5_000.0);
        assert_eq!(slider.step_by(1_050.0, -1), 1_000.0);

        assert_eq!(slider.next_mark(3_000.0), 4_000.0);
        assert_eq!(slider.next_mark(3_050.0), 4_000.0);
        assert_eq!(slider.next_mark(5_000.0), 5_000.0);
        assert_eq!(slider.prev_mark(3_000.0), 2_000.0);
        assert_eq!(slider.prev_mark(1_000.0), 1_000.0);
    }

    #[test]
    fn test_slider_ratio() {
        let ds = billing_dataset(&[0.0, 100.0]);
        let slider = BillingSlider::from_dataset(&ds);
        assert_eq!(slider.ratio(25.0), 0.25);
        assert_eq!(slider.ratio(-5.0), 0.0);
        assert_eq!(slider.ratio(500.0), 1.0);
    }

    #[test]
    fn test_options_and_initial_controls() {
        let ds = billing_dataset(&[100.0, 200.0, 300.0]);
        let options = ControlOptions::from_dataset(&ds);
        assert_eq!(options.genders, ["Male", "Female"]);
        assert_eq!(options.conditions, ["Flu", "Asthma"]);

        let controls = options.initial_controls();
        assert!(controls.gender.is_none());
        assert!(controls.condition.is_none());
        assert_eq!(controls.billing_ceiling, 200.0);
        assert_eq!(controls.chart_style, ChartStyle::Line);
    }

    #[test]
    fn test_option_cycling_wraps_through_none() {
        let ds = billing_dataset(&[100.0, 200.0]);
        let options = ControlOptions::from_dataset(&ds);

        let first = options.next_gender(None);
        assert_eq!(first.as_deref(), Some("Male"));
        let second = options.next_gender(first.as_deref());
        assert_eq!(second.as_deref(), Some("Female"));
        assert_eq!(options.next_gender(second.as_deref()), None);
        assert_eq!(options.next_gender(Some("Unknown")).as_deref(), Some("Male"));
    }
}
