//! Reactive binding between controls and figures.
//!
//! Each [`FigureId`] declares the controls it reads.  When a control changes,
//! the [`Dispatcher`] re-runs exactly the figures subscribed to it.

use std::collections::HashMap;
use std::sync::Arc;

use dash_core::chart::Figure;
use dash_data::dataset::Dataset;
use dash_data::figures;
use serde::Serialize;
use tracing::debug;

use crate::controls::{ControlChange, ControlId, Controls};

// ── FigureId ──────────────────────────────────────────────────────────────────

/// The five dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureId {
    AgeDistribution,
    ConditionDistribution,
    InsuranceComparison,
    BillingDistribution,
    AdmissionTrends,
}

impl FigureId {
    pub const ALL: [FigureId; 5] = [
        FigureId::AgeDistribution,
        FigureId::ConditionDistribution,
        FigureId::InsuranceComparison,
        FigureId::BillingDistribution,
        FigureId::AdmissionTrends,
    ];

    /// Controls this figure reads.
    pub fn inputs(self) -> &'static [ControlId] {
        match self {
            FigureId::AgeDistribution
            | FigureId::ConditionDistribution
            | FigureId::InsuranceComparison => &[ControlId::Gender],
            FigureId::BillingDistribution => &[ControlId::Gender, ControlId::BillingCeiling],
            FigureId::AdmissionTrends => &[ControlId::ChartStyle, ControlId::Condition],
        }
    }

    /// Run the figure function against the current control values.
    pub fn render(self, dataset: &Dataset, controls: &Controls) -> Figure {
        let gender = controls.gender.as_deref();
        match self {
            FigureId::AgeDistribution => figures::age_distribution(dataset, gender),
            FigureId::ConditionDistribution => figures::condition_distribution(dataset, gender),
            FigureId::InsuranceComparison => figures::insurance_comparison(dataset, gender),
            FigureId::BillingDistribution => {
                figures::billing_distribution(dataset, gender, controls.billing_ceiling)
            }
            FigureId::AdmissionTrends => figures::admission_trends(
                dataset,
                controls.chart_style,
                controls.condition.as_deref(),
            ),
        }
    }

    /// Position in [`FigureId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Owns the control state and routes changes to subscribed figures.
#[derive(Debug)]
pub struct Dispatcher {
    dataset: Arc<Dataset>,
    controls: Controls,
    subscriptions: HashMap<ControlId, Vec<FigureId>>,
}

impl Dispatcher {
    pub fn new(dataset: Arc<Dataset>, controls: Controls) -> Self {
        let mut subscriptions: HashMap<ControlId, Vec<FigureId>> = HashMap::new();
        for figure in FigureId::ALL {
            for &control in figure.inputs() {
                subscriptions.entry(control).or_default().push(figure);
            }
        }
        Self {
            dataset,
            controls,
            subscriptions,
        }
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Figures subscribed to `control`, in dashboard order.
    pub fn subscribers(&self, control: ControlId) -> &[FigureId] {
        self.subscriptions
            .get(&control)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Render every figure with the current controls.
    pub fn render_all(&self) -> Vec<(FigureId, Figure)> {
        FigureId::ALL
            .iter()
            .map(|&id| (id, id.render(&self.dataset, &self.controls)))
            .collect()
    }

    /// Apply `change` and re-run the figures that read it.  Setting a control
    /// to its current value re-runs nothing.
    pub fn apply(&mut self, change: ControlChange) -> Vec<(FigureId, Figure)> {
        let control = change.control();
        if !self.controls.apply(change) {
            debug!(?control, "control unchanged; nothing to re-render");
            return Vec::new();
        }

        let affected = self.subscribers(control).to_vec();
        debug!(?control, figures = ?affected, "re-rendering subscribed figures");
        affected
            .into_iter()
            .map(|id| (id, id.render(&self.dataset, &self.controls)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dash_core::chart::ChartStyle;
    use dash_core::models::{Record, YearMonth};

    fn make_record(gender: &str, condition: &str, billing: f64, month: u32) -> Record {
        let date = NaiveDate::from_ymd_opt(2024, month, 1);
        Record {
            gender: gender.to_string(),
            age: Some(20 + month),
            medical_condition: condition.to_string(),
            insurance_provider: "Aetna".to_string(),
            billing_amount: Some(billing),
            admission_date: date,
            year_month: date.map(YearMonth::from_date),
        }
    }

    fn dispatcher() -> Dispatcher {
        let dataset = Dataset::new(vec![
            make_record("Male", "Flu", 100.0, 1),
            make_record("Female", "Flu", 200.0, 1),
            make_record("Female", "Diabetes", 300.0, 2),
        ]);
        let controls = Controls {
            gender: None,
            billing_ceiling: 200.0,
            condition: None,
            chart_style: ChartStyle::Line,
        };
        Dispatcher::new(Arc::new(dataset), controls)
    }

    fn ids(updates: &[(FigureId, Figure)]) -> Vec<FigureId> {
        updates.iter().map(|(id, _)| *id).collect()
    }

    #[test]
    fn test_render_all_produces_every_figure() {
        let d = dispatcher();
        let all = d.render_all();
        assert_eq!(ids(&all), FigureId::ALL.to_vec());
        assert!(all.iter().all(|(_, fig)| !fig.is_empty()));
    }

    #[test]
    fn test_gender_change_reruns_gender_figures() {
        let mut d = dispatcher();
        let updates = d.apply(ControlChange::Gender(Some("Female".into())));
        assert_eq!(
            ids(&updates),
            vec![
                FigureId::AgeDistribution,
                FigureId::ConditionDistribution,
                FigureId::InsuranceComparison,
                FigureId::BillingDistribution,
            ]
        );
        for (_, fig) in &updates[..3] {
            assert_eq!(fig.row_count(), 2);
        }
        assert_eq!(updates[3].1.row_count(), 1);
    }

    #[test]
    fn test_ceiling_change_reruns_billing_only() {
        let mut d = dispatcher();
        let updates = d.apply(ControlChange::BillingCeiling(300.0));
        assert_eq!(ids(&updates), vec![FigureId::BillingDistribution]);
        assert_eq!(updates[0].1.row_count(), 3);
    }

    #[test]
    fn test_style_and_condition_rerun_trends_only() {
        let mut d = dispatcher();
        let updates = d.apply(ControlChange::ChartStyle(ChartStyle::Bar));
        assert_eq!(ids(&updates), vec![FigureId::AdmissionTrends]);

        let updates = d.apply(ControlChange::Condition(Some("Diabetes".into())));
        assert_eq!(ids(&updates), vec![FigureId::AdmissionTrends]);
        assert_eq!(updates[0].1.row_count(), 1);
    }

    #[test]
    fn test_unchanged_value_reruns_nothing() {
        let mut d = dispatcher();
        assert!(d.apply(ControlChange::Gender(None)).is_empty());
        assert!(d.apply(ControlChange::BillingCeiling(200.0)).is_empty());
        assert!(d.apply(ControlChange::ChartStyle(ChartStyle::Line)).is_empty());
        assert!(d.apply(ControlChange::Condition(None)).is_empty());
    }

    #[test]
    fn test_subscriptions_match_declared_inputs() {
        let d = dispatcher();
        for control in [
            ControlId::Gender,
            ControlId::BillingCeiling,
            ControlId::Condition,
            ControlId::ChartStyle,
        ] {
            let expected: Vec<FigureId> = FigureId::ALL
                .into_iter()
                .filter(|f| f.inputs().contains(&control))
                .collect();
            assert_eq!(d.subscribers(control), expected.as_slice());
        }
    }

    #[test]
    fn test_controls_tracked_after_apply() {
        let mut d = dispatcher();
        d.apply(ControlChange::Gender(Some("Male".into())));
        assert_eq!(d.controls().gender.as_deref(), Some("Male"));
        assert_eq!(d.dataset().len(), 3);
    }

    #[test]
    fn test_figure_index_matches_order() {
        for (i, id) in FigureId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }
}
