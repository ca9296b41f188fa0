//! Single-page dashboard layout.
//!
//! ```text
//! ┌ header: title, record count, average billing ─────────────────────────┐
//! │ gender selector │ condition selector │ chart-style radio               │
//! │ billing slider track + marks                                           │
//! ├ age distribution ─────────────────┬ condition distribution ────────────┤
//! ├ insurance comparison ─────────────┼ billing distribution ──────────────┤
//! ├ admission trends ──────────────────────────────────────────────────────┤
//! └ key help ──────────────────────────────────────────────────────────────┘
//! ```

use dash_core::chart::Figure;
use dash_data::dataset::SummaryStats;
use dash_data::figures;
use dash_runtime::controls::{
    ControlOptions, Controls, CONDITION_PLACEHOLDER, GENDER_PLACEHOLDER,
};
use dash_runtime::dispatcher::FigureId;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

use crate::charts::render_figure;
use crate::components::controls::{Selector, SliderBar, StyleRadio};
use crate::components::header::Header;
use crate::themes::Theme;

pub const HELP: &str =
    "g gender · c condition · t chart type · ←/→ ceiling ±100 · [/] jump mark · q quit";

/// Everything the dashboard needs to draw one frame.
pub struct DashboardViewData<'a> {
    pub summary: SummaryStats,
    pub options: &'a ControlOptions,
    pub controls: &'a Controls,
    /// Latest figure per [`FigureId`], indexed by [`FigureId::index`].
    pub figures: &'a [Option<Figure>; 5],
}

/// Chart title for a figure slot.
pub fn figure_title(id: FigureId) -> &'static str {
    match id {
        FigureId::AgeDistribution => figures::AGE_TITLE,
        FigureId::ConditionDistribution => figures::CONDITION_TITLE,
        FigureId::InsuranceComparison => figures::INSURANCE_TITLE,
        FigureId::BillingDistribution => figures::BILLING_TITLE,
        FigureId::AdmissionTrends => figures::TRENDS_TITLE,
    }
}

/// Render the full dashboard into `area`.
pub fn render_dashboard(frame: &mut Frame, area: Rect, data: &DashboardViewData<'_>, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Header::new(data.summary, rows[0].width, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), rows[0]);

    render_controls(frame, rows[1], data, theme);
    render_charts(frame, rows[2], data, theme);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(HELP, theme.dim))),
        rows[3],
    );
}

fn render_controls(frame: &mut Frame, area: Rect, data: &DashboardViewData<'_>, theme: &Theme) {
    let gender = Selector {
        key: 'g',
        label: "Gender",
        placeholder: GENDER_PLACEHOLDER,
        value: data.controls.gender.as_deref(),
        theme,
    };
    let condition = Selector {
        key: 'c',
        label: "Condition",
        placeholder: CONDITION_PLACEHOLDER,
        value: data.controls.condition.as_deref(),
        theme,
    };
    let radio = StyleRadio {
        current: data.controls.chart_style,
        theme,
    };

    let mut first = gender.to_spans();
    first.push(Span::raw("    "));
    first.extend(condition.to_spans());
    first.push(Span::raw("    "));
    first.extend(radio.to_spans());

    // Leave room after the track for the " ≤ $123,456" value label.
    let track_width = area.width.saturating_sub(20).max(10);
    let slider = SliderBar {
        slider: &data.options.slider,
        value: data.controls.billing_ceiling,
        width: track_width,
        theme,
    };

    let mut track = vec![Span::styled("[←/→] ", theme.key_hint)];
    track.extend(slider.track_line().spans);
    let mut marks = vec![Span::raw("      ")];
    marks.extend(slider.marks_line().spans);

    let lines = vec![Line::from(first), Line::from(track), Line::from(marks)];
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn render_charts(frame: &mut Frame, area: Rect, data: &DashboardViewData<'_>, theme: &Theme) {
    let bands = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let pairs = [
        (FigureId::AgeDistribution, FigureId::ConditionDistribution),
        (FigureId::InsuranceComparison, FigureId::BillingDistribution),
    ];
    for (band, (left, right)) in bands.iter().zip(pairs) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*band);
        draw_slot(frame, cols[0], left, data, theme);
        draw_slot(frame, cols[1], right, data, theme);
    }
    draw_slot(frame, bands[2], FigureId::AdmissionTrends, data, theme);
}

fn draw_slot(frame: &mut Frame, area: Rect, id: FigureId, data: &DashboardViewData<'_>, theme: &Theme) {
    render_figure(
        frame,
        area,
        figure_title(id),
        data.figures[id.index()].as_ref(),
        theme,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
