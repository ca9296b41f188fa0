//! Control widgets: the two dropdown selectors, the chart-style radio and the
//! billing-ceiling slider with its quantile marks.

use dash_core::chart::ChartStyle;
use dash_core::formatting::format_whole_dollars;
use dash_runtime::controls::BillingSlider;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

// ── Selector ─────────────────────────────────────────────────────────────────

/// A single-choice selector that shows its placeholder while unset.
pub struct Selector<'a> {
    pub key: char,
    pub label: &'a str,
    pub placeholder: &'a str,
    pub value: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> Selector<'a> {
    pub fn to_spans(&self) -> Vec<Span<'a>> {
        let value = match self.value {
            Some(v) => Span::styled(v, self.theme.selected),
            None => Span::styled(self.placeholder, self.theme.placeholder),
        };
        vec![
            Span::styled(format!("[{}] ", self.key), self.theme.key_hint),
            Span::styled(format!("{}: ", self.label), self.theme.label),
            value,
        ]
    }
}

// ── StyleRadio ───────────────────────────────────────────────────────────────

/// The line/bar radio for the admission-trends chart.
pub struct StyleRadio<'a> {
    pub current: ChartStyle,
    pub theme: &'a Theme,
}

impl<'a> StyleRadio<'a> {
    pub fn to_spans(&self) -> Vec<Span<'a>> {
        let mut spans = vec![Span::styled("[t] ", self.theme.key_hint)];
        for (i, style) in [ChartStyle::Line, ChartStyle::Bar].into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            if style == self.current {
                spans.push(Span::styled(format!("(•) {}", style.label()), self.theme.selected));
            } else {
                spans.push(Span::styled(format!("( ) {}", style.label()), self.theme.text));
            }
        }
        spans
    }
}

// ── SliderBar ────────────────────────────────────────────────────────────────

/// The billing-ceiling slider: a track line with the current value, and a
/// line of mark labels positioned under the track.
pub struct SliderBar<'a> {
    pub slider: &'a BillingSlider,
    pub value: f64,
    /// Width of the track in columns.
    pub width: u16,
    pub theme: &'a Theme,
}

impl<'a> SliderBar<'a> {
    pub const FILLED: char = '━';
    pub const EMPTY: char = '─';
    pub const KNOB: char = '●';

    fn column(&self, value: f64) -> usize {
        let last = self.width.saturating_sub(1) as f64;
        (self.slider.ratio(value) * last).round() as usize
    }

    /// Track line: filled part, knob, remaining track, then the value.
    pub fn track_line(&self) -> Line<'a> {
        let width = self.width as usize;
        let knob = self.column(self.value).min(width.saturating_sub(1));
        let filled: String = std::iter::repeat(Self::FILLED).take(knob).collect();
        let empty: String = std::iter::repeat(Self::EMPTY)
            .take(width.saturating_sub(knob + 1))
            .collect();

        Line::from(vec![
            Span::styled(filled, self.theme.slider_fill),
            Span::styled(Self::KNOB.to_string(), self.theme.selected),
            Span::styled(empty, self.theme.slider_empty),
            Span::styled(
                format!(" ≤ {}", format_whole_dollars(self.value)),
                self.theme.value,
            ),
        ])
    }

    /// Mark labels placed at their slider positions.  A label that would
    /// overlap the previous one is dropped.
    pub fn marks_line(&self) -> Line<'a> {
        let width = self.width as usize;
        let mut out = String::new();
        let mut cursor = 0usize;

        for (&key, label) in &self.slider.marks {
            let label_width = UnicodeWidthStr::width(label.as_str());
            let centre = self.column(key as f64);
            let start = centre
                .saturating_sub(label_width / 2)
                .min(width.saturating_sub(label_width));
            if start < cursor || start + label_width > width.max(label_width) {
                continue;
            }
            out.push_str(&" ".repeat(start - cursor));
            out.push_str(label);
            cursor = start + label_width + 1;
            out.push(' ');
        }

        Line::from(Span::styled(out.trim_end().to_string(), self.theme.slider_mark))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
