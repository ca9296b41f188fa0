use crate::themes::Theme;
use dash_core::formatting::format_currency;
use dash_data::dataset::SummaryStats;
use ratatui::text::{Line, Span};

pub const TITLE: &str = "Healthcare Dashboard";

/// Dashboard header rendering three lines:
///
/// 1. The dashboard title.
/// 2. `Total Records: N  |  Average Billing: $x,xxx.xx`.
/// 3. A separator as wide as the requested width.
pub struct Header<'a> {
    pub summary: SummaryStats,
    pub width: u16,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(summary: SummaryStats, width: u16, theme: &'a Theme) -> Self {
        Self {
            summary,
            width,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(TITLE, self.theme.header)),
            Line::from(vec![
                Span::styled("Total Records: ", self.theme.label),
                Span::styled(self.summary.record_count.to_string(), self.theme.value),
                Span::styled("  |  ", self.theme.separator),
                Span::styled("Average Billing: ", self.theme.label),
                Span::styled(format_currency(self.summary.average_billing), self.theme.value),
            ]),
            Line::from(Span::styled(
                "─".repeat(self.width as usize),
                self.theme.separator,
            )),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
