use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// ANSI fallback palette for series without an explicit colour, and for the
/// classic theme which ignores hex colours.
const ANSI_SERIES: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Red,
];

/// Complete theme definition carrying every style used by the dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,
    pub error: Style,

    // ── Controls ─────────────────────────────────────────────────────────────
    /// Key hint such as `[g]`.
    pub key_hint: Style,
    /// Selector showing its placeholder.
    pub placeholder: Style,
    /// Selected radio option or chosen selector value.
    pub selected: Style,
    pub slider_fill: Style,
    pub slider_empty: Style,
    pub slider_mark: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_border: Style,
    pub chart_title: Style,
    pub axis: Style,
    /// Series colour when the chart does not specify one.
    pub series_default: Color,
    /// Whether hex colours from chart specifications are honoured.
    pub true_color: bool,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),

            key_hint: Style::default().fg(Color::Yellow),
            placeholder: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            selected: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            slider_fill: Style::default().fg(Color::Cyan),
            slider_empty: Style::default().fg(Color::DarkGray),
            slider_mark: Style::default().fg(Color::Gray),

            chart_border: Style::default().fg(Color::DarkGray),
            chart_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            axis: Style::default().fg(Color::Gray),
            series_default: Color::Cyan,
            true_color: true,
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),

            key_hint: Style::default().fg(Color::Magenta),
            placeholder: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            selected: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            slider_fill: Style::default().fg(Color::Blue),
            slider_empty: Style::default().fg(Color::Gray),
            slider_mark: Style::default().fg(Color::DarkGray),

            chart_border: Style::default().fg(Color::Gray),
            chart_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            axis: Style::default().fg(Color::DarkGray),
            series_default: Color::Blue,
            true_color: true,
        }
    }

    /// Classic theme using only the basic ANSI palette and no modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),
            error: Style::default().fg(Color::Red),

            key_hint: Style::default().fg(Color::Yellow),
            placeholder: Style::default().fg(Color::DarkGray),
            selected: Style::default().fg(Color::Cyan),
            slider_fill: Style::default().fg(Color::Green),
            slider_empty: Style::default().fg(Color::DarkGray),
            slider_mark: Style::default().fg(Color::White),

            chart_border: Style::default().fg(Color::DarkGray),
            chart_title: Style::default().fg(Color::White),
            axis: Style::default().fg(Color::Gray),
            series_default: Color::Green,
            true_color: false,
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Terminal colour for the `index`-th series.
    ///
    /// A hex colour from the chart specification is used when the theme
    /// supports it; otherwise single-series charts take `series_default` and
    /// multi-series charts cycle through the ANSI palette.
    pub fn series_color(&self, hex: Option<&str>, index: usize, series_count: usize) -> Color {
        if self.true_color {
            if let Some(color) = hex.and_then(|h| h.parse::<Color>().ok()) {
                return color;
            }
        }
        if series_count <= 1 {
            self.series_default
        } else {
            ANSI_SERIES[index % ANSI_SERIES.len()]
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
