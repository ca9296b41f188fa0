//! Chart specifications handed to the presentation layer.
//!
//! A [`ChartSpec`] is a renderer-agnostic description of one chart: its kind,
//! titles, the x-axis categories and one or more value series aligned with
//! those categories.  The TUI draws it with ratatui widgets; `--export` writes
//! it out as JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Colour sequence for the age histogram's gender partition.
pub const GENDER_COLORS: &[&str] = &["#2c9ace", "#E64199"];

/// Qualitative "Set2" palette used for the insurance comparison.
pub const SET2_COLORS: &[&str] = &[
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

/// Pick the `index`-th colour from `palette`, cycling when it runs out.
pub fn palette_color(palette: &[&str], index: usize) -> Option<String> {
    if palette.is_empty() {
        return None;
    }
    Some(palette[index % palette.len()].to_string())
}

/// The kind of chart a specification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Histogram,
    Pie,
    Bar,
    Line,
}

/// How multiple bar series sharing a category are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    Group,
    Stack,
}

/// The "chart type" radio control for the admission-trends figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    #[default]
    Line,
    Bar,
}

impl ChartStyle {
    /// Radio-button label.
    pub fn label(self) -> &'static str {
        match self {
            ChartStyle::Line => "line chart",
            ChartStyle::Bar => "bar chart",
        }
    }

    /// The other variant.
    pub fn toggled(self) -> Self {
        match self {
            ChartStyle::Line => ChartStyle::Bar,
            ChartStyle::Bar => ChartStyle::Line,
        }
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartStyle::Line => f.write_str("line"),
            ChartStyle::Bar => f.write_str("bar"),
        }
    }
}

impl FromStr for ChartStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(ChartStyle::Line),
            "bar" => Ok(ChartStyle::Bar),
            other => Err(format!("unknown chart style: {other}")),
        }
    }
}

/// One named series of values aligned with [`ChartSpec::categories`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub values: Vec<f64>,
}

impl Series {
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Renderer-agnostic chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// X-axis categories (bin labels, slice names, providers, month buckets).
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
    /// Histogram bin edges; `categories.len() + 1` entries when present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bin_edges: Vec<f64>,
    /// Number of source rows that contributed to the chart.
    pub row_count: usize,
}

impl ChartSpec {
    /// Largest single value across every series (0 when there is none).
    pub fn max_value(&self) -> f64 {
        self.series.iter().map(Series::max).fold(0.0, f64::max)
    }
}

/// Result of a figure function: a chart, or an explicit "nothing to render".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "chart", rename_all = "snake_case")]
pub enum Figure {
    Chart(ChartSpec),
    Empty,
}

impl Figure {
    pub fn is_empty(&self) -> bool {
        matches!(self, Figure::Empty)
    }

    pub fn chart(&self) -> Option<&ChartSpec> {
        match self {
            Figure::Chart(spec) => Some(spec),
            Figure::Empty => None,
        }
    }

    /// Rows behind the chart; 0 for an empty figure.
    pub fn row_count(&self) -> usize {
        self.chart().map_or(0, |c| c.row_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Bar,
            title: "t".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            categories: vec!["a".to_string(), "b".to_string()],
            series: vec![
                Series {
                    name: "one".to_string(),
                    color: None,
                    values: vec![1.0, 5.0],
                },
                Series {
                    name: "two".to_string(),
                    color: Some("#fff".to_string()),
                    values: vec![3.0, 2.0],
                },
            ],
            bar_mode: Some(BarMode::Group),
            bin_edges: Vec::new(),
            row_count: 4,
        }
    }

    #[test]
    fn test_chart_style_parse_and_display() {
        assert_eq!("line".parse::<ChartStyle>(), Ok(ChartStyle::Line));
        assert_eq!(" BAR ".parse::<ChartStyle>(), Ok(ChartStyle::Bar));
        assert!("pie".parse::<ChartStyle>().is_err());
        assert_eq!(ChartStyle::Bar.to_string(), "bar");
        assert_eq!(ChartStyle::Line.label(), "line chart");
    }

    #[test]
    fn test_chart_style_toggle() {
        assert_eq!(ChartStyle::Line.toggled(), ChartStyle::Bar);
        assert_eq!(ChartStyle::Bar.toggled().toggled(), ChartStyle::Bar);
        assert_eq!(ChartStyle::default(), ChartStyle::Line);
    }

    #[test]
    fn test_palette_color_cycles() {
        assert_eq!(palette_color(GENDER_COLORS, 0).as_deref(), Some("#2c9ace"));
        assert_eq!(palette_color(GENDER_COLORS, 1).as_deref(), Some("#E64199"));
        assert_eq!(palette_color(GENDER_COLORS, 2).as_deref(), Some("#2c9ace"));
        assert!(palette_color(&[], 0).is_none());
    }

    #[test]
    fn test_max_value_across_series() {
        assert_eq!(spec().max_value(), 5.0);
        assert_eq!(spec().series[1].total(), 5.0);
    }

    #[test]
    fn test_figure_accessors() {
        let fig = Figure::Chart(spec());
        assert!(!fig.is_empty());
        assert_eq!(fig.row_count(), 4);
        assert!(Figure::Empty.is_empty());
        assert_eq!(Figure::Empty.row_count(), 0);
        assert!(Figure::Empty.chart().is_none());
    }

    #[test]
    fn test_figure_serializes_with_status_tag() {
        let json = serde_json::to_value(Figure::Empty).unwrap();
        assert_eq!(json["status"], "empty");

        let json = serde_json::to_value(Figure::Chart(spec())).unwrap();
        assert_eq!(json["status"], "chart");
        assert_eq!(json["chart"]["kind"], "bar");
        assert_eq!(json["chart"]["bar_mode"], "group");
        // Empty bin edges and absent colours are omitted.
        assert!(json["chart"].get("bin_edges").is_none());
        assert!(json["chart"]["series"][0].get("color").is_none());
    }
}
