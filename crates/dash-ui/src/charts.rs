//! Draw [`Figure`]s with ratatui widgets.
//!
//! | Chart kind         | Widget                                        |
//! |--------------------|-----------------------------------------------|
//! | histogram          | `BarChart`, one group per bin, bar per series |
//! | pie                | proportional share bars in a `Paragraph`      |
//! | bar (grouped)      | `BarChart`, one group per category            |
//! | line               | `Chart` with a single line dataset            |
//!
//! Empty figures render a bordered placeholder.

use dash_core::chart::{ChartKind, ChartSpec, Figure};
use dash_core::formatting::{format_compact, percentage};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::{Line, Span, Text},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset as ChartDataset, GraphType,
        Paragraph,
    },
    Frame,
};

use crate::themes::Theme;

pub const NO_DATA: &str = "No data for the current selection";
pub const LOADING: &str = "Rendering…";

/// Render `figure` (or a loading placeholder when `None`) inside a bordered
/// block titled `title`.
pub fn render_figure(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    figure: Option<&Figure>,
    theme: &Theme,
) {
    let block = chart_block(title, theme);
    match figure {
        None => render_placeholder(frame, area, block, LOADING, theme),
        Some(Figure::Empty) => render_placeholder(frame, area, block, NO_DATA, theme),
        Some(Figure::Chart(spec)) => match spec.kind {
            ChartKind::Histogram | ChartKind::Bar => render_bars(frame, area, block, spec, theme),
            ChartKind::Pie => render_shares(frame, area, block, spec, theme),
            ChartKind::Line => render_line(frame, area, block, spec, theme),
        },
    }
}

fn chart_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.chart_border)
        .title(Span::styled(format!(" {title} "), theme.chart_title))
}

fn render_placeholder(frame: &mut Frame, area: Rect, block: Block<'_>, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.dim)),
    ];
    let paragraph = Paragraph::new(Text::from(text))
        .block(block)
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ── Bars ──────────────────────────────────────────────────────────────────────

/// Histograms and bar charts.  Each category becomes a bar group holding one
/// bar per series; a legend line is added when there are several series.
fn render_bars(frame: &mut Frame, area: Rect, block: Block<'_>, spec: &ChartSpec, theme: &Theme) {
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let (legend_area, chart_area) = split_legend(inner, spec.series.len() > 1);
    if let Some(legend_area) = legend_area {
        frame.render_widget(Paragraph::new(legend_line(spec, theme)), legend_area);
    }

    let series_count = spec.series.len().max(1);
    let groups = spec.categories.len().max(1);
    let (bar_width, bar_gap, group_gap) = bar_geometry(chart_area.width, groups, series_count);
    let colors = series_colors(spec, theme);

    let mut chart = BarChart::default()
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .group_gap(group_gap)
        .value_style(theme.text)
        .label_style(theme.axis);

    for (c, category) in spec.categories.iter().enumerate() {
        let bars: Vec<Bar> = spec
            .series
            .iter()
            .zip(&colors)
            .map(|(series, &color)| {
                let value = series.values.get(c).copied().unwrap_or(0.0);
                Bar::default()
                    .value(bar_value(value))
                    .text_value(format_compact(value))
                    .style(Style::default().fg(color))
            })
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(short_label(category, group_label_width(bar_width, series_count))))
                .bars(&bars),
        );
    }

    frame.render_widget(chart, chart_area);
}

/// Bar width, gap between bars of a group, and gap between groups that fit
/// `groups` groups of `series` bars into `width` columns.
pub fn bar_geometry(width: u16, groups: usize, series: usize) -> (u16, u16, u16) {
    let groups = groups.max(1) as u16;
    let series = series.max(1) as u16;
    let group_gap = 1;
    let available = width.saturating_sub(group_gap * groups.saturating_sub(1));
    let per_group = available / groups;
    let bar_width = (per_group / series).max(1);
    (bar_width, 0, group_gap)
}

fn group_label_width(bar_width: u16, series: usize) -> usize {
    (bar_width as usize * series.max(1)).max(1)
}

/// Histogram counts and billing totals are non-negative; fractional parts are
/// rounded for the bar height only.
fn bar_value(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

// ── Shares ────────────────────────────────────────────────────────────────────

/// Proportion chart: one row per category with a bar sized to its share.
fn render_shares(frame: &mut Frame, area: Rect, block: Block<'_>, spec: &ChartSpec, theme: &Theme) {
    let inner = block.inner(area);
    let lines = share_lines(spec, inner.width, theme);
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

/// `name  ████░░░░  42.0%` for each category, names padded to a common width.
pub fn share_lines<'a>(spec: &ChartSpec, width: u16, theme: &Theme) -> Vec<Line<'a>> {
    let Some(series) = spec.series.first() else {
        return Vec::new();
    };
    let total = series.total();
    let name_width = spec
        .categories
        .iter()
        .map(|c| unicode_width::UnicodeWidthStr::width(c.as_str()))
        .max()
        .unwrap_or(0)
        .min(24);
    let bar_width = (width as usize).saturating_sub(name_width + 10).max(1);

    spec.categories
        .iter()
        .zip(&series.values)
        .enumerate()
        .map(|(i, (name, &value))| {
            let pct = percentage(value, total, 1);
            let filled = ((pct / 100.0) * bar_width as f64).round() as usize;
            let color = theme.series_color(None, i, spec.categories.len());
            Line::from(vec![
                Span::styled(
                    format!("{:<w$} ", short_label(name, name_width), w = name_width),
                    theme.label,
                ),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::styled(
                    "░".repeat(bar_width.saturating_sub(filled)),
                    theme.slider_empty,
                ),
                Span::styled(format!(" {pct:>5.1}%"), theme.value),
            ])
        })
        .collect()
}

// ── Line ──────────────────────────────────────────────────────────────────────

fn render_line(frame: &mut Frame, area: Rect, block: Block<'_>, spec: &ChartSpec, theme: &Theme) {
    let colors = series_colors(spec, theme);
    let points: Vec<Vec<(f64, f64)>> = spec
        .series
        .iter()
        .map(|s| {
            s.values
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v))
                .collect()
        })
        .collect();

    let datasets: Vec<ChartDataset> = spec
        .series
        .iter()
        .zip(&points)
        .zip(&colors)
        .map(|((series, data), &color)| {
            ChartDataset::default()
                .name(series.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(data)
        })
        .collect();

    let x_max = spec.categories.len().saturating_sub(1).max(1) as f64;
    let y_max = (spec.max_value() * 1.1).max(1.0);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled(spec.x_label.clone(), theme.axis))
                .style(theme.axis)
                .bounds([0.0, x_max])
                .labels(x_axis_labels(&spec.categories)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(spec.y_label.clone(), theme.axis))
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(vec![
                    "0".to_string(),
                    format_compact(y_max / 2.0),
                    format_compact(y_max),
                ]),
        );
    frame.render_widget(chart, area);
}

/// First, middle and last category labels.
pub fn x_axis_labels(categories: &[String]) -> Vec<String> {
    match categories {
        [] => Vec::new(),
        [only] => vec![only.clone()],
        [first, last] => vec![first.clone(), last.clone()],
        _ => vec![
            categories[0].clone(),
            categories[categories.len() / 2].clone(),
            categories[categories.len() - 1].clone(),
        ],
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn series_colors(spec: &ChartSpec, theme: &Theme) -> Vec<Color> {
    let count = spec.series.len();
    spec.series
        .iter()
        .enumerate()
        .map(|(i, s)| theme.series_color(s.color.as_deref(), i, count))
        .collect()
}

fn legend_line<'a>(spec: &ChartSpec, theme: &Theme) -> Line<'a> {
    let colors = series_colors(spec, theme);
    let mut spans = Vec::new();
    for (series, color) in spec.series.iter().zip(colors) {
        spans.push(Span::styled("■ ", Style::default().fg(color)));
        spans.push(Span::styled(format!("{}  ", series.name), theme.label));
    }
    Line::from(spans)
}

fn split_legend(area: Rect, with_legend: bool) -> (Option<Rect>, Rect) {
    if !with_legend || area.height < 3 {
        return (None, area);
    }
    let legend = Rect { height: 1, ..area };
    let rest = Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    };
    (Some(legend), rest)
}

/// Truncate `label` to `max` display columns, marking the cut with `…`.
pub fn short_label(label: &str, max: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if unicode_width::UnicodeWidthStr::width(label) <= max {
        return label.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
