use std::time::Duration;

use ratatui::{
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

/// Compute X (seconds) and Y upper bounds for a time-series chart.
/// Both are at least 1 so an empty or flat series still draws an axis.
pub fn compute_chart_params(points: &[(f64, f64)]) -> (f64, f64) {
    let highest = points.iter().map(|&(_, y)| y).fold(0.0_f64, f64::max);

    let overall_duration = points.last().map(|p| p.0).unwrap_or(1.0).max(1.0);

    (overall_duration, highest.ceil().max(1.0))
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

/// Compact human duration, e.g. `42s` or `3m 07s`
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    match (secs / 3600, (secs / 60) % 60, secs % 60) {
        (0, 0, s) => format!("{s}s"),
        (0, m, s) => format!("{m}m {s:02}s"),
        (h, m, s) => format!("{h}h {m:02}m {s:02}s"),
    }
}

/// One line series against elapsed seconds
pub struct SeriesChart<'a> {
    pub title: &'a str,
    pub name: &'a str,
    pub y_title: &'a str,
    pub color: Color,
    pub points: &'a [(f64, f64)],
}

impl<'a> SeriesChart<'a> {
    pub fn build(self) -> Chart<'a> {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let (overall_duration, highest) = compute_chart_params(self.points);

        let datasets = vec![Dataset::default()
            .name(self.name)
            .marker(Marker::Braille)
            .style(Style::default().fg(self.color))
            .graph_type(GraphType::Line)
            .data(self.points)];

        Chart::new(datasets)
            .block(Block::default().borders(Borders::ALL).title(self.title))
            .x_axis(
                Axis::default()
                    .title("Time (s)")
                    .bounds([0.0, overall_duration])
                    .labels(vec![
                        Span::styled("0", bold_style),
                        Span::styled(format_label(overall_duration), bold_style),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title(self.y_title)
                    .bounds([0.0, highest])
                    .labels(vec![
                        Span::styled("0", bold_style),
                        Span::styled(format_label(highest), bold_style),
                    ]),
            )
    }
}
