// SPDX-License-Identifier: MIT
use ratatui::layout::Rect;
use ratatui::symbols;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};

use crate::api::types::LiveData;
use crate::tui::theme::Theme;

const SERIES_NAME: &str = "unwrapPhasePeak_mm";

/// Live signal chart. The whole series is redrawn each frame; the backend
/// re-sends it in full on every poll.
pub fn render(frame: &mut ratatui::Frame, area: Rect, live: &LiveData, theme: &Theme) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    if live.data_points.is_empty() {
        frame.render_widget(Paragraph::new("Waiting for data..."), area);
        return;
    }

    let points: Vec<(f64, f64)> = live.data_points.iter().map(|p| (p.time, p.value)).collect();
    let (x_min, x_max) = axis_bounds(points.iter().map(|p| p.0));
    let (y_min, y_max) = axis_bounds(points.iter().map(|p| p.1));

    let dataset = Dataset::default()
        .name(SERIES_NAME)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.chart_line)
        .data(&points);

    let x_axis = Axis::default()
        .style(theme.chart_axis)
        .bounds([x_min, x_max])
        .labels([format!("{x_min:.1}s"), format!("{x_max:.1}s")]);
    let y_axis = Axis::default()
        .style(theme.chart_axis)
        .bounds([y_min, y_max])
        .labels([format!("{y_min:.2}"), format!("{y_max:.2}")]);

    let chart = Chart::new(vec![dataset]).x_axis(x_axis).y_axis(y_axis);
    frame.render_widget(chart, area);
}

/// Min/max of a series, padded when degenerate so the axes never collapse.
fn axis_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_bounds_normal_range() {
        let (min, max) = axis_bounds([1.0, 3.5, 2.0].into_iter());
        assert!((min - 1.0).abs() < f64::EPSILON);
        assert!((max - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn axis_bounds_single_point_is_padded() {
        let (min, max) = axis_bounds([2.0].into_iter());
        assert!((min - 1.0).abs() < f64::EPSILON);
        assert!((max - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn axis_bounds_empty_defaults() {
        let (min, max) = axis_bounds(std::iter::empty());
        assert!(min.abs() < f64::EPSILON);
        assert!((max - 1.0).abs() < f64::EPSILON);
    }
}
