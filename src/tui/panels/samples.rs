// SPDX-License-Identifier: MIT
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Paragraph, Row, Table};

use crate::session::RecordingSession;
use crate::tui::theme::Theme;

/// Most recent samples, newest at the bottom.
pub fn render(frame: &mut ratatui::Frame, area: Rect, session: &RecordingSession, theme: &Theme) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    if session.point_count() == 0 {
        frame.render_widget(Paragraph::new("Waiting for data..."), area);
        return;
    }

    let rows: Vec<Row> = session
        .recent_points()
        .iter()
        .map(|p| Row::new(vec![format!("{:.3}", p.time), format!("{:.2}", p.value)]))
        .collect();

    let table = Table::new(rows, [Constraint::Length(12), Constraint::Length(12)])
        .header(Row::new(vec!["time (s)", "value (mm)"]).style(theme.title));

    frame.render_widget(table, area);
}
