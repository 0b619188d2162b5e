// SPDX-License-Identifier: MIT
use num_format::{Locale, ToFormattedString};
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::api::types::render_value;
use crate::session::{RecordingSession, format_elapsed};
use crate::tui::theme::Theme;

/// Session counters plus the backend-computed statistics, echoed verbatim.
pub fn render(frame: &mut ratatui::Frame, area: Rect, session: &RecordingSession, _theme: &Theme) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    let current = session
        .current_value
        .map_or_else(|| "--".to_string(), |v| format!("{v:.2} mm"));

    let stats = &session.stats;
    let lines = vec![
        Line::from(format!(
            "Points:   {}",
            session.point_count().to_formatted_string(&Locale::en)
        )),
        Line::from(format!("Current:  {current}")),
        Line::from(format!("Elapsed:  {}", format_elapsed(session.elapsed))),
        Line::from(""),
        Line::from(format!("Mean:     {}", render_value(&stats.mean))),
        Line::from(format!("Min:      {}", render_value(&stats.min))),
        Line::from(format!("Max:      {}", render_value(&stats.max))),
        Line::from(format!("Std Dev:  {}", render_value(&stats.std))),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}
