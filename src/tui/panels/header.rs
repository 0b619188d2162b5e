// SPDX-License-Identifier: MIT
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::session::{RecordingSession, SyncBadge};
use crate::tui::theme::Theme;

/// Top status bar: identity, backend, session parameters.
pub fn render(
    frame: &mut ratatui::Frame,
    area: Rect,
    base_url: &str,
    port: &str,
    duration_secs: u64,
    theme: &Theme,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let version = env!("CARGO_PKG_VERSION");
    let text =
        format!("somnoscope v{version} | Backend: {base_url} | Port: {port} | Duration: {duration_secs}s");

    let line = Line::from(vec![Span::styled(
        format!("{text:<width$}", width = area.width as usize),
        theme.status_bar,
    )]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Bottom status line: recording indicator, sync badge, last message, keys.
pub fn render_status(
    frame: &mut ratatui::Frame,
    area: Rect,
    session: &RecordingSession,
    theme: &Theme,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let badge_style = match session.badge {
        SyncBadge::Waiting => theme.badge_waiting,
        SyncBadge::Syncing => theme.badge_syncing,
        SyncBadge::Synced => theme.badge_synced,
    };

    let mut spans = vec![
        if session.is_recording() {
            Span::styled("\u{25CF} REC", theme.recording_indicator)
        } else {
            Span::styled("idle", theme.badge_waiting)
        },
        Span::raw("  "),
        Span::styled(session.badge.label(), badge_style),
        Span::raw("  "),
    ];

    if let Some(err) = &session.last_error {
        spans.push(Span::styled(err.as_str(), theme.status_error));
    } else if let Some(status) = &session.status {
        spans.push(Span::styled(status.as_str(), theme.status_ok));
    }

    spans.push(Span::raw("  [s] start/stop  [q] quit"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
