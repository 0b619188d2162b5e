// SPDX-License-Identifier: MIT
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub chart_line: Style,
    pub chart_axis: Style,
    pub badge_waiting: Style,
    pub badge_syncing: Style,
    pub badge_synced: Style,
    pub recording_indicator: Style,
    pub border_normal: Style,
    pub border_selected: Style,
    pub title: Style,
    pub status_bar: Style,
    pub status_ok: Style,
    pub status_error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            chart_line: Style::default().fg(Color::Cyan),
            chart_axis: Style::default().fg(Color::DarkGray),
            badge_waiting: Style::default().fg(Color::DarkGray),
            badge_syncing: Style::default().fg(Color::Yellow),
            badge_synced: Style::default().fg(Color::Green),
            recording_indicator: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            border_normal: Style::default().fg(Color::White),
            border_selected: Style::default().fg(Color::Cyan),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            status_bar: Style::default().fg(Color::Black).bg(Color::White),
            status_ok: Style::default().fg(Color::Green),
            status_error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

pub const SELECTED_MARKER: [char; 2] = ['\u{2610}', '\u{2611}'];
pub const COLLAPSED_MARKER: [char; 2] = ['\u{25BC}', '\u{25BA}'];
