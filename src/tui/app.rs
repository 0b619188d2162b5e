// SPDX-License-Identifier: MIT
use std::time::Instant;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use super::input::Action;
use super::panels::{chart, header, samples, stats};
use super::theme::{COLLAPSED_MARKER, SELECTED_MARKER, Theme};
use crate::api::client::RadarApi;
use crate::session::RecordingSession;

pub struct PanelState {
    pub name: &'static str,
    pub collapsed: bool,
    pub min_height: u16,
}

fn build_layout(panels: &[PanelState], area: Rect) -> Vec<Rect> {
    let constraints: Vec<Constraint> = panels
        .iter()
        .map(|p| {
            if p.collapsed {
                Constraint::Length(3)
            } else {
                Constraint::Min(p.min_height)
            }
        })
        .collect();

    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

/// Dashboard state for the `monitor` subcommand: the recording session plus
/// panel navigation. All backend interaction goes through the injected
/// [`RadarApi`].
pub struct App {
    pub panels: Vec<PanelState>,
    pub selected_panel: usize,
    pub session: RecordingSession,
    pub base_url: String,
    pub port: String,
    pub duration_secs: u64,
    pub should_quit: bool,
    pub theme: Theme,
}

impl App {
    #[must_use]
    pub fn new(base_url: String, port: String, duration_secs: u64) -> Self {
        let panels = vec![
            PanelState {
                name: "Live Signal",
                collapsed: false,
                min_height: 12,
            },
            PanelState {
                name: "Statistics",
                collapsed: false,
                min_height: 10,
            },
            PanelState {
                name: "Recent Samples",
                collapsed: false,
                min_height: 13,
            },
        ];

        Self {
            panels,
            selected_panel: 0,
            session: RecordingSession::new(),
            base_url,
            port,
            duration_secs,
            should_quit: false,
            theme: Theme::default(),
        }
    }

    pub fn handle_action(&mut self, action: &Action) {
        match *action {
            Action::Quit => self.should_quit = true,
            Action::PanelUp => {
                if self.selected_panel > 0 {
                    self.selected_panel -= 1;
                }
            }
            Action::PanelDown => {
                if self.selected_panel + 1 < self.panels.len() {
                    self.selected_panel += 1;
                }
            }
            Action::ToggleCollapse => {
                if let Some(panel) = self.panels.get_mut(self.selected_panel) {
                    panel.collapsed = !panel.collapsed;
                }
            }
            Action::ToggleRecording | Action::None => {}
        }
    }

    /// The start/stop key. Errors from either transition are surfaced in
    /// the status line rather than tearing the dashboard down.
    pub fn toggle_recording(&mut self, api: &dyn RadarApi, now: Instant) {
        let result = if self.session.is_recording() {
            self.session.stop(api)
        } else {
            self.session.start(api, &self.port, self.duration_secs, now)
        };

        if let Err(err) = result {
            self.session.last_error = Some(err.to_string());
        }
    }

    pub fn render(&self, frame: &mut ratatui::Frame) {
        let outer = frame.area();
        if outer.height < 3 || outer.width < 5 {
            return;
        }

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(outer);

        header::render(
            frame,
            vertical[0],
            &self.base_url,
            &self.port,
            self.duration_secs,
            &self.theme,
        );
        header::render_status(frame, vertical[2], &self.session, &self.theme);

        let areas = build_layout(&self.panels, vertical[1]);

        for (i, (panel, area)) in self.panels.iter().zip(areas.iter()).enumerate() {
            let is_selected = i == self.selected_panel;

            let sel_mark = if is_selected {
                SELECTED_MARKER[1]
            } else {
                SELECTED_MARKER[0]
            };
            let col_mark = if panel.collapsed {
                COLLAPSED_MARKER[1]
            } else {
                COLLAPSED_MARKER[0]
            };

            let title = format!("{sel_mark} {col_mark} {}", panel.name);

            let border_style = if is_selected {
                self.theme.border_selected
            } else {
                self.theme.border_normal
            };

            let block = Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style)
                .title_style(self.theme.title);

            if panel.collapsed {
                frame.render_widget(block, *area);
                continue;
            }

            let inner = block.inner(*area);
            frame.render_widget(block, *area);

            if inner.width < 2 || inner.height < 1 {
                continue;
            }

            match i {
                0 => chart::render(frame, inner, &self.session.live, &self.theme),
                1 => stats::render(frame, inner, &self.session, &self.theme),
                _ => samples::render(frame, inner, &self.session, &self.theme),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(
            "http://127.0.0.1:5000".to_string(),
            "COM14".to_string(),
            60,
        )
    }

    #[test]
    fn panel_navigation_clamps() {
        let mut app = app();
        app.handle_action(&Action::PanelUp);
        assert_eq!(app.selected_panel, 0);
        app.handle_action(&Action::PanelDown);
        app.handle_action(&Action::PanelDown);
        app.handle_action(&Action::PanelDown);
        assert_eq!(app.selected_panel, 2);
    }

    #[test]
    fn collapse_toggles_selected_panel() {
        let mut app = app();
        app.handle_action(&Action::ToggleCollapse);
        assert!(app.panels[0].collapsed);
        app.handle_action(&Action::ToggleCollapse);
        assert!(!app.panels[0].collapsed);
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = app();
        app.handle_action(&Action::Quit);
        assert!(app.should_quit);
    }
}
