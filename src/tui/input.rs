// SPDX-License-Identifier: MIT
use crossterm::event::KeyCode;

pub enum Action {
    Quit,
    ToggleRecording,
    PanelUp,
    PanelDown,
    ToggleCollapse,
    None,
}

pub fn handle_key(key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('s' | ' ') => Action::ToggleRecording,
        KeyCode::Up => Action::PanelUp,
        KeyCode::Down => Action::PanelDown,
        KeyCode::Right => Action::ToggleCollapse,
        _ => Action::None,
    }
}
