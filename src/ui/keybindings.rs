// src/ui/keybindings.rs
//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent};

use crate::render::VisMode;

/// Actions derived from key events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Up,
    Down,
    Enter,
    Back,
    TogglePause,
    Stop,
    SelectMode(VisMode),
    CycleMode,
    SensitivityUp,
    SensitivityDown,
    Quit,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Enter | KeyCode::Right => Action::Enter,
        KeyCode::Left => Action::Back,
        KeyCode::Char(' ') => Action::TogglePause,
        KeyCode::Char('s') => Action::Stop,
        KeyCode::Char('v') => Action::CycleMode,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::SensitivityUp,
        KeyCode::Char('-') => Action::SensitivityDown,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(VisMode::from_digit)
            .map(Action::SelectMode)
            .unwrap_or(Action::None),
        _ => Action::None,
    }
}
