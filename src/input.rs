//! Terminal events to game actions

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::sim::Input;

/// What the frame loop should do with one terminal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Game(Input),
    Quit,
    /// New terminal size in columns and rows
    Resize(u16, u16),
}

/// Map an event to an action. Unbound keys, key releases and repeats map
/// to `None`.
pub fn map_event(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some(Action::Game(Input::Jump))
        }
        Event::Resize(cols, rows) => Some(Action::Resize(*cols, *rows)),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter | KeyCode::Char('w') => {
            Some(Action::Game(Input::Jump))
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Game(Input::Restart)),
        _ => None,
    }
}
