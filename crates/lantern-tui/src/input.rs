//! Input handling - convert key events to exploration commands
//!
//! Only the free-walking bindings live here; overlay keys (battle,
//! merchant, shrine, story, menu) are handled in app.rs, since the
//! session rejects exploration input while any overlay is active.

use crossterm::event::{KeyCode, KeyEvent};
use lantern_core::action::Command;

/// Convert a key event to an exploration command.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('a') | KeyCode::Left => Some(Command::TurnLeft),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::TurnRight),
        KeyCode::Char('w') | KeyCode::Up => Some(Command::StepForward),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::StepBack),
        KeyCode::Char('l') => Some(Command::Lantern),
        KeyCode::Char('m') => Some(Command::OpenMenu),
        _ => None,
    }
}
