//! Key mapping from terminal events to game commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

/// Map a key press to a command. Releases, repeats and unknown keys map to
/// `None`.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_c(&key) {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Up => Some(Command::Turn(Direction::Up)),
        KeyCode::Down => Some(Command::Turn(Direction::Down)),
        KeyCode::Left => Some(Command::Turn(Direction::Left)),
        KeyCode::Right => Some(Command::Turn(Direction::Right)),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

// Raw mode turns CTRL+C into a plain key event
fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
