use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction;

/// Device-neutral player commands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Space: start when idle, otherwise pause/resume.
    Action,
    Pause,
    Turn(Direction),
    Quit,
}

impl Command {
    pub fn from_key_event(ev: &KeyEvent) -> Option<Command> {
        if ev.kind == KeyEventKind::Release {
            return None;
        }

        if is_ctrl_c(ev) {
            return Some(Command::Quit);
        }

        match ev.code {
            KeyCode::Char(' ') => Some(Command::Action),
            KeyCode::Esc => Some(Command::Pause),
            KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Direction::Up)),
            KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Direction::Left)),
            KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Direction::Down)),
            KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Direction::Right)),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
