use crate::game::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    /// A printable character typed with no modifiers other than Shift
    Char(char),
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (_, KeyCode::Up) => Some(Command::Up),
            (_, KeyCode::Down) => Some(Command::Down),
            (_, KeyCode::Left) => Some(Command::Left),
            (_, KeyCode::Right) => Some(Command::Right),
            (_, KeyCode::Enter) => Some(Command::Enter),
            (_, KeyCode::Esc) => Some(Command::Esc),
            (_, KeyCode::Backspace) => Some(Command::Backspace),
            (m, KeyCode::Char(c)) if normal_modifiers.contains(m) => Some(Command::Char(c)),
            _ => None,
        }
    }

    /// The direction in which this command steers the snake, if any.  Arrow
    /// keys, WASD, and the vi keys all steer.
    pub(crate) fn direction(self) -> Option<Direction> {
        match self {
            Command::Up | Command::Char('w' | 'k') => Some(Direction::North),
            Command::Down | Command::Char('s' | 'j') => Some(Direction::South),
            Command::Left | Command::Char('a' | 'h') => Some(Direction::West),
            Command::Right | Command::Char('d' | 'l') => Some(Direction::East),
            _ => None,
        }
    }
}
