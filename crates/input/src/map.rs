//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Letters match in either case. Ctrl-C always quits; other Ctrl chords are
/// ignored so they never double as game keys.
pub fn map_key(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Quit),
            _ => None,
        };
    }

    match key.code {
        // Movement
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::MoveDown),
        KeyCode::Up => Some(GameAction::RotateCw),

        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Enter => Some(GameAction::Start),
        KeyCode::Esc => Some(GameAction::Quit),

        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Some(GameAction::MoveLeft),
            'd' => Some(GameAction::MoveRight),
            's' => Some(GameAction::MoveDown),
            'w' | 'z' => Some(GameAction::RotateCw),
            'x' => Some(GameAction::RotateCcw),
            'p' => Some(GameAction::Pause),
            'r' => Some(GameAction::Restart),
            'q' => Some(GameAction::Quit),
            _ => None,
        },

        _ => None,
    }
}
