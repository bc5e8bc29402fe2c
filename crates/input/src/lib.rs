//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and polls
//! the terminal for at most one action per frame. No key repeat handling is
//! done here; the terminal's own auto-repeat drives held keys.

pub mod map;
pub mod poll;

pub use tui_tetromino_types as types;

pub use map::map_key;
pub use poll::{event_to_action, poll_action};
