//! Non-blocking keyboard polling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crate::map::map_key;
use crate::types::GameAction;

/// Translate one terminal event, keeping key presses and repeats only
///
/// Terminals that report releases would otherwise fire every action twice.
pub fn event_to_action(ev: &Event) -> Option<GameAction> {
    match ev {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(*key),
        _ => None,
    }
}

/// Wait up to `timeout` for input and return at most one action
///
/// Unmapped keys and non-key events (resize, focus, mouse) are consumed and
/// yield `None`.
pub fn poll_action(timeout: Duration) -> Result<Option<GameAction>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let ev = event::read()?;
    Ok(event_to_action(&ev))
}
