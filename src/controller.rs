//! Frame controller: applies input and gravity to a session.
//!
//! The controller owns no clock. Each frame the caller passes the polled
//! action (if any) and the current `Instant`, which keeps the loop testable.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::core::{PieceSource, Session, TickOutcome, UniformPieces};
use crate::types::GameAction;

/// Measures time since the last gravity step (or drop-resetting action)
#[derive(Debug, Clone, Copy)]
pub struct DropTimer {
    last: Instant,
}

impl DropTimer {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last)
    }

    pub fn is_due(&self, now: Instant, interval: Duration) -> bool {
        self.elapsed(now) >= interval
    }
}

/// Whether the outer loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Controller<S = UniformPieces> {
    session: Session<S>,
    timer: DropTimer,
}

impl<S: PieceSource> Controller<S> {
    pub fn new(session: Session<S>, now: Instant) -> Self {
        Self {
            session,
            timer: DropTimer::new(now),
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<S> {
        &mut self.session
    }

    pub fn timer(&self) -> &DropTimer {
        &self.timer
    }

    /// Run one frame: the action first, then gravity if the interval elapsed.
    pub fn frame(&mut self, action: Option<GameAction>, now: Instant) -> Flow {
        if let Some(action) = action {
            if action == GameAction::Quit {
                info!(score = self.session.score(), "quit requested");
                return Flow::Quit;
            }
            self.apply(action, now);
        }

        if self.session.is_playing() && self.timer.is_due(now, self.session.drop_interval()) {
            let outcome = self.session.tick();
            self.timer.reset(now);
            if outcome == TickOutcome::Locked {
                debug!(state = self.session.state().as_str(), "gravity lock");
            }
        }

        Flow::Continue
    }

    fn apply(&mut self, action: GameAction, now: Instant) {
        let before = self.session.state();
        let applied = self.session.apply_action(action);
        if !applied {
            return;
        }

        let resets_timer = matches!(
            action,
            GameAction::Start | GameAction::Restart | GameAction::MoveDown | GameAction::HardDrop
        );
        if resets_timer {
            self.timer.reset(now);
        }

        let after = self.session.state();
        if before != after {
            debug!(
                action = action.as_str(),
                from = before.as_str(),
                to = after.as_str(),
                "state change"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedPieces;
    use crate::types::{PieceKind, SessionState};

    fn controller(now: Instant) -> Controller<ScriptedPieces> {
        Controller::new(Session::new(ScriptedPieces::repeat(PieceKind::T)), now)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_quit_stops_in_any_state() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        assert_eq!(c.frame(Some(GameAction::Quit), t0), Flow::Quit);
        c.frame(Some(GameAction::Start), t0);
        assert_eq!(c.frame(Some(GameAction::Quit), t0), Flow::Quit);
    }

    #[test]
    fn test_no_gravity_in_menu() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        assert_eq!(c.frame(None, t0 + ms(5000)), Flow::Continue);
        assert_eq!(c.session().state(), SessionState::Menu);
    }

    #[test]
    fn test_gravity_after_interval() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        c.frame(Some(GameAction::Start), t0);
        let y0 = c.session().y();

        c.frame(None, t0 + ms(999));
        assert_eq!(c.session().y(), y0);

        c.frame(None, t0 + ms(1000));
        assert_eq!(c.session().y(), y0 + 1);

        // Timer restarted at 1000ms.
        c.frame(None, t0 + ms(1500));
        assert_eq!(c.session().y(), y0 + 1);
        c.frame(None, t0 + ms(2000));
        assert_eq!(c.session().y(), y0 + 2);
    }

    #[test]
    fn test_move_down_resets_timer() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        c.frame(Some(GameAction::Start), t0);
        let y0 = c.session().y();

        c.frame(Some(GameAction::MoveDown), t0 + ms(900));
        assert_eq!(c.session().y(), y0 + 1);

        // Without the reset this frame would also apply gravity.
        c.frame(None, t0 + ms(1100));
        assert_eq!(c.session().y(), y0 + 1);
        c.frame(None, t0 + ms(1900));
        assert_eq!(c.session().y(), y0 + 2);
    }

    #[test]
    fn test_sideways_move_keeps_timer() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        c.frame(Some(GameAction::Start), t0);
        let y0 = c.session().y();

        c.frame(Some(GameAction::MoveLeft), t0 + ms(1000));
        assert_eq!(c.session().y(), y0 + 1);
    }

    #[test]
    fn test_start_resets_timer() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        c.frame(Some(GameAction::Start), t0 + ms(3000));
        let y0 = c.session().y();
        c.frame(None, t0 + ms(3500));
        assert_eq!(c.session().y(), y0);
        assert_eq!(c.timer().elapsed(t0 + ms(3500)), ms(500));
    }

    #[test]
    fn test_paused_session_does_not_fall() {
        let t0 = Instant::now();
        let mut c = controller(t0);
        c.frame(Some(GameAction::Start), t0);
        c.frame(Some(GameAction::Pause), t0);
        let y0 = c.session().y();
        c.frame(None, t0 + ms(5000));
        assert_eq!(c.session().y(), y0);
        assert_eq!(c.session().state(), SessionState::Paused);
    }

    #[test]
    fn test_timer_never_goes_negative() {
        let t0 = Instant::now();
        let timer = DropTimer::new(t0 + ms(10));
        assert_eq!(timer.elapsed(t0), Duration::ZERO);
        assert!(!timer.is_due(t0, ms(1)));
    }
}
