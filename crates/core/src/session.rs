//! Session module - the game state machine
//!
//! This module ties together the field, the falling piece, the piece source
//! and the score/level counters. It handles movement, rotation with the
//! horizontal kick search, locking, line clears, spawning and the
//! Menu/Playing/Paused/GameOver lifecycle.
//!
//! Every player operation is total: called in the wrong state, or when the
//! move does not fit, it changes nothing and reports `false`.

use std::time::Duration;

use tracing::{debug, info};

use crate::field::{Field, RowList};
use crate::pieces::Piece;
use crate::rng::{PieceSource, UniformPieces};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::*;

/// What a periodic tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing happened
    Idle,
    /// The piece moved down one row
    Fell,
    /// The piece could not fall and was locked
    Locked,
}

/// Record of the most recent lock (consumed by observers and logging)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    /// Rows travelled by the hard drop that caused the lock (0 for a tick lock)
    pub drop_rows: u32,
    pub lines_cleared: u32,
    /// Full row indices right after placement, bottom-most first
    pub cleared_rows: RowList,
    pub line_clear_score: u32,
    pub level_up: bool,
    pub game_over: bool,
}

/// Base points for `lines` cleared at once, times `level`
///
/// More than four lines cannot come from a single lock; they score as four.
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    let idx = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx] * level
}

/// Level reached after `lines` total cleared lines
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Drop interval in milliseconds at `level`
///
/// 1000ms at level 1, 100ms less per level, never below 50ms.
pub fn drop_interval_ms_for_level(level: u32) -> f64 {
    let factor = 1.0 - (level.saturating_sub(1)) as f64 * DROP_SPEEDUP_PER_LEVEL;
    BASE_DROP_MS * factor.max(MIN_DROP_FACTOR)
}

/// One game instance
#[derive(Debug, Clone)]
pub struct Session<S = UniformPieces> {
    field: Field,
    current: Option<Piece>,
    next: Option<Piece>,
    x: i32,
    y: i32,
    score: u32,
    level: u32,
    /// Lines removed by the most recent lock
    last_lines: u32,
    /// Lines removed since the last reset
    lines: u32,
    state: SessionState,
    pieces: S,
    last_event: Option<LockEvent>,
}

impl Session<UniformPieces> {
    /// Create a session drawing uniformly random pieces from `seed`
    pub fn with_seed(seed: u32) -> Self {
        Self::new(UniformPieces::new(seed))
    }
}

impl Default for Session<UniformPieces> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

impl<S: PieceSource> Session<S> {
    /// Create a session in the menu with an empty field
    pub fn new(pieces: S) -> Self {
        Self {
            field: Field::new(),
            current: None,
            next: None,
            x: SPAWN_X,
            y: SPAWN_Y,
            score: 0,
            level: 1,
            last_lines: 0,
            lines: 0,
            state: SessionState::Menu,
            pieces,
            last_event: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Total lines cleared since the last reset
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Lines cleared by the most recent lock
    pub fn last_lines(&self) -> u32 {
        self.last_lines
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Test-only: direct field access for setting up positions
    ///
    /// Cells written under the falling piece break the placement invariant.
    #[cfg(any(test, feature = "test-support"))]
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn last_event(&self) -> Option<&LockEvent> {
        self.last_event.as_ref()
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Clear the field, zero the counters and spawn a fresh piece pair
    ///
    /// Leaves `state` untouched; [`Session::start`] is reset plus Playing.
    fn reset(&mut self) {
        self.field.clear();
        self.score = 0;
        self.level = 1;
        self.last_lines = 0;
        self.lines = 0;
        self.last_event = None;

        self.current = Some(Piece::random(&mut self.pieces));
        self.next = Some(Piece::random(&mut self.pieces));
        self.x = SPAWN_X;
        self.y = SPAWN_Y;
        info!(
            current = ?self.current.map(|p| p.kind()),
            next = ?self.next.map(|p| p.kind()),
            "session reset"
        );
    }

    /// Reset and begin playing from Menu or GameOver
    ///
    /// A game in progress (Playing or Paused) is left alone and `false` is
    /// returned.
    pub fn start(&mut self) -> bool {
        if !matches!(self.state, SessionState::Menu | SessionState::GameOver) {
            return false;
        }
        self.reset();
        self.state = SessionState::Playing;
        true
    }

    /// Same as [`Session::start`]
    pub fn restart(&mut self) -> bool {
        self.start()
    }

    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        self.state = SessionState::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != SessionState::Paused {
            return false;
        }
        self.state = SessionState::Playing;
        true
    }

    /// Check whether the current piece fits at (x, y)
    fn fits(&self, piece: &Piece, x: i32, y: i32) -> bool {
        self.field.can_place(piece, x, y)
    }

    /// Try to shift the current piece; only while playing
    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };
        if !self.fits(&piece, self.x + dx, self.y + dy) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    pub fn move_down(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Drop the piece as far as it goes (2 points per row), then lock it
    ///
    /// Returns `false` without effect when not playing.
    pub fn hard_drop(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let mut rows = 0;
        while self.fits(&piece, self.x, self.y + 1) {
            self.y += 1;
            self.score += HARD_DROP_POINTS_PER_ROW;
            rows += 1;
        }

        self.lock(rows);
        true
    }

    /// Rotate with the horizontal kick search
    ///
    /// The rotated shape is tried at each of [`KICK_OFFSETS`] on the same row
    /// and the first fit wins. If none fits, nothing changes.
    fn try_rotate(&mut self, clockwise: bool) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let rotated = if clockwise {
            piece.rotated_cw()
        } else {
            piece.rotated_ccw()
        };

        let Some(dx) = KICK_OFFSETS
            .iter()
            .copied()
            .find(|&dx| self.fits(&rotated, self.x + dx, self.y))
        else {
            return false;
        };

        self.current = Some(rotated);
        self.x += dx;
        true
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.try_rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(false)
    }

    /// Periodic gravity step: fall one row, or lock if resting
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != SessionState::Playing || self.current.is_none() {
            return TickOutcome::Idle;
        }
        if self.move_down() {
            TickOutcome::Fell
        } else {
            self.lock(0);
            TickOutcome::Locked
        }
    }

    /// Commit the current piece, clear lines, score, and spawn the next one
    fn lock(&mut self, drop_rows: u32) {
        let Some(piece) = self.current else {
            return;
        };

        self.field.place(&piece, self.x, self.y);

        let cleared_rows = self.field.full_rows();
        let lines = self.field.clear_lines();
        self.last_lines = lines;

        let mut clear_score = 0;
        let mut level_up = false;
        if lines > 0 {
            clear_score = line_clear_score(lines, self.level);
            self.score += clear_score;
            self.lines += lines;

            let level = level_for_lines(self.lines);
            if level > self.level {
                info!(from = self.level, to = level, lines = self.lines, "level up");
                self.level = level;
                level_up = true;
            }
        }

        debug!(
            kind = piece.kind().as_str(),
            rotation = piece.rotation().as_str(),
            x = self.x,
            y = self.y,
            drop_rows,
            lines,
            score = self.score,
            "piece locked"
        );

        let game_over = if self.field.is_game_over() {
            self.state = SessionState::GameOver;
            true
        } else {
            !self.spawn_next()
        };

        if game_over {
            info!(score = self.score, level = self.level, lines = self.lines, "game over");
        }

        self.last_event = Some(LockEvent {
            drop_rows,
            lines_cleared: lines,
            cleared_rows,
            line_clear_score: clear_score,
            level_up,
            game_over,
        });
    }

    /// Promote the queued piece and queue a new one
    ///
    /// Returns `false` (and ends the game) if the new piece does not fit at
    /// the spawn position.
    fn spawn_next(&mut self) -> bool {
        let promoted = match self.next.take() {
            Some(p) => p,
            None => Piece::random(&mut self.pieces),
        };
        self.current = Some(promoted);
        self.next = Some(Piece::random(&mut self.pieces));
        self.x = SPAWN_X;
        self.y = SPAWN_Y;

        if !self.fits(&promoted, self.x, self.y) {
            self.state = SessionState::GameOver;
            return false;
        }
        true
    }

    /// Current drop interval in milliseconds, derived from the level
    pub fn drop_interval_ms(&self) -> f64 {
        drop_interval_ms_for_level(self.level)
    }

    pub fn drop_interval(&self) -> Duration {
        Duration::from_secs_f64(self.drop_interval_ms() / 1000.0)
    }

    /// Row the current piece would land on if dropped straight down
    pub fn ghost_y(&self) -> Option<i32> {
        let piece = self.current?;
        let mut y = self.y;
        while self.fits(&piece, self.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Apply one discrete action according to the current state
    ///
    /// - Menu: `Start`
    /// - Playing: movement, rotation, hard drop, `Pause`
    /// - Paused: `Pause` resumes
    /// - GameOver: `Start` or `Restart`
    ///
    /// `Quit` belongs to the outer loop and is always ignored here. Returns
    /// whether the action had an effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match (self.state, action) {
            (_, GameAction::Quit) => false,
            (SessionState::Menu, GameAction::Start)
            | (SessionState::GameOver, GameAction::Start | GameAction::Restart) => self.start(),
            (SessionState::Playing, GameAction::MoveLeft) => self.move_left(),
            (SessionState::Playing, GameAction::MoveRight) => self.move_right(),
            (SessionState::Playing, GameAction::MoveDown) => self.move_down(),
            (SessionState::Playing, GameAction::HardDrop) => self.hard_drop(),
            (SessionState::Playing, GameAction::RotateCw) => self.rotate_cw(),
            (SessionState::Playing, GameAction::RotateCcw) => self.rotate_ccw(),
            (SessionState::Playing, GameAction::Pause) => self.pause(),
            (SessionState::Paused, GameAction::Pause) => self.resume(),
            _ => false,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.field.write_grid(&mut out.board);
        out.current = self.current.map(|p| PieceSnapshot {
            kind: p.kind(),
            rotation: p.rotation(),
            x: self.x,
            y: self.y,
        });
        out.next = self.next.map(|p| p.kind());
        out.ghost_y = self.ghost_y();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.state = self.state;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Test-only: put a specific piece at (x, y)
    ///
    /// Refuses (returns `false`, nothing changes) unless the session is
    /// playing and the piece fits there.
    #[cfg(any(test, feature = "test-support"))]
    pub fn set_current(&mut self, piece: Piece, x: i32, y: i32) -> bool {
        if self.state != SessionState::Playing || !self.fits(&piece, x, y) {
            return false;
        }
        self.current = Some(piece);
        self.x = x;
        self.y = y;
        true
    }

    /// Test-only: credit `lines` cleared lines without touching the field
    ///
    /// Totals only grow, and the level is recomputed the way a lock does.
    #[cfg(any(test, feature = "test-support"))]
    pub fn add_lines(&mut self, lines: u32) {
        self.lines += lines;
        self.level = self.level.max(level_for_lines(self.lines));
    }
}
