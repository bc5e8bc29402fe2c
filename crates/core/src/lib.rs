//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, state management, and simulation logic.
//! It has no dependencies on UI or terminal I/O, so it runs headless in
//! tests, benches and tools.
//!
//! # Module Structure
//!
//! - [`field`]: 10x20 field with collision detection and line clearing
//! - [`pieces`]: Tetromino shape tables and the `Piece` value type
//! - [`rng`]: Uniform and scripted piece sources
//! - [`session`]: Game state machine: movement, rotation, locking, scoring, levels
//! - [`snapshot`]: Read-only frame data for renderers
//!
//! # Game Rules
//!
//! - **Uniform Randomizer**: every spawn picks one of the seven kinds independently
//! - **Horizontal Kicks**: a blocked rotation retries at x offsets 0, -1, +1, -2, +2
//! - **Immediate Lock**: a piece locks on the first tick it cannot fall
//! - **Ghost Piece**: shows where the current piece will land
//! - **Scoring**: 40/100/300/1200 times the level, plus 2 per hard-dropped row
//! - **Levels**: one level per 10 cleared lines; gravity speeds up 100ms per level
//!
//! # Example
//!
//! ```
//! use tui_tetromino_core::Session;
//! use tui_tetromino_types::GameAction;
//!
//! // Create and start a game
//! let mut game = Session::with_seed(12345);
//! game.start();
//!
//! // Apply game actions
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Check game state
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! The session has no clock. The caller calls [`Session::tick`] whenever
//! [`Session::drop_interval`] has elapsed; the interval starts at 1000ms and
//! never goes below 50ms.

pub mod field;
pub mod pieces;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use tui_tetromino_types as types;

// Re-export commonly used types for convenience
pub use field::{Field, RowList};
pub use pieces::{occupied_cells, shape_matrix, Piece, PieceMatrix, EMPTY_MATRIX};
pub use rng::{PieceSource, ScriptedPieces, SimpleRng, UniformPieces};
pub use session::{
    drop_interval_ms_for_level, level_for_lines, line_clear_score, LockEvent, Session, TickOutcome,
};
pub use snapshot::{BoardGrid, GameSnapshot, PieceSnapshot};
