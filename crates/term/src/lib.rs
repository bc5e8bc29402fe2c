//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! snapshots into a plain framebuffer (no widget toolkit) and flushes only the
//! changed cells to the terminal.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: pure snapshot-to-framebuffer mapping
//! - [`renderer`]: raw mode, alternate screen and diffing output

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_tetromino_core as core;
pub use tui_tetromino_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
