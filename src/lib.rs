//! TUI Tetromino (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_tetromino::{core,input,term,types}` and adds the
//! application shell (configuration and the frame controller).

pub use tui_tetromino_core as core;
pub use tui_tetromino_input as input;
pub use tui_tetromino_term as term;
pub use tui_tetromino_types as types;

pub mod config;
pub mod controller;

pub use config::AppConfig;
pub use controller::{Controller, DropTimer, Flow};
