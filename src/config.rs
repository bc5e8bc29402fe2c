//! Runtime configuration for the terminal game.
//!
//! Everything comes from environment variables; malformed values fall back to
//! the defaults instead of failing startup.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::FRAME_MS;

/// Piece RNG seed (u32). Unset means time-derived.
pub const ENV_SEED: &str = "TETRIS_SEED";
/// Frame budget in milliseconds.
pub const ENV_FRAME_MS: &str = "TETRIS_FRAME_MS";
/// Log file path. Unset or blank disables logging.
pub const ENV_LOG_PATH: &str = "TETRIS_LOG_PATH";
/// `tracing` filter directive, e.g. `debug` or `tui_tetromino_core=debug`.
pub const ENV_LOG: &str = "TETRIS_LOG";

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    /// Whether `seed` came from the environment (and so replays the same game)
    pub seed_fixed: bool,
    pub frame_ms: u32,
    pub log_path: Option<String>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: time_seed(),
            seed_fixed: false,
            frame_ms: FRAME_MS,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in
    /// [`AppConfig::from_env`], a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let fixed_seed = non_empty(ENV_SEED).and_then(|s| s.parse::<u32>().ok());

        let frame_ms = non_empty(ENV_FRAME_MS)
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(FRAME_MS);

        let log_path = non_empty(ENV_LOG_PATH);

        let log_filter = non_empty(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            seed: fixed_seed.unwrap_or_else(time_seed),
            seed_fixed: fixed_seed.is_some(),
            frame_ms,
            log_path,
            log_filter,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms as u64)
    }
}

/// Seed from the wall clock; any value is fine as long as runs differ.
fn time_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    (nanos as u32) ^ ((nanos >> 32) as u32)
}
