//! Terminal Tetromino runner (default binary).
//!
//! Uses crossterm for input and a framebuffer-based renderer. Logs go to the
//! file named by `TETRIS_LOG_PATH`; without it nothing is logged, since the
//! terminal itself is in raw/alternate-screen mode.

use std::fs::File;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_tetromino::core::{GameSnapshot, Session};
use tui_tetromino::input::poll_action;
use tui_tetromino::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_tetromino::{AppConfig, Controller, Flow};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;
    info!(
        seed = config.seed,
        fixed = config.seed_fixed,
        frame_ms = config.frame_ms,
        "starting"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!(error = %err, "exited with error");
    }
    result
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("cannot open log file {path}"))?;
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(tui_tetromino::config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let frame = config.frame_duration();
    let mut controller = Controller::new(Session::with_seed(config.seed), Instant::now());

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let frame_start = Instant::now();

        // Input waits at most one frame; the remaining budget is slept below.
        let action = poll_action(frame)?;
        if controller.frame(action, Instant::now()) == Flow::Quit {
            return Ok(());
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        controller.session().snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        if let Some(rest) = frame.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}
