//! Turnstile CLI - binary entry point and terminal session management.
//!
//! The CLI bridges [`turnstile_engine`] (application state) and
//! [`turnstile_tui`] (rendering), providing RAII-based terminal management
//! with guaranteed cleanup.
//!
//! # Event Loop
//!
//! One fixed-cadence loop per session:
//!
//! 1. Poll input for up to one tick (key presses dispatch actions)
//! 2. Advance application state (`app.tick()` delivers finished work)
//! 3. Render frame

use std::fs::OpenOptions;
use std::io::{Stdout, stdout};
use std::sync::Mutex;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use turnstile_engine::{App, TurnstileConfig};

const LOG_FILE: &str = "turnstile.log";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    match OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = LOG_FILE, "Logging initialized");
        }
        Err(_) => {
            // If we can't open a log file, prefer "no logs" over corrupting
            // the TUI by writing to stdout/stderr.
            tracing_subscriber::registry().with(env_filter).init();
        }
    }
}

/// RAII guard for raw mode and the alternate screen.
///
/// The terminal is restored on drop, so a failing draw loop still leaves
/// the user's shell usable.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(out))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            eprintln!("failed to disable raw mode: {e}");
        }
        if let Err(e) = execute!(stdout(), LeaveAlternateScreen) {
            eprintln!("failed to leave alternate screen: {e}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = match TurnstileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("{e}; using defaults");
            TurnstileConfig::default()
        }
    };

    let mut session = TerminalSession::new()?;
    run_app(&mut session.terminal, &config)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &TurnstileConfig,
) -> Result<()> {
    let mut app = App::new(config);
    let tick = config.tick_duration();

    while !app.should_quit() {
        turnstile_tui::handle_events(&mut app, tick)?;
        app.tick();
        terminal.draw(|frame| turnstile_tui::draw(frame, &app))?;
    }

    tracing::info!("session ended");
    Ok(())
}
