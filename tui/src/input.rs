//! Input handling for the Turnstile TUI.
//!
//! Keys are the sample screen's "buttons": each press dispatches one action
//! into the guarded pipeline. Whether the action does anything is the
//! guard's call, not the input layer's.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use turnstile_engine::{App, CounterAction};

/// Poll for input up to `timeout` and apply any pending key events.
pub fn handle_events(app: &mut App, timeout: Duration) -> Result<()> {
    if !event::poll(timeout)? {
        return Ok(());
    }
    if let Event::Key(key) = event::read()? {
        handle_key(app, key);
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.request_quit();
        return;
    }
    match key.code {
        KeyCode::Char('t') | KeyCode::Enter => app.dispatch(CounterAction::Tap),
        KeyCode::Char('b') => app.dispatch(CounterAction::Boost),
        KeyCode::Char('r') => app.dispatch(CounterAction::Reset),
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        _ => {}
    }
}
