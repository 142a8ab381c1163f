//! TUI rendering for Turnstile using ratatui.
//!
//! One sample screen: the counter panel, the guard event log, and a status
//! bar with the key bindings that act as buttons. Rendering is read-only
//! over [`App`]; all state changes flow through the input layer's dispatches.

mod format;
mod input;
mod theme;

pub use format::event_line;
pub use input::handle_events;
pub use theme::{Glyphs, Palette, glyphs, palette};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};

use turnstile_engine::{Admission, App, GuardEvent};

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = palette();
    let glyphs = glyphs(app.ascii_only());

    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(6), // Counter panel
            Constraint::Min(3),    // Guard event log
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_counter(frame, app, chunks[0], &palette, &glyphs);
    draw_events(frame, app, chunks[1], &palette);
    draw_status_bar(frame, chunks[2], &palette);
}

fn draw_counter(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let level = app.lock_level();

    let mut badge = vec![
        Span::styled(glyphs.lock_glyph(level), Style::default().fg(palette.lock_color(level))),
        Span::raw(" "),
        Span::styled(
            level.to_string(),
            Style::default()
                .fg(palette.lock_color(level))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if level.is_locked() {
        badge.push(Span::raw(" "));
        badge.push(Span::styled(
            glyphs.spinner_frame(app.tick_count()),
            Style::default().fg(palette.accent),
        ));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled("counter: ", Style::default().fg(palette.text_muted)),
            Span::styled(
                app.counter().to_string(),
                Style::default()
                    .fg(palette.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(badge),
    ];

    let panel = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .title(" turnstile ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.bg_border))
            .padding(Padding::horizontal(1))
            .style(Style::default().bg(palette.bg_panel)),
    );
    frame.render_widget(panel, area);
}

fn draw_events(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    // Keep the newest decisions visible; the log itself is already capped.
    let visible = area.height.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = app
        .events()
        .iter()
        .rev()
        .take(visible)
        .map(|entry| {
            let color = match entry.event.admission() {
                Admission::Denied => palette.error,
                Admission::Admitted => match entry.event {
                    GuardEvent::Released { .. } => palette.text_muted,
                    _ => palette.accent,
                },
            };
            Line::from(Span::styled(
                format::event_line(entry),
                Style::default().fg(color),
            ))
        })
        .collect();
    lines.reverse();

    let log = Paragraph::new(lines).block(
        Block::default()
            .title(" guard decisions ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.bg_border))
            .padding(Padding::horizontal(1))
            .style(Style::default().bg(palette.bg_panel)),
    );
    frame.render_widget(log, area);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, palette: &Palette) {
    let bindings = [
        ("t", "tap (exclusive)"),
        ("b", "boost (cancellable)"),
        ("r", "reset"),
        ("q", "quit"),
    ];

    let mut spans = Vec::new();
    for (key, label) in bindings {
        spans.push(Span::styled(
            format!("[{key}]"),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {label}   "),
            Style::default().fg(palette.text_muted),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
