//! Terminal setup, teardown, and the fixed-rate game loop.

mod app;
mod view;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ns_runtime::Session;
use ratatui::prelude::*;
use tracing::info;

use app::PlayApp;

/// About 60 ticks per second.
const FRAME: Duration = Duration::from_millis(16);

/// Launch the game in the terminal.
pub fn run(session: Session) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    // Key releases are only reported by terminals that speak the kitty
    // keyboard protocol; elsewhere the app falls back to hold timeouts.
    let release_events = matches!(supports_keyboard_enhancement(), Ok(true));
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .map_err(|e| format!("terminal error: {e}"))?;
    }
    info!(release_events, "terminal_ready");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let mut app = PlayApp::new(session, release_events, Instant::now());
    let result = run_loop(&mut terminal, &mut app);

    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags).ok();
    }
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    info!(at_ms = app.session.now_ms(), "terminal_closed");
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut PlayApp,
) -> Result<(), String> {
    let mut next_frame = Instant::now();
    loop {
        terminal
            .draw(|frame| view::draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        next_frame += FRAME;
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout).map_err(|e| format!("event error: {e}"))? {
                break;
            }
            if let Event::Key(key) = event::read().map_err(|e| format!("event error: {e}"))? {
                app.handle_key(key, Instant::now());
            }
        }

        let now = Instant::now();
        // Skip missed frames after a stall.
        if now > next_frame + FRAME {
            next_frame = now;
        }
        app.tick(now);
    }
}
