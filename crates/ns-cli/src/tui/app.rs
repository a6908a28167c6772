//! Key handling and frame timing for the play screen.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ns_runtime::{Button, Session};

/// Without release events a movement key counts as held until this long
/// after its first press, which covers the OS auto-repeat delay.
const FIRST_HOLD: Duration = Duration::from_millis(550);
/// Hold extension granted by each auto-repeat.
const REPEAT_HOLD: Duration = Duration::from_millis(120);

/// Play screen state.
pub struct PlayApp {
    /// The running story.
    pub session: Session,
    /// Set when the player asks to leave.
    pub should_quit: bool,
    release_events: bool,
    holds: Vec<(Button, Instant)>,
    last_tick: Instant,
}

impl PlayApp {
    /// Wrap a session. `release_events` says whether the terminal reports
    /// key releases.
    pub fn new(session: Session, release_events: bool, now: Instant) -> Self {
        Self {
            session,
            should_quit: false,
            release_events,
            holds: Vec::new(),
            last_tick: now,
        }
    }

    /// Route one key event.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let pressed = key.kind != KeyEventKind::Release;

        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit |= pressed;
            return;
        }
        if pressed && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.should_quit = true;
            return;
        }

        if !self.session.is_started() {
            if key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
            {
                self.session.start();
            }
            return;
        }

        let Some(button) = button_for(key.code) else {
            return;
        };

        if self.release_events {
            if pressed {
                self.session.key_down(button);
            } else {
                self.session.key_up(button);
            }
            return;
        }

        match button {
            Button::Left | Button::Right => {
                if !pressed {
                    self.release(button);
                    return;
                }
                let window = if self.holds.iter().any(|(b, _)| *b == button) {
                    REPEAT_HOLD
                } else {
                    FIRST_HOLD
                };
                self.holds.retain(|(b, _)| *b != button);
                self.holds.push((button, now + window));
                self.session.key_down(button);
            }
            Button::Interact | Button::ToggleVision => {
                if key.kind == KeyEventKind::Press {
                    self.session.key_down(button);
                    self.session.key_up(button);
                }
            }
        }
    }

    /// Expire fallback holds, then advance the session by the wall time
    /// since the last tick.
    pub fn tick(&mut self, now: Instant) {
        let expired: Vec<Button> = self
            .holds
            .iter()
            .filter(|(_, until)| *until <= now)
            .map(|(button, _)| *button)
            .collect();
        for button in expired {
            self.release(button);
        }

        let elapsed = now.saturating_duration_since(self.last_tick);
        let ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.last_tick += Duration::from_millis(ms);
        self.session.tick(ms);
    }

    fn release(&mut self, button: Button) {
        self.holds.retain(|(b, _)| *b != button);
        self.session.key_up(button);
    }
}

fn button_for(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Button::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Button::Right),
        KeyCode::Enter | KeyCode::Char(' ' | 'e' | 'E') => Some(Button::Interact),
        KeyCode::Char('f' | 'F') => Some(Button::ToggleVision),
        _ => None,
    }
}
