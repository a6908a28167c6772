//! Logical buttons and which of them are held.

use std::fmt;
use std::str::FromStr;

/// The fixed set of logical inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Walk left.
    Left,
    /// Walk right.
    Right,
    /// Interact, or advance dialogue while it is showing.
    Interact,
    /// Toggle vision mode.
    ToggleVision,
}

impl Button {
    /// Every button, in index order.
    pub const ALL: [Button; 4] = [
        Button::Left,
        Button::Right,
        Button::Interact,
        Button::ToggleVision,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Stable token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Interact => "interact",
            Self::ToggleVision => "vision",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Button {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "interact" | "advance" => Ok(Self::Interact),
            "vision" | "toggle_vision" => Ok(Self::ToggleVision),
            other => Err(format!("unknown button: {other}")),
        }
    }
}

/// Held state for every button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; Button::ALL.len()],
}

impl InputState {
    /// Nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a button held. Returns `true` on a fresh press.
    pub fn press(&mut self, button: Button) -> bool {
        let slot = &mut self.held[button.index()];
        let fresh = !*slot;
        *slot = true;
        fresh
    }

    /// Mark a button released.
    pub fn release(&mut self, button: Button) {
        self.held[button.index()] = false;
    }

    /// Whether a button is held.
    pub fn is_held(&self, button: Button) -> bool {
        self.held[button.index()]
    }

    /// Release everything.
    pub fn clear(&mut self) {
        self.held = [false; Button::ALL.len()];
    }

    /// Currently held buttons.
    pub fn held(&self) -> impl Iterator<Item = Button> + '_ {
        Button::ALL.into_iter().filter(|b| self.is_held(*b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_reports_edges() {
        let mut input = InputState::new();
        assert!(input.press(Button::Right));
        assert!(!input.press(Button::Right));
        input.release(Button::Right);
        assert!(input.press(Button::Right));
    }

    #[test]
    fn clear_releases_all() {
        let mut input = InputState::new();
        input.press(Button::Left);
        input.press(Button::Right);
        input.clear();
        assert_eq!(input.held().count(), 0);
    }

    #[test]
    fn button_tokens_round_trip() {
        for button in Button::ALL {
            assert_eq!(button.token().parse::<Button>(), Ok(button));
        }
        assert!("jump".parse::<Button>().is_err());
    }
}
