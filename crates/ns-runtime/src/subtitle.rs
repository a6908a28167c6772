//! Which proximity subtitle is on screen.

use ns_core::{Position, Subtitle};

/// Token for a shown subtitle's expiry timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtitleToken(u64);

/// At most one visible subtitle, replaced only by a different one.
#[derive(Debug, Default)]
pub struct SubtitleTracker {
    visible: Option<Subtitle>,
    shown: u64,
}

impl SubtitleTracker {
    /// Nothing visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the first candidate within `range` of `position`, unless it is
    /// already on screen. Returns the newly shown subtitle and the token its
    /// expiry timer must carry.
    pub fn observe(
        &mut self,
        candidates: &[Subtitle],
        position: Position,
        range: f32,
    ) -> Option<(SubtitleToken, &Subtitle)> {
        let nearby = candidates
            .iter()
            .find(|s| position.distance_to(s.trigger_x) < range)?;
        if self.visible.as_ref().is_some_and(|v| v.id == nearby.id) {
            return None;
        }
        self.shown += 1;
        let shown = self.visible.insert(nearby.clone());
        Some((SubtitleToken(self.shown), shown))
    }

    /// Clear the subtitle if `token` still names it.
    pub fn expire(&mut self, token: SubtitleToken) -> bool {
        if token.0 != self.shown || self.visible.is_none() {
            return false;
        }
        self.visible = None;
        true
    }

    /// The visible subtitle.
    pub fn visible(&self) -> Option<&Subtitle> {
        self.visible.as_ref()
    }
}
