//! Covered scene changes.
//!
//! One transition at a time. Each phase is closed by a timer carrying the
//! transition's token; a token from an earlier transition does nothing.

use ns_core::{Effect, Position, SceneId};

use crate::config::TransitionTimings;

/// Where a transition is in its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Cover rising.
    Covering,
    /// Full cover, scene already swapped.
    Holding,
    /// Cover falling.
    Revealing,
}

/// Identity of one transition run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionToken(u64);

/// The swap to perform at full cover.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSwap {
    /// Scene to enter.
    pub scene: SceneId,
    /// Position in that scene.
    pub position: Position,
    /// Continuation to run right after the swap.
    pub on_midpoint: Vec<Effect>,
}

/// Serialized fade-out, swap, fade-in.
#[derive(Debug, Default)]
pub struct TransitionController {
    timings: TransitionTimings,
    phase: TransitionPhase,
    phase_started_ms: u64,
    runs: u64,
    pending: Option<SceneSwap>,
    target: Option<SceneId>,
}

impl TransitionController {
    /// An idle controller.
    pub fn new(timings: TransitionTimings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    /// Start covering. Returns `None` while another transition is in flight.
    pub fn begin(&mut self, swap: SceneSwap, now_ms: u64) -> Option<TransitionToken> {
        if self.in_flight() {
            return None;
        }
        self.runs += 1;
        self.phase = TransitionPhase::Covering;
        self.phase_started_ms = now_ms;
        self.target = Some(swap.scene);
        self.pending = Some(swap);
        Some(TransitionToken(self.runs))
    }

    fn is_current(&self, token: TransitionToken, phase: TransitionPhase) -> bool {
        token.0 == self.runs && self.phase == phase
    }

    /// Full cover reached: hand out the swap.
    pub fn midpoint(&mut self, token: TransitionToken, now_ms: u64) -> Option<SceneSwap> {
        if !self.is_current(token, TransitionPhase::Covering) {
            return None;
        }
        self.phase = TransitionPhase::Holding;
        self.phase_started_ms = now_ms;
        self.pending.take()
    }

    /// Start lowering the cover.
    pub fn reveal(&mut self, token: TransitionToken, now_ms: u64) -> bool {
        if !self.is_current(token, TransitionPhase::Holding) {
            return false;
        }
        self.phase = TransitionPhase::Revealing;
        self.phase_started_ms = now_ms;
        true
    }

    /// Cover gone; release the guard.
    pub fn finish(&mut self, token: TransitionToken) -> bool {
        if !self.is_current(token, TransitionPhase::Revealing) {
            return false;
        }
        self.phase = TransitionPhase::Idle;
        self.target = None;
        true
    }

    /// Whether a transition is running.
    pub fn in_flight(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    /// Current phase.
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Destination of the transition in flight.
    pub fn target(&self) -> Option<SceneId> {
        self.target
    }

    /// Configured durations.
    pub fn timings(&self) -> &TransitionTimings {
        &self.timings
    }

    /// Cover opacity in `0.0..=1.0`, interpolated through the phases.
    pub fn cover_level(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.phase_started_ms);
        match self.phase {
            TransitionPhase::Idle => 0.0,
            TransitionPhase::Covering => ratio(elapsed, self.timings.cover_ms),
            TransitionPhase::Holding => 1.0,
            TransitionPhase::Revealing => 1.0 - ratio(elapsed, self.timings.reveal_ms),
        }
    }
}

fn ratio(elapsed: u64, span: u64) -> f32 {
    if span == 0 {
        return 1.0;
    }
    (elapsed as f32 / span as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap() -> SceneSwap {
        SceneSwap {
            scene: SceneId::Meeting,
            position: Position::new(2.0),
            on_midpoint: Vec::new(),
        }
    }

    #[test]
    fn full_timeline() {
        let mut ctl = TransitionController::new(TransitionTimings::default());
        let token = ctl.begin(swap(), 0).unwrap();
        assert_eq!(ctl.target(), Some(SceneId::Meeting));
        assert!((ctl.cover_level(600) - 0.5).abs() < 1e-6);

        let taken = ctl.midpoint(token, 1200).unwrap();
        assert_eq!(taken.scene, SceneId::Meeting);
        assert_eq!(ctl.cover_level(1500), 1.0);

        assert!(ctl.reveal(token, 2000));
        assert!((ctl.cover_level(2600) - 0.5).abs() < 1e-6);
        assert!(ctl.in_flight());

        assert!(ctl.finish(token));
        assert!(!ctl.in_flight());
        assert_eq!(ctl.cover_level(5000), 0.0);
    }

    #[test]
    fn second_begin_is_refused_until_finished() {
        let mut ctl = TransitionController::new(TransitionTimings::default());
        let token = ctl.begin(swap(), 0).unwrap();
        assert!(ctl.begin(swap(), 10).is_none());
        ctl.midpoint(token, 1200);
        assert!(ctl.begin(swap(), 1300).is_none());
        ctl.reveal(token, 2000);
        assert!(ctl.begin(swap(), 2100).is_none());
        ctl.finish(token);
        assert!(ctl.begin(swap(), 3200).is_some());
    }

    #[test]
    fn phases_must_come_in_order() {
        let mut ctl = TransitionController::new(TransitionTimings::default());
        let token = ctl.begin(swap(), 0).unwrap();
        assert!(!ctl.reveal(token, 10));
        assert!(!ctl.finish(token));
        assert!(ctl.midpoint(token, 1200).is_some());
        assert!(ctl.midpoint(token, 1200).is_none());
    }

    #[test]
    fn stale_token_is_ignored() {
        let mut ctl = TransitionController::new(TransitionTimings::default());
        let first = ctl.begin(swap(), 0).unwrap();
        ctl.midpoint(first, 1);
        ctl.reveal(first, 2);
        ctl.finish(first);
        let second = ctl.begin(swap(), 3).unwrap();
        assert!(ctl.midpoint(first, 4).is_none());
        assert!(ctl.midpoint(second, 4).is_some());
    }
}
