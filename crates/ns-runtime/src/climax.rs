//! The finale as an explicit state machine.
//!
//! The sequencer only tracks where the finale is and refuses out-of-order
//! beats. The session performs each beat's side effects and schedules the
//! next one with the configured delays.

use ns_core::ClimaxStep;

/// Where the finale is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ClimaxPhase {
    /// Not triggered.
    #[default]
    Idle,
    /// Triggered; waiting for the start delay.
    Scheduled,
    /// The player has fallen.
    Fallen,
    /// The shadow is up.
    Emerged,
    /// The shadow is speaking.
    Speaking,
    /// The vines have struck.
    Impact,
    /// The screen is black.
    Blackout,
    /// The epilogue is showing. Terminal.
    Epilogue,
}

/// A timed beat delivered by the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimaxBeat {
    /// Fall, alarm, switch to the climax scene.
    Begin,
    /// The shadow emerges.
    Emerge,
    /// The shadow's dialogue starts.
    Speak,
    /// Full cover.
    Blackout,
    /// Epilogue.
    Epilogue,
}

/// Single-shot finale tracker.
#[derive(Debug, Default)]
pub struct ClimaxSequencer {
    phase: ClimaxPhase,
}

impl ClimaxSequencer {
    /// An untriggered sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    fn step_from(&mut self, expected: ClimaxPhase, next: ClimaxPhase) -> bool {
        if self.phase != expected {
            return false;
        }
        self.phase = next;
        true
    }

    /// Queue the finale. Refused once it has been queued.
    pub fn schedule(&mut self) -> bool {
        self.step_from(ClimaxPhase::Idle, ClimaxPhase::Scheduled)
    }

    /// Apply a timed beat. Returns `false` when the beat is out of order.
    pub fn apply(&mut self, beat: ClimaxBeat) -> bool {
        let (expected, next) = match beat {
            ClimaxBeat::Begin => (ClimaxPhase::Scheduled, ClimaxPhase::Fallen),
            ClimaxBeat::Emerge => (ClimaxPhase::Fallen, ClimaxPhase::Emerged),
            ClimaxBeat::Speak => (ClimaxPhase::Emerged, ClimaxPhase::Speaking),
            ClimaxBeat::Blackout => (ClimaxPhase::Impact, ClimaxPhase::Blackout),
            ClimaxBeat::Epilogue => (ClimaxPhase::Blackout, ClimaxPhase::Epilogue),
        };
        self.step_from(expected, next)
    }

    /// The shadow's dialogue ended.
    pub fn dialogue_finished(&mut self) -> bool {
        self.step_from(ClimaxPhase::Speaking, ClimaxPhase::Impact)
    }

    /// Current phase.
    pub fn phase(&self) -> ClimaxPhase {
        self.phase
    }

    /// Whether the finale is queued or running.
    pub fn is_triggered(&self) -> bool {
        self.phase != ClimaxPhase::Idle
    }

    /// Whether the fall has happened.
    pub fn has_begun(&self) -> bool {
        self.phase >= ClimaxPhase::Fallen
    }

    /// Visual stage, derived from the phase.
    pub fn step(&self) -> ClimaxStep {
        match self.phase {
            ClimaxPhase::Idle | ClimaxPhase::Scheduled | ClimaxPhase::Fallen => ClimaxStep::Normal,
            ClimaxPhase::Emerged | ClimaxPhase::Speaking => ClimaxStep::ShadowEmerged,
            ClimaxPhase::Impact | ClimaxPhase::Blackout | ClimaxPhase::Epilogue => {
                ClimaxStep::VinesSmashed
            }
        }
    }
}
