//! Tuning constants. Every duration is in milliseconds.
//!
//! A tuning file is partial JSON: omitted fields keep their defaults.

use serde::Deserialize;

use crate::error::{RuntimeError, RuntimeResult};

/// Durations of the three cover phases of a scene transition, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransitionTimings {
    /// Cover rising to full.
    pub cover_ms: u64,
    /// Full cover held after the swap.
    pub hold_ms: u64,
    /// Cover falling away.
    pub reveal_ms: u64,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            cover_ms: 1200,
            hold_ms: 800,
            reveal_ms: 1200,
        }
    }
}

impl TransitionTimings {
    /// Total time a transition blocks the player.
    pub fn total_ms(&self) -> u64 {
        self.cover_ms + self.hold_ms + self.reveal_ms
    }
}

/// Delays between the beats of the finale, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClimaxTimings {
    /// From the last altar to the fall.
    pub trigger_delay_ms: u64,
    /// From the fall to the shadow emerging.
    pub emerge_ms: u64,
    /// From the shadow emerging to its dialogue.
    pub speak_ms: u64,
    /// From the impact to the blackout.
    pub blackout_ms: u64,
    /// From the blackout to the epilogue.
    pub epilogue_ms: u64,
}

impl Default for ClimaxTimings {
    fn default() -> Self {
        Self {
            trigger_delay_ms: 800,
            emerge_ms: 1000,
            speak_ms: 3000,
            blackout_ms: 800,
            epilogue_ms: 2500,
        }
    }
}

/// Every tuning constant the runtime uses.
///
/// Deserializes from a partial JSON object: missing fields keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Walk speed in position units per millisecond.
    pub walk_speed: f32,
    /// Upper bound on the frame delta fed to movement.
    pub max_frame_delta_ms: u64,
    /// Minimum gap between footstep cues.
    pub footstep_interval_ms: u64,
    /// Interaction reach, exclusive.
    pub interact_range: f32,
    /// Subtitle trigger reach, exclusive.
    pub subtitle_range: f32,
    /// How long the boundary notice stays up.
    pub block_notice_ms: u64,
    /// Delay between revealed characters.
    pub typing_delay_ms: u64,
    /// How long a line's visual effect stays active.
    pub line_effect_ms: u64,
    /// Scene transition phases.
    pub transition: TransitionTimings,
    /// Finale beats.
    pub climax: ClimaxTimings,
    /// Delay after a transition midpoint before follow-up dialogue or audio.
    pub post_transition_ms: u64,
    /// Time spent lying down before standing up at the start.
    pub wake_up_ms: u64,
    /// Gap between standing up and the opening monologue.
    pub intro_dialogue_ms: u64,
    /// Delay before the vision-mode hint appears.
    pub vision_hint_ms: u64,
    /// Event log capacity. 0 = unlimited.
    pub max_events: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            walk_speed: 0.0086,
            max_frame_delta_ms: 50,
            footstep_interval_ms: 400,
            interact_range: 10.0,
            subtitle_range: 8.0,
            block_notice_ms: 2000,
            typing_delay_ms: 50,
            line_effect_ms: 500,
            transition: TransitionTimings::default(),
            climax: ClimaxTimings::default(),
            post_transition_ms: 500,
            wake_up_ms: 3000,
            intro_dialogue_ms: 500,
            vision_hint_ms: 500,
            max_events: 4096,
        }
    }
}

impl RuntimeConfig {
    /// Parse a partial JSON tuning file and validate it.
    pub fn from_json(json: &str) -> RuntimeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the runtime cannot work with.
    pub fn validate(&self) -> RuntimeResult<()> {
        if !self.walk_speed.is_finite() || self.walk_speed < 0.0 {
            return Err(RuntimeError::InvalidConfig(format!(
                "walk_speed must be a non-negative number, got {}",
                self.walk_speed
            )));
        }
        for (name, value) in [
            ("interact_range", self.interact_range),
            ("subtitle_range", self.subtitle_range),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RuntimeError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.max_frame_delta_ms == 0 {
            return Err(RuntimeError::InvalidConfig(
                "max_frame_delta_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the walk speed in units per millisecond.
    pub fn with_walk_speed(mut self, speed: f32) -> Self {
        self.walk_speed = speed;
        self
    }

    /// Set the movement frame-delta cap.
    pub fn with_max_frame_delta_ms(mut self, ms: u64) -> Self {
        self.max_frame_delta_ms = ms;
        self
    }

    /// Set the per-character typing delay.
    pub fn with_typing_delay_ms(mut self, ms: u64) -> Self {
        self.typing_delay_ms = ms;
        self
    }

    /// Set the transition phase durations.
    pub fn with_transition(mut self, timings: TransitionTimings) -> Self {
        self.transition = timings;
        self
    }

    /// Set the finale timings.
    pub fn with_climax(mut self, timings: ClimaxTimings) -> Self {
        self.climax = timings;
        self
    }

    /// Set the wake-up and intro dialogue delays.
    pub fn with_intro(mut self, wake_up_ms: u64, intro_dialogue_ms: u64) -> Self {
        self.wake_up_ms = wake_up_ms;
        self.intro_dialogue_ms = intro_dialogue_ms;
        self
    }

    /// Set the event log capacity (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }
}
