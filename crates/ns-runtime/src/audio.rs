//! The outbound audio seam.
//!
//! The runtime names cues; a sink decides what they sound like.

use std::fmt;

use ns_core::Drone;
use tracing::debug;

/// A named sound the runtime asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// One footstep while walking.
    Footstep,
    /// Interaction chime.
    Interact,
    /// Alarm sting.
    Scare,
    /// Ghostly murmur under a subtitle.
    Whisper,
    /// Typewriter tick.
    Typing,
    /// Start an ambient loop, replacing any current one.
    StartDrone(Drone),
    /// Stop the ambient loop.
    StopDrone,
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Footstep => f.write_str("footstep"),
            Self::Interact => f.write_str("interact"),
            Self::Scare => f.write_str("scare"),
            Self::Whisper => f.write_str("whisper"),
            Self::Typing => f.write_str("typing"),
            Self::StartDrone(drone) => write!(f, "drone:{}", drone.token()),
            Self::StopDrone => f.write_str("drone:stop"),
        }
    }
}

/// Receives cues. Implementations must not call back into the session.
pub trait AudioSink: fmt::Debug {
    /// Play a cue.
    fn play(&mut self, cue: AudioCue);
}

/// Emits each cue as a `tracing` event.
#[derive(Debug, Default)]
pub struct TracingAudio;

impl AudioSink for TracingAudio {
    fn play(&mut self, cue: AudioCue) {
        debug!(cue = %cue, "audio_cue");
    }
}

/// Drops every cue.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}
