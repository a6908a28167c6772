//! Interaction and narrative runtime for Ninesong.
//!
//! The [`Session`] aggregate drives one play-through: the clock and timer
//! queue, player movement, proximity subtitles and trigger rules,
//! interaction resolution, typewriter dialogue, fade transitions and the
//! finale sequence. Everything here is presentation-free; frontends feed
//! input and elapsed time in and read [`Snapshot`]s back.

/// Outbound audio cues.
pub mod audio;
/// Finale sequencing.
pub mod climax;
/// Session time.
pub mod clock;
/// Runtime tuning.
pub mod config;
/// Typewriter dialogue engine.
pub mod dialogue;
/// Error types.
pub mod error;
/// Session event log.
pub mod event;
/// Held buttons.
pub mod input;
/// Walking and boundaries.
pub mod movement;
/// Next-step hints.
pub mod objective;
/// Interaction targeting and outcomes.
pub mod resolver;
/// The session aggregate.
pub mod session;
/// Visible subtitle tracking.
pub mod subtitle;
/// Deferred work queue.
pub mod timer;
/// Fade transitions.
pub mod transition;
/// Positional trigger rules.
pub mod triggers;

pub use audio::{AudioCue, AudioSink, NullAudio, TracingAudio};
pub use climax::{ClimaxBeat, ClimaxPhase, ClimaxSequencer};
pub use config::{ClimaxTimings, RuntimeConfig, TransitionTimings};
pub use dialogue::{DialogueEngine, DialoguePhase, DialogueView};
pub use error::{RuntimeError, RuntimeResult};
pub use event::{EventLog, Reentry, SessionEvent, SessionEventKind};
pub use input::{Button, InputState};
pub use movement::MovementBlock;
pub use objective::Objective;
pub use session::{FRAME_MS, Session, Snapshot};
pub use transition::{TransitionController, TransitionPhase};
