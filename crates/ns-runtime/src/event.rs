//! Bounded log of what happened during a session.

use ns_core::{ClimaxStep, SceneId, ScriptId, StoryFlag};

use crate::audio::AudioCue;

/// An operation that was refused because one of its kind was already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reentry {
    /// `start` on a running session.
    Start,
    /// A transition while another was in flight.
    Transition,
    /// A second climax.
    Climax,
    /// A script started over an active one.
    Dialogue,
}

/// What happened.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEventKind {
    /// The session left the title screen.
    Started,
    /// The player stood up after the opening.
    StoodUp,
    /// The active scene changed.
    SceneChanged {
        /// Previous scene.
        from: SceneId,
        /// New scene.
        to: SceneId,
    },
    /// A story flag was raised.
    FlagSet {
        /// The flag.
        flag: StoryFlag,
    },
    /// An item entered the inventory.
    ItemGiven {
        /// Item name.
        item: String,
    },
    /// An item left the inventory.
    ItemTaken {
        /// Item name.
        item: String,
    },
    /// A script began.
    DialogueStarted {
        /// The script.
        script: ScriptId,
    },
    /// A script's last line was acknowledged.
    DialogueFinished {
        /// The script.
        script: ScriptId,
    },
    /// A covered scene change began.
    TransitionStarted {
        /// Destination scene.
        to: SceneId,
    },
    /// The cover reached full and the scene was swapped.
    TransitionMidpoint {
        /// Destination scene.
        to: SceneId,
    },
    /// The cover is gone and the player is free again.
    TransitionFinished,
    /// The finale was queued.
    ClimaxScheduled,
    /// The finale advanced a stage.
    ClimaxStep {
        /// The new stage.
        step: ClimaxStep,
    },
    /// The terminal epilogue is showing.
    Epilogue,
    /// A subtitle appeared.
    SubtitleShown {
        /// Subtitle id.
        id: String,
    },
    /// Leftward movement hit a boundary.
    MovementBlocked {
        /// Scene of the boundary.
        scene: SceneId,
    },
    /// Vision mode was toggled.
    VisionToggled {
        /// New state.
        on: bool,
    },
    /// An audio cue was played.
    Cue {
        /// The cue.
        cue: AudioCue,
    },
    /// A re-entrant request was dropped.
    ReentryDropped {
        /// What was refused.
        what: Reentry,
    },
}

impl SessionEventKind {
    /// Short snake_case label, used in log output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::StoodUp => "stood_up",
            Self::SceneChanged { .. } => "scene_changed",
            Self::FlagSet { .. } => "flag_set",
            Self::ItemGiven { .. } => "item_given",
            Self::ItemTaken { .. } => "item_taken",
            Self::DialogueStarted { .. } => "dialogue_started",
            Self::DialogueFinished { .. } => "dialogue_finished",
            Self::TransitionStarted { .. } => "transition_started",
            Self::TransitionMidpoint { .. } => "transition_midpoint",
            Self::TransitionFinished => "transition_finished",
            Self::ClimaxScheduled => "climax_scheduled",
            Self::ClimaxStep { .. } => "climax_step",
            Self::Epilogue => "epilogue",
            Self::SubtitleShown { .. } => "subtitle_shown",
            Self::MovementBlocked { .. } => "movement_blocked",
            Self::VisionToggled { .. } => "vision_toggled",
            Self::Cue { .. } => "cue",
            Self::ReentryDropped { .. } => "reentry_dropped",
        }
    }
}

/// A record of something that happened during a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEvent {
    /// Session time in milliseconds.
    pub at_ms: u64,
    /// The specific kind of event.
    pub kind: SessionEventKind,
    /// A human-readable description.
    pub description: String,
}

impl SessionEvent {
    /// Create an event.
    pub fn new(at_ms: u64, kind: SessionEventKind, description: impl Into<String>) -> Self {
        Self {
            at_ms,
            kind,
            description: description.into(),
        }
    }
}

/// Bounded history of session events.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SessionEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a log with the given capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest if over capacity.
    pub fn push(&mut self, event: SessionEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// All recorded events, oldest first.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Events matching a predicate.
    pub fn matching<F>(&self, mut predicate: F) -> Vec<&SessionEvent>
    where
        F: FnMut(&SessionEventKind) -> bool,
    {
        self.events.iter().filter(|e| predicate(&e.kind)).collect()
    }

    /// Number of events equal to `kind`.
    pub fn count(&self, kind: &SessionEventKind) -> usize {
        self.events.iter().filter(|e| &e.kind == kind).count()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
