//! Dialogue lines and named scripts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Speaker's emotional register, used by presentation to pick a portrait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Neutral delivery.
    #[default]
    Normal,
    /// Puzzled.
    Confused,
    /// Frightened.
    Scared,
    /// Irritated.
    Angry,
}

/// A transient visual accent attached to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEffect {
    /// Brief shake of the dialogue box.
    Shake,
    /// Hushed, dimmed delivery.
    Whisper,
}

/// One line of a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// Name shown on the speaker tag.
    pub speaker: String,
    /// The full line text.
    pub text: String,
    /// Optional mood.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    /// Optional transient effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<LineEffect>,
}

impl DialogueLine {
    /// A plain line.
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            mood: None,
            effect: None,
        }
    }

    /// Set the mood.
    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    /// Set the effect.
    pub fn with_effect(mut self, effect: LineEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Number of characters to reveal, counted in Unicode scalar values.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Names of the scripts the story plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptId {
    /// Waking up in the forest.
    Intro,
    /// First conversation with the guide.
    Meeting,
    /// Picking up the seed.
    FoundSeed,
    /// Returning the seed to the pot.
    PlantedSeed,
    /// Looking at the lily on the path.
    LilyEncounter,
    /// At the shrine door.
    BeforeTemple,
    /// The guide explains the ritual.
    TempleIntro,
    /// The guide, when spoken to again.
    TempleRepeat,
    /// Looking at the shadows on the shrine wall.
    Shadows,
    /// The finale.
    Climax,
}

impl ScriptId {
    /// Every script the runtime may start.
    pub const ALL: [ScriptId; 10] = [
        ScriptId::Intro,
        ScriptId::Meeting,
        ScriptId::FoundSeed,
        ScriptId::PlantedSeed,
        ScriptId::LilyEncounter,
        ScriptId::BeforeTemple,
        ScriptId::TempleIntro,
        ScriptId::TempleRepeat,
        ScriptId::Shadows,
        ScriptId::Climax,
    ];

    /// Stable token used in content files.
    pub fn token(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Meeting => "meeting",
            Self::FoundSeed => "found_seed",
            Self::PlantedSeed => "planted_seed",
            Self::LilyEncounter => "lily_encounter",
            Self::BeforeTemple => "before_temple",
            Self::TempleIntro => "temple_intro",
            Self::TempleRepeat => "temple_repeat",
            Self::Shadows => "shadows",
            Self::Climax => "climax",
        }
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// An ordered, immutable sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Which script this is.
    pub id: ScriptId,
    /// Lines in playback order.
    pub lines: Vec<DialogueLine>,
}

impl Script {
    /// Create a script from its lines.
    pub fn new(id: ScriptId, lines: Vec<DialogueLine>) -> Self {
        Self { id, lines }
    }

    /// Line count.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the script has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
