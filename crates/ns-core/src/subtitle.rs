//! Proximity-triggered subtitles.

use serde::{Deserialize, Serialize};

const MIN_AUTO_DURATION_MS: u64 = 3000;
const AUTO_MS_PER_CHAR: u64 = 200;

/// A line of ambient text shown when the player walks near a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtitle {
    /// Identifier, unique within its scene.
    pub id: String,
    /// Coordinate that triggers the subtitle.
    pub trigger_x: f32,
    /// Displayed text. May contain line breaks.
    pub text: String,
    /// Attributed voice, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// Explicit display time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Play the whisper cue when shown.
    #[serde(default)]
    pub whisper: bool,
}

impl Subtitle {
    /// Create a subtitle with an automatic duration.
    pub fn new(id: impl Into<String>, trigger_x: f32, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            trigger_x,
            text: text.into(),
            speaker: None,
            duration_ms: None,
            whisper: false,
        }
    }

    /// Set the speaker.
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    /// Set an explicit duration.
    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    /// Mark as a whisper.
    pub fn whispered(mut self) -> Self {
        self.whisper = true;
        self
    }

    /// How long the subtitle stays up: explicit, or scaled by text length.
    pub fn effective_duration_ms(&self) -> u64 {
        self.duration_ms.unwrap_or_else(|| {
            let chars = self.text.chars().count() as u64;
            (chars * AUTO_MS_PER_CHAR).max(MIN_AUTO_DURATION_MS)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_duration_wins() {
        let s = Subtitle::new("f1", 10.0, "x").with_duration_ms(4500);
        assert_eq!(s.effective_duration_ms(), 4500);
    }

    #[test]
    fn short_text_gets_floor() {
        let s = Subtitle::new("s1", 15.0, "看不見嗎...");
        assert_eq!(s.effective_duration_ms(), 3000);
    }

    #[test]
    fn long_text_scales() {
        let text: String = std::iter::repeat_n('字', 20).collect();
        let s = Subtitle::new("long", 50.0, text);
        assert_eq!(s.effective_duration_ms(), 4000);
    }
}
