//! The ordered scenes of the story.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// One discrete stage of the story, with its own position axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneId {
    /// Title screen, before the session starts.
    Intro,
    /// The dark forest the player wakes up in.
    Forest,
    /// Where the guide's voice is first heard.
    Meeting,
    /// The clearing with the empty flower pot.
    Search,
    /// The lily path leading to the shrine door.
    Path,
    /// Inside the shrine, with the three altars.
    Temple,
    /// The scripted finale.
    Climax,
    /// Reserved terminal scene.
    Ending,
}

impl SceneId {
    /// Every scene in story order.
    pub const ALL: [SceneId; 8] = [
        SceneId::Intro,
        SceneId::Forest,
        SceneId::Meeting,
        SceneId::Search,
        SceneId::Path,
        SceneId::Temple,
        SceneId::Climax,
        SceneId::Ending,
    ];

    /// Stable lowercase token used in content files and on the command line.
    pub fn token(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Forest => "forest",
            Self::Meeting => "meeting",
            Self::Search => "search",
            Self::Path => "path",
            Self::Temple => "temple",
            Self::Climax => "climax",
            Self::Ending => "ending",
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for SceneId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|scene| scene.token() == lower)
            .ok_or_else(|| ParseError::UnknownScene(s.to_string()))
    }
}
