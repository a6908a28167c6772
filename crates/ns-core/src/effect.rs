//! Continuations expressed as data.
//!
//! Trigger rules, dialogue completions and transition midpoints all carry a
//! list of [`Effect`]s instead of closures, so they can live in content files
//! and be inspected in tests.

use serde::{Deserialize, Serialize};

use crate::dialogue::ScriptId;
use crate::flags::StoryFlag;
use crate::scene::SceneId;

/// Named ambient loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Drone {
    /// Wind and low hum of the forest.
    Forest,
    /// Distant chanting near the shrine.
    Chanting,
}

impl Drone {
    /// Stable token.
    pub fn token(self) -> &'static str {
        match self {
            Self::Forest => "forest",
            Self::Chanting => "chanting",
        }
    }
}

/// One state change applied by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "do", rename_all = "snake_case")]
pub enum Effect {
    /// Raise a story flag.
    SetFlag {
        /// Flag to raise.
        flag: StoryFlag,
    },
    /// Put an item in the inventory.
    GiveItem {
        /// Item name.
        item: String,
    },
    /// Remove an item from the inventory.
    TakeItem {
        /// Item name.
        item: String,
    },
    /// Switch scene immediately, without a cover.
    SetScene {
        /// Scene to enter.
        scene: SceneId,
        /// New position; keeps the current one when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<f32>,
    },
    /// Covered scene change.
    Transition {
        /// Scene to enter.
        scene: SceneId,
        /// Position after the change.
        position: f32,
        /// Applied at full cover, right after the swap.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        on_midpoint: Vec<Effect>,
    },
    /// Play a script.
    StartScript {
        /// Script to play.
        script: ScriptId,
        /// Applied once the last line is acknowledged.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        on_finish: Vec<Effect>,
    },
    /// Start an ambient loop, replacing any current one.
    StartDrone {
        /// Loop to start.
        drone: Drone,
    },
    /// Silence the ambient loop.
    StopDrone,
    /// Show the vision-mode hint after the runtime's hint delay.
    ShowVisionHint,
    /// Apply effects later.
    After {
        /// Delay in milliseconds.
        delay_ms: u64,
        /// Effects to apply when the delay elapses.
        effects: Vec<Effect>,
    },
}

impl Effect {
    /// Visit this effect and every nested effect, depth first.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Effect)) {
        visit(self);
        let nested: &[Effect] = match self {
            Self::Transition { on_midpoint, .. } => on_midpoint,
            Self::StartScript { on_finish, .. } => on_finish,
            Self::After { effects, .. } => effects,
            _ => &[],
        };
        for effect in nested {
            effect.walk(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_visits_nested() {
        let effect = Effect::StartScript {
            script: ScriptId::Meeting,
            on_finish: vec![
                Effect::SetFlag {
                    flag: StoryFlag::MetGuide,
                },
                Effect::After {
                    delay_ms: 500,
                    effects: vec![Effect::ShowVisionHint],
                },
            ],
        };
        let mut count = 0;
        effect.walk(&mut |_| count += 1);
        assert_eq!(count, 4);
    }

    #[test]
    fn json_is_tagged() {
        let effect = Effect::Transition {
            scene: SceneId::Meeting,
            position: 2.0,
            on_midpoint: Vec::new(),
        };
        let json = serde_json::to_string(&effect).unwrap();
        assert_eq!(json, r#"{"do":"transition","scene":"meeting","position":2.0}"#);
        let back: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, effect);
    }

    #[test]
    fn unit_variant_parses() {
        let effect: Effect = serde_json::from_str(r#"{"do":"stop_drone"}"#).unwrap();
        assert_eq!(effect, Effect::StopDrone);
    }
}
