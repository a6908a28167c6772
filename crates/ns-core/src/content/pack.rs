//! The content pack container, its JSON form and lookups.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dialogue::{Script, ScriptId};
use crate::effect::Effect;
use crate::error::{ContentError, ContentResult};
use crate::flags::{StoryFlag, StoryFlags};
use crate::interactable::Interactable;
use crate::position::Position;
use crate::scene::SceneId;
use crate::subtitle::Subtitle;

/// Declarative scene rule: once the player passes `beyond` in `scene`, apply
/// `effects`, unless the `unless` flag is already raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRule {
    /// Scene the rule watches.
    pub scene: SceneId,
    /// Fires when the position is strictly greater than this.
    pub beyond: f32,
    /// Suppresses the rule once raised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unless: Option<StoryFlag>,
    /// What happens when it fires.
    pub effects: Vec<Effect>,
}

impl TriggerRule {
    /// Whether the rule's condition holds for the given state.
    pub fn matches(&self, scene: SceneId, position: Position, flags: &StoryFlags) -> bool {
        self.scene == scene
            && position.get() > self.beyond
            && !self.unless.is_some_and(|flag| flags.is_set(flag))
    }
}

/// A scene-specific minimum coordinate the player cannot walk left of.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeftBoundary {
    /// Scene the boundary applies to.
    pub scene: SceneId,
    /// Leftward movement is refused while the position is below this.
    pub min_x: f32,
}

/// Everything the runtime reads but never writes: scripts, catalogs,
/// subtitles, spawn points, trigger rules and boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPack {
    /// Named dialogue scripts.
    pub scripts: Vec<Script>,
    /// Interactables per scene, in catalog order.
    #[serde(default)]
    pub catalogs: BTreeMap<SceneId, Vec<Interactable>>,
    /// Subtitles per scene, in trigger-priority order.
    #[serde(default)]
    pub subtitles: BTreeMap<SceneId, Vec<Subtitle>>,
    /// Where the player stands on entering a scene.
    #[serde(default)]
    pub spawns: BTreeMap<SceneId, f32>,
    /// Position-driven scene rules, in evaluation order.
    #[serde(default)]
    pub triggers: Vec<TriggerRule>,
    /// Leftward movement limits.
    #[serde(default)]
    pub boundaries: Vec<LeftBoundary>,
    /// Notice shown when a boundary refuses movement.
    #[serde(default)]
    pub block_notice: String,
}

impl ContentPack {
    /// Parse a pack from JSON. Does not validate.
    pub fn from_json(json: &str) -> ContentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read, parse and validate a pack file.
    pub fn load(path: &Path) -> ContentResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let pack = Self::from_json(&json)?;
        pack.validate()?;
        info!(
            path = %path.display(),
            scripts = pack.scripts.len(),
            triggers = pack.triggers.len(),
            "content_loaded"
        );
        Ok(pack)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> ContentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a script by name.
    pub fn script(&self, id: ScriptId) -> Option<&Script> {
        self.scripts.iter().find(|script| script.id == id)
    }

    /// Catalog for a scene; empty when the scene has none.
    pub fn catalog(&self, scene: SceneId) -> &[Interactable] {
        self.catalogs.get(&scene).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Subtitles for a scene; empty when the scene has none.
    pub fn subtitles(&self, scene: SceneId) -> &[Subtitle] {
        self.subtitles.get(&scene).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Spawn coordinate for a scene.
    pub fn spawn(&self, scene: SceneId) -> Option<Position> {
        self.spawns.get(&scene).copied().map(Position::new)
    }

    /// Leftward limit for a scene, if it has one.
    pub fn left_boundary(&self, scene: SceneId) -> Option<f32> {
        self.boundaries
            .iter()
            .find(|boundary| boundary.scene == scene)
            .map(|boundary| boundary.min_x)
    }
}
