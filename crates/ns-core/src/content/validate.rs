//! Load-time checks. A pack that passes cannot fail mid-session on a missing
//! script, spawn or out-of-range coordinate.

use std::collections::BTreeSet;

use crate::dialogue::ScriptId;
use crate::effect::Effect;
use crate::error::{ContentError, ContentResult};
use crate::position::Position;
use crate::scene::SceneId;

use super::pack::ContentPack;

/// Scenes the runtime enters without an explicit coordinate in content.
const REQUIRED_SPAWNS: [SceneId; 3] = [SceneId::Forest, SceneId::Path, SceneId::Temple];

impl ContentPack {
    /// Fail on the first problem found.
    pub fn validate(&self) -> ContentResult<()> {
        match self.problems().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Every problem in the pack, in a stable order.
    pub fn problems(&self) -> Vec<ContentError> {
        let mut found = Vec::new();
        self.check_scripts(&mut found);
        self.check_catalogs(&mut found);
        self.check_subtitles(&mut found);
        self.check_spawns(&mut found);
        self.check_rules(&mut found);
        found
    }

    fn check_scripts(&self, found: &mut Vec<ContentError>) {
        for id in ScriptId::ALL {
            match self.script(id) {
                None => found.push(ContentError::MissingScript(id)),
                Some(script) if script.is_empty() => found.push(ContentError::EmptyScript(id)),
                Some(script) => {
                    for (index, line) in script.lines.iter().enumerate() {
                        if line.text.trim().is_empty() {
                            found.push(ContentError::EmptyText(format!(
                                "script '{id}' line {index}"
                            )));
                        }
                    }
                }
            }
        }
    }

    fn check_catalogs(&self, found: &mut Vec<ContentError>) {
        for (&scene, items) in &self.catalogs {
            let mut seen = BTreeSet::new();
            for item in items {
                check_range(found, scene, || format!("interactable '{}'", item.id), item.position);
                if !seen.insert(item.id.as_str()) {
                    found.push(ContentError::DuplicateId {
                        scene,
                        id: item.id.clone(),
                    });
                }
            }
        }
    }

    fn check_subtitles(&self, found: &mut Vec<ContentError>) {
        for (&scene, subtitles) in &self.subtitles {
            let mut seen = BTreeSet::new();
            for subtitle in subtitles {
                check_range(found, scene, || format!("subtitle '{}'", subtitle.id), subtitle.trigger_x);
                if !seen.insert(subtitle.id.as_str()) {
                    found.push(ContentError::DuplicateId {
                        scene,
                        id: subtitle.id.clone(),
                    });
                }
                if subtitle.text.trim().is_empty() {
                    found.push(ContentError::EmptyText(format!(
                        "subtitle '{}' in scene '{scene}'",
                        subtitle.id
                    )));
                }
            }
        }
    }

    fn check_spawns(&self, found: &mut Vec<ContentError>) {
        for (&scene, &x) in &self.spawns {
            check_range(found, scene, || "spawn point".to_string(), x);
        }
        for scene in REQUIRED_SPAWNS {
            if !self.spawns.contains_key(&scene) {
                found.push(ContentError::MissingSpawn(scene));
            }
        }
    }

    fn check_rules(&self, found: &mut Vec<ContentError>) {
        for rule in &self.triggers {
            check_range(found, rule.scene, || "trigger threshold".to_string(), rule.beyond);
            for effect in &rule.effects {
                effect.walk(&mut |nested| match nested {
                    Effect::Transition {
                        scene, position, ..
                    } => check_range(found, *scene, || "transition target".to_string(), *position),
                    Effect::SetScene {
                        scene,
                        position: Some(position),
                    } => check_range(found, *scene, || "scene change target".to_string(), *position),
                    _ => {}
                });
            }
        }
        for boundary in &self.boundaries {
            check_range(found, boundary.scene, || "left boundary".to_string(), boundary.min_x);
        }
    }
}

fn check_range(
    found: &mut Vec<ContentError>,
    scene: SceneId,
    what: impl FnOnce() -> String,
    position: f32,
) {
    if !Position::in_range(position) {
        found.push(ContentError::OutOfRange {
            scene,
            what: what(),
            position,
        });
    }
}
