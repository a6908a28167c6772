//! Position-based scene trigger rules.

use ns_core::{Position, SceneId, StoryFlags, TriggerRule};

/// Rules whose condition holds, in content order.
pub fn matching<'a>(
    rules: &'a [TriggerRule],
    scene: SceneId,
    position: Position,
    flags: &'a StoryFlags,
) -> impl Iterator<Item = &'a TriggerRule> + 'a {
    rules
        .iter()
        .filter(move |rule| rule.matches(scene, position, flags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_core::{ContentPack, Effect, StoryFlag};

    #[test]
    fn forest_exit_fires_past_threshold() {
        let pack = ContentPack::builtin();
        let flags = StoryFlags::new();
        let fired: Vec<_> =
            matching(&pack.triggers, SceneId::Forest, Position::new(98.5), &flags).collect();
        assert_eq!(fired.len(), 1);
        assert!(matches!(
            fired[0].effects[0],
            Effect::Transition {
                scene: SceneId::Meeting,
                ..
            }
        ));
        assert_eq!(
            matching(&pack.triggers, SceneId::Forest, Position::new(98.0), &flags).count(),
            0
        );
    }

    #[test]
    fn meeting_rule_is_idempotent() {
        let pack = ContentPack::builtin();
        let mut flags = StoryFlags::new();
        assert_eq!(
            matching(&pack.triggers, SceneId::Meeting, Position::new(65.0), &flags).count(),
            1
        );
        flags.raise(StoryFlag::MetGuide);
        assert_eq!(
            matching(&pack.triggers, SceneId::Meeting, Position::new(65.0), &flags).count(),
            0
        );
    }
}
