//! Interaction resolution: which object is targeted, whether it accepts the
//! interaction, and what happens as a result.
//!
//! [`plan`] is pure. It turns a kind and the current flags into the effects
//! the session applies, so every branch can be checked without a session.

use ns_core::{
    ContentPack, Drone, Effect, Interactable, InteractableKind, InteractionCategory, Position,
    SceneId, ScriptId, StoryFlag, StoryFlags, interactable::is_completed,
};

/// Inventory name of the collected seed.
pub const SEED_ITEM: &str = "seed";

/// Why a targeted object ignored the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// Already done.
    Completed,
    /// Only usable in vision mode.
    NeedsVision,
}

/// The first catalog entry strictly within `range` of `position`.
///
/// Catalog order breaks ties, not distance.
pub fn target(catalog: &[Interactable], position: Position, range: f32) -> Option<&Interactable> {
    catalog
        .iter()
        .find(|item| position.distance_to(item.position) < range)
}

/// Per-object preconditions.
pub fn admit(item: &Interactable, flags: &StoryFlags, vision: bool) -> Result<(), Refusal> {
    if is_completed(item.kind, flags) {
        return Err(Refusal::Completed);
    }
    if item.kind.requires_vision() && !vision {
        return Err(Refusal::NeedsVision);
    }
    Ok(())
}

/// Effects of using an object of `kind`. Empty when the object's own
/// requirements are not met.
pub fn plan(
    kind: InteractableKind,
    flags: &StoryFlags,
    content: &ContentPack,
    follow_up_ms: u64,
) -> Vec<Effect> {
    let spawn = |scene: SceneId| content.spawn(scene).unwrap_or_default().get();

    match kind.category() {
        InteractionCategory::Dialogue => kind
            .script()
            .map(|script| Effect::StartScript {
                script,
                on_finish: Vec::new(),
            })
            .into_iter()
            .collect(),
        InteractionCategory::Collect => {
            let (Some(flag), Some(script)) = (kind.completion_flag(), kind.script()) else {
                return Vec::new();
            };
            if flags.is_set(flag) {
                return Vec::new();
            }
            vec![Effect::StartScript {
                script,
                on_finish: vec![
                    Effect::SetFlag { flag },
                    Effect::GiveItem {
                        item: SEED_ITEM.to_string(),
                    },
                ],
            }]
        }
        InteractionCategory::Deposit => {
            let (Some(flag), Some(required), Some(script)) =
                (kind.completion_flag(), kind.required_flag(), kind.script())
            else {
                return Vec::new();
            };
            if !flags.is_set(required) || flags.is_set(flag) {
                return Vec::new();
            }
            vec![
                Effect::SetFlag { flag },
                Effect::TakeItem {
                    item: SEED_ITEM.to_string(),
                },
                Effect::StartScript {
                    script,
                    on_finish: vec![
                        Effect::StopDrone,
                        Effect::Transition {
                            scene: SceneId::Path,
                            position: spawn(SceneId::Path),
                            on_midpoint: vec![Effect::After {
                                delay_ms: follow_up_ms,
                                effects: vec![Effect::StartDrone {
                                    drone: Drone::Chanting,
                                }],
                            }],
                        },
                    ],
                },
            ]
        }
        InteractionCategory::Door => {
            let Some(script) = kind.script() else {
                return Vec::new();
            };
            vec![Effect::StartScript {
                script,
                on_finish: vec![Effect::Transition {
                    scene: SceneId::Temple,
                    position: spawn(SceneId::Temple),
                    on_midpoint: vec![
                        Effect::StartDrone {
                            drone: Drone::Chanting,
                        },
                        Effect::SetFlag {
                            flag: StoryFlag::EnteredTemple,
                        },
                        Effect::After {
                            delay_ms: follow_up_ms,
                            effects: vec![Effect::StartScript {
                                script: ScriptId::TempleIntro,
                                on_finish: Vec::new(),
                            }],
                        },
                    ],
                }],
            }]
        }
        InteractionCategory::Altar => kind
            .completion_flag()
            .map(|flag| Effect::SetFlag { flag })
            .into_iter()
            .collect(),
    }
}
