//! World objects the player can interact with, and their derived completion.

use serde::{Deserialize, Serialize};

use crate::dialogue::ScriptId;
use crate::flags::{StoryFlag, StoryFlags};

/// What an interactable is, which decides how the resolver dispatches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractableKind {
    /// The hidden seed. Only reachable in vision mode.
    Seed,
    /// The flower pot the seed belongs in.
    Pot,
    /// First altar: the flower.
    AltarFlower,
    /// Second altar: the incense.
    AltarIncense,
    /// Third altar: the wine.
    AltarWine,
    /// The lily on the path.
    Lily,
    /// The shrine door.
    Door,
    /// The moving shadows on the shrine wall.
    Shadow,
    /// The guide herself.
    Guide,
}

/// How the interaction resolver treats a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionCategory {
    /// Plays a script, changes nothing.
    Dialogue,
    /// Plays a script, then raises a flag.
    Collect,
    /// Requires a collected flag; raises its own flag and then moves on.
    Deposit,
    /// Plays a script, then transitions and chains a second script.
    Door,
    /// Raises one of the altar flags.
    Altar,
}

impl InteractableKind {
    /// Resolver category.
    pub fn category(self) -> InteractionCategory {
        match self {
            Self::Lily | Self::Shadow | Self::Guide => InteractionCategory::Dialogue,
            Self::Seed => InteractionCategory::Collect,
            Self::Pot => InteractionCategory::Deposit,
            Self::Door => InteractionCategory::Door,
            Self::AltarFlower | Self::AltarIncense | Self::AltarWine => InteractionCategory::Altar,
        }
    }

    /// The flag whose presence marks this kind as done, if any.
    pub fn completion_flag(self) -> Option<StoryFlag> {
        match self {
            Self::Seed => Some(StoryFlag::HasSeed),
            Self::Pot => Some(StoryFlag::SeedPlanted),
            Self::AltarFlower => Some(StoryFlag::FlowerPlaced),
            Self::AltarIncense => Some(StoryFlag::IncenseLit),
            Self::AltarWine => Some(StoryFlag::WineDrunk),
            Self::Lily | Self::Door | Self::Shadow | Self::Guide => None,
        }
    }

    /// The flag a deposit kind needs before it accepts anything.
    pub fn required_flag(self) -> Option<StoryFlag> {
        match self {
            Self::Pot => Some(StoryFlag::HasSeed),
            _ => None,
        }
    }

    /// The script this kind plays when used, if any.
    pub fn script(self) -> Option<ScriptId> {
        match self {
            Self::Seed => Some(ScriptId::FoundSeed),
            Self::Pot => Some(ScriptId::PlantedSeed),
            Self::Lily => Some(ScriptId::LilyEncounter),
            Self::Door => Some(ScriptId::BeforeTemple),
            Self::Shadow => Some(ScriptId::Shadows),
            Self::Guide => Some(ScriptId::TempleRepeat),
            Self::AltarFlower | Self::AltarIncense | Self::AltarWine => None,
        }
    }

    /// Whether the object is only usable while vision mode is on.
    pub fn requires_vision(self) -> bool {
        matches!(self, Self::Seed)
    }
}

/// Static template for a world object. Never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interactable {
    /// Identifier, unique within its scene.
    pub id: String,
    /// Coordinate on the scene axis.
    pub position: f32,
    /// Prompt label shown when in range.
    pub label: String,
    /// Dispatch kind.
    pub kind: InteractableKind,
}

impl Interactable {
    /// Create a template.
    pub fn new(
        id: impl Into<String>,
        position: f32,
        label: impl Into<String>,
        kind: InteractableKind,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            label: label.into(),
            kind,
        }
    }

    /// Project the template against the current flags.
    pub fn view<'a>(&'a self, flags: &StoryFlags) -> InteractableView<'a> {
        InteractableView {
            template: self,
            completed: is_completed(self.kind, flags),
        }
    }
}

/// Whether a kind counts as done given the flags. Pure; never cached.
pub fn is_completed(kind: InteractableKind, flags: &StoryFlags) -> bool {
    kind.completion_flag().is_some_and(|flag| flags.is_set(flag))
}

/// A template annotated with its derived completion status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractableView<'a> {
    /// The static template.
    pub template: &'a Interactable,
    /// Derived from flags at projection time.
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn altar_completion_follows_flags() {
        let altar = Interactable::new("altar_wine", 70.0, "喝酒", InteractableKind::AltarWine);
        let mut flags = StoryFlags::new();
        assert!(!altar.view(&flags).completed);
        flags.raise(StoryFlag::WineDrunk);
        assert!(altar.view(&flags).completed);
    }

    #[test]
    fn dialogue_kinds_never_complete() {
        let mut flags = StoryFlags::new();
        for flag in StoryFlag::ALL {
            flags.raise(flag);
        }
        for kind in [
            InteractableKind::Lily,
            InteractableKind::Door,
            InteractableKind::Shadow,
            InteractableKind::Guide,
        ] {
            assert!(!is_completed(kind, &flags), "{kind:?}");
        }
    }

    #[test]
    fn only_seed_needs_vision() {
        assert!(InteractableKind::Seed.requires_vision());
        assert!(!InteractableKind::Pot.requires_vision());
    }

    #[test]
    fn categories() {
        assert_eq!(InteractableKind::Seed.category(), InteractionCategory::Collect);
        assert_eq!(InteractableKind::Pot.category(), InteractionCategory::Deposit);
        assert_eq!(InteractableKind::Door.category(), InteractionCategory::Door);
        assert_eq!(InteractableKind::AltarIncense.category(), InteractionCategory::Altar);
        assert_eq!(InteractableKind::Guide.category(), InteractionCategory::Dialogue);
    }
}
