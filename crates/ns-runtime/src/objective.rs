//! The next-step hint, a pure function of session state.

use std::fmt;

use ns_core::{Position, SceneId, StoryFlag, StoryFlags};

/// The next-step hint shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Look around the first scene.
    Explore,
    /// Follow the voice.
    FollowVoice,
    /// Find the lost item with vision mode.
    FindLostItem,
    /// Return the item.
    ReturnItem,
    /// Head for the shrine.
    GoToShrine,
    /// First altar step.
    OfferFlower,
    /// Second altar step.
    LightIncense,
    /// Third altar step.
    DrinkWine,
    /// All altar steps done.
    RitualComplete,
    /// Fallback.
    GoDeeper,
}

impl Objective {
    /// Display text.
    pub fn text(self) -> &'static str {
        match self {
            Self::Explore => "調查四周...",
            Self::FollowVoice => "跟隨聲音的來源",
            Self::FindLostItem => "開啟「看取」(F) 尋找遺失之物",
            Self::ReturnItem => "歸還種子至花盆",
            Self::GoToShrine => "前往九姑娘廟",
            Self::OfferFlower => "儀式: 獻上花朵",
            Self::LightIncense => "儀式: 點燃信香",
            Self::DrinkWine => "儀式: 飲下供酒",
            Self::RitualComplete => "儀式完成...",
            Self::GoDeeper => "前往深處",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// First matching rule wins; the order matters because the rules overlap.
pub fn objective(scene: SceneId, position: Position, flags: &StoryFlags) -> Objective {
    if scene == SceneId::Intro || (scene == SceneId::Forest && position.get() < 20.0) {
        Objective::Explore
    } else if !flags.is_set(StoryFlag::MetGuide) {
        Objective::FollowVoice
    } else if !flags.is_set(StoryFlag::HasSeed) {
        Objective::FindLostItem
    } else if !flags.is_set(StoryFlag::SeedPlanted) {
        Objective::ReturnItem
    } else if scene == SceneId::Path {
        Objective::GoToShrine
    } else if scene == SceneId::Temple {
        if !flags.is_set(StoryFlag::FlowerPlaced) {
            Objective::OfferFlower
        } else if !flags.is_set(StoryFlag::IncenseLit) {
            Objective::LightIncense
        } else if !flags.is_set(StoryFlag::WineDrunk) {
            Objective::DrinkWine
        } else {
            Objective::RitualComplete
        }
    } else {
        Objective::GoDeeper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(raised: &[StoryFlag]) -> StoryFlags {
        let mut flags = StoryFlags::new();
        for flag in raised {
            flags.raise(*flag);
        }
        flags
    }

    #[test]
    fn decision_table() {
        use StoryFlag::*;
        let cases = [
            (SceneId::Intro, 50.0, flags(&[])),
            (SceneId::Forest, 10.0, flags(&[])),
            (SceneId::Forest, 30.0, flags(&[])),
            (SceneId::Search, 30.0, flags(&[MetGuide])),
            (SceneId::Search, 30.0, flags(&[MetGuide, HasSeed])),
            (SceneId::Path, 30.0, flags(&[MetGuide, HasSeed, SeedPlanted])),
            (SceneId::Temple, 30.0, flags(&[MetGuide, HasSeed, SeedPlanted])),
            (SceneId::Temple, 30.0, flags(&[MetGuide, HasSeed, SeedPlanted, FlowerPlaced])),
            (
                SceneId::Temple,
                30.0,
                flags(&[MetGuide, HasSeed, SeedPlanted, FlowerPlaced, IncenseLit]),
            ),
            (SceneId::Temple, 30.0, flags(&StoryFlag::ALL)),
            (SceneId::Climax, 30.0, flags(&StoryFlag::ALL)),
        ];
        let table: Vec<String> = cases
            .iter()
            .map(|(scene, x, f)| format!("{scene}@{x}: {}", objective(*scene, Position::new(*x), f)))
            .collect();
        insta::assert_snapshot!(table.join("\n"), @r"
        intro@50: 調查四周...
        forest@10: 調查四周...
        forest@30: 跟隨聲音的來源
        search@30: 開啟「看取」(F) 尋找遺失之物
        search@30: 歸還種子至花盆
        path@30: 前往九姑娘廟
        temple@30: 儀式: 獻上花朵
        temple@30: 儀式: 點燃信香
        temple@30: 儀式: 飲下供酒
        temple@30: 儀式完成...
        climax@30: 前往深處
        ");
    }

    #[test]
    fn earlier_rule_shadows_later_ones() {
        // Altar flags alone do not skip the earlier story steps.
        let f = flags(&[StoryFlag::FlowerPlaced, StoryFlag::IncenseLit, StoryFlag::WineDrunk]);
        assert_eq!(objective(SceneId::Temple, Position::new(30.0), &f), Objective::FollowVoice);
    }
}
