//! Story flags and the player's inventory.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A named fact recording irreversible story progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryFlag {
    /// The guide has introduced herself.
    MetGuide,
    /// The lost seed has been found.
    HasSeed,
    /// The seed has been returned to its pot.
    SeedPlanted,
    /// The player walked through the shrine door.
    EnteredTemple,
    /// First altar step.
    FlowerPlaced,
    /// Second altar step.
    IncenseLit,
    /// Third altar step.
    WineDrunk,
}

impl StoryFlag {
    /// Every flag, in declaration order.
    pub const ALL: [StoryFlag; 7] = [
        StoryFlag::MetGuide,
        StoryFlag::HasSeed,
        StoryFlag::SeedPlanted,
        StoryFlag::EnteredTemple,
        StoryFlag::FlowerPlaced,
        StoryFlag::IncenseLit,
        StoryFlag::WineDrunk,
    ];

    /// The three flags whose conjunction starts the climax.
    pub const ALTAR: [StoryFlag; 3] = [
        StoryFlag::FlowerPlaced,
        StoryFlag::IncenseLit,
        StoryFlag::WineDrunk,
    ];

    const fn index(self) -> usize {
        match self {
            Self::MetGuide => 0,
            Self::HasSeed => 1,
            Self::SeedPlanted => 2,
            Self::EnteredTemple => 3,
            Self::FlowerPlaced => 4,
            Self::IncenseLit => 5,
            Self::WineDrunk => 6,
        }
    }

    /// Stable token used in content files.
    pub fn token(self) -> &'static str {
        match self {
            Self::MetGuide => "met_guide",
            Self::HasSeed => "has_seed",
            Self::SeedPlanted => "seed_planted",
            Self::EnteredTemple => "entered_temple",
            Self::FlowerPlaced => "flower_placed",
            Self::IncenseLit => "incense_lit",
            Self::WineDrunk => "wine_drunk",
        }
    }
}

impl fmt::Display for StoryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for StoryFlag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|flag| flag.token() == lower)
            .ok_or_else(|| ParseError::UnknownFlag(s.to_string()))
    }
}

/// The fixed set of story flags. Monotonic: a raised flag is never lowered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoryFlags {
    raised: [bool; StoryFlag::ALL.len()],
}

impl StoryFlags {
    /// All flags lowered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a flag is raised.
    pub fn is_set(&self, flag: StoryFlag) -> bool {
        self.raised[flag.index()]
    }

    /// Raise a flag. Returns `true` only when the flag was previously lowered.
    pub fn raise(&mut self, flag: StoryFlag) -> bool {
        let slot = &mut self.raised[flag.index()];
        let newly = !*slot;
        *slot = true;
        newly
    }

    /// Whether all three altar steps are done.
    pub fn altar_complete(&self) -> bool {
        StoryFlag::ALTAR.iter().all(|flag| self.is_set(*flag))
    }

    /// Raised flags in declaration order.
    pub fn raised(&self) -> impl Iterator<Item = StoryFlag> + '_ {
        StoryFlag::ALL.into_iter().filter(|flag| self.is_set(*flag))
    }
}

/// Items the player is carrying, in pickup order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    /// An empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the named item is carried.
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|held| held == item)
    }

    /// Add an item. Returns `false` if it was already carried.
    pub fn give(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if self.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove an item. Returns `false` if it was not carried.
    pub fn take(&mut self, item: &str) -> bool {
        match self.items.iter().position(|held| held == item) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Carried items in pickup order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Whether nothing is carried.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_is_monotonic_and_reports_novelty() {
        let mut flags = StoryFlags::new();
        assert!(!flags.is_set(StoryFlag::HasSeed));
        assert!(flags.raise(StoryFlag::HasSeed));
        assert!(!flags.raise(StoryFlag::HasSeed));
        assert!(flags.is_set(StoryFlag::HasSeed));
    }

    #[test]
    fn altar_needs_all_three() {
        let mut flags = StoryFlags::new();
        flags.raise(StoryFlag::FlowerPlaced);
        flags.raise(StoryFlag::IncenseLit);
        assert!(!flags.altar_complete());
        flags.raise(StoryFlag::WineDrunk);
        assert!(flags.altar_complete());
    }

    #[test]
    fn raised_lists_in_order() {
        let mut flags = StoryFlags::new();
        flags.raise(StoryFlag::WineDrunk);
        flags.raise(StoryFlag::MetGuide);
        let raised: Vec<_> = flags.raised().collect();
        assert_eq!(raised, vec![StoryFlag::MetGuide, StoryFlag::WineDrunk]);
    }

    #[test]
    fn flag_tokens_parse() {
        assert_eq!("met-guide".parse::<StoryFlag>().unwrap(), StoryFlag::MetGuide);
        assert_eq!("WINE_DRUNK".parse::<StoryFlag>().unwrap(), StoryFlag::WineDrunk);
        assert!("courage".parse::<StoryFlag>().is_err());
    }

    #[test]
    fn inventory_does_not_duplicate() {
        let mut inv = Inventory::new();
        assert!(inv.give("seed"));
        assert!(!inv.give("seed"));
        assert_eq!(inv.items().len(), 1);
        assert!(inv.take("seed"));
        assert!(!inv.take("seed"));
        assert!(inv.is_empty());
    }
}
