//! Finale stages.

use serde::{Deserialize, Serialize};

/// Visual stage of the finale. Never decreases within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimaxStep {
    /// No finale in progress.
    #[default]
    Normal,
    /// The shadow has risen behind the altar.
    ShadowEmerged,
    /// The vines have struck.
    VinesSmashed,
}

impl ClimaxStep {
    /// Numeric stage, 0 to 2.
    pub fn index(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::ShadowEmerged => 1,
            Self::VinesSmashed => 2,
        }
    }

    /// Whether the finale has taken over the player.
    pub fn is_active(self) -> bool {
        self != Self::Normal
    }
}
