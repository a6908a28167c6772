//! Scene-local player coordinate.

use serde::{Deserialize, Serialize};

/// A coordinate on a scene axis, always within `[MIN, MAX]`.
///
/// Positions are scene-local: entering a scene places the player at that
/// scene's spawn point instead of carrying the old coordinate over.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Position(f32);

impl Position {
    /// Left edge of every scene.
    pub const MIN: f32 = 0.0;
    /// Right edge of every scene.
    pub const MAX: f32 = 100.0;

    /// Create a position, clamping into the scene axis. NaN maps to the left edge.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// The raw coordinate.
    pub fn get(self) -> f32 {
        self.0
    }

    /// Move by a signed delta, clamped.
    pub fn offset(self, delta: f32) -> Self {
        Self::new(self.0 + delta)
    }

    /// Absolute distance to a point on the same axis.
    pub fn distance_to(self, x: f32) -> f32 {
        (self.0 - x).abs()
    }

    /// Whether a raw coordinate lies on the axis without clamping.
    pub fn in_range(x: f32) -> bool {
        (Self::MIN..=Self::MAX).contains(&x)
    }
}

impl From<f32> for Position {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Position> for f32 {
    fn from(value: Position) -> Self {
        value.0
    }
}

/// Which way the player sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    /// Towards increasing coordinates.
    #[default]
    Right,
    /// Towards decreasing coordinates.
    Left,
}
