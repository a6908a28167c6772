//! One frame of walking.

use ns_core::{Facing, Position};

/// Why the player cannot move this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementBlock {
    /// Still on the title screen.
    NotStarted,
    /// The ending or epilogue is showing.
    Ended,
    /// Dialogue is on screen.
    Dialogue,
    /// The player is lying down.
    LyingDown,
    /// A scene transition is in flight.
    Transition,
    /// The finale has taken over.
    Climax,
}

/// Directions held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heading {
    /// Left held.
    pub left: bool,
    /// Right held.
    pub right: bool,
}

/// Result of one movement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// New position.
    pub position: Position,
    /// New facing.
    pub facing: Facing,
    /// Whether the player moved this frame.
    pub moving: bool,
    /// Leftward input hit the scene boundary.
    pub hit_boundary: bool,
    /// Rightward input was held.
    pub pressed_right: bool,
}

/// Compute one frame of movement. `dt_ms` is already capped.
///
/// Right is applied first, then left. Left is refused while the position is
/// below the scene's boundary. Opposite inputs cancel out.
pub fn step(
    position: Position,
    facing: Facing,
    heading: Heading,
    dt_ms: f32,
    speed: f32,
    left_boundary: Option<f32>,
) -> Step {
    let mut delta = 0.0;
    let mut facing = facing;
    let mut hit_boundary = false;

    if heading.right {
        delta += speed * dt_ms;
        facing = Facing::Right;
    }
    if heading.left {
        if left_boundary.is_some_and(|min_x| position.get() < min_x) {
            hit_boundary = true;
        } else {
            delta -= speed * dt_ms;
            facing = Facing::Left;
        }
    }

    let moving = delta != 0.0;
    Step {
        position: if moving { position.offset(delta) } else { position },
        facing,
        moving,
        hit_boundary,
        pressed_right: heading.right,
    }
}
