//! Story model for Ninesong.
//!
//! Scene identities, the player's scene-local position, story flags and
//! inventory, interactable templates, dialogue scripts, subtitles, and the
//! [`Effect`] vocabulary that continuations are written in. The
//! [`ContentPack`] bundles the static data the runtime consumes and validates
//! it at load time.

/// Climax stages.
pub mod climax;
/// Content pack: built-in story, JSON form, validation.
pub mod content;
/// Dialogue lines and named scripts.
pub mod dialogue;
/// Continuation effects.
pub mod effect;
/// Error types.
pub mod error;
/// Story flags and inventory.
pub mod flags;
/// Interactable templates and derived completion.
pub mod interactable;
/// Scene-local position and facing.
pub mod position;
/// Scene identities.
pub mod scene;
/// Proximity subtitles.
pub mod subtitle;

pub use climax::ClimaxStep;
pub use content::{ContentPack, LeftBoundary, TriggerRule};
pub use dialogue::{DialogueLine, LineEffect, Mood, Script, ScriptId};
pub use effect::{Drone, Effect};
pub use error::{ContentError, ContentResult, ParseError};
pub use flags::{Inventory, StoryFlag, StoryFlags};
pub use interactable::{Interactable, InteractableKind, InteractableView, InteractionCategory};
pub use position::{Facing, Position};
pub use scene::SceneId;
pub use subtitle::Subtitle;
