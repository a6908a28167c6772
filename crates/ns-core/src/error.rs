//! Error types for the story model and content pack.

use thiserror::Error;

use crate::dialogue::ScriptId;
use crate::scene::SceneId;

/// Result type for content loading and validation.
pub type ContentResult<T> = Result<T, ContentError>;

/// A token could not be parsed into one of the model's enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not a known scene token.
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// Not a known story flag token.
    #[error("unknown story flag: {0}")]
    UnknownFlag(String),
}

/// Problems found while loading or validating a content pack.
///
/// These are programmer errors in the content and are reported at load time,
/// never mid-session.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The pack is not valid JSON or does not match the schema.
    #[error("malformed content pack: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The pack file could not be read.
    #[error("cannot read content pack {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A script the runtime depends on is absent.
    #[error("script '{0}' is missing")]
    MissingScript(ScriptId),

    /// A script exists but has no lines.
    #[error("script '{0}' has no lines")]
    EmptyScript(ScriptId),

    /// A coordinate lies outside the scene axis.
    #[error("{what} in scene '{scene}' is at {position}, outside 0..=100")]
    OutOfRange {
        /// Scene the coordinate belongs to.
        scene: SceneId,
        /// Human-readable description of the offending item.
        what: String,
        /// The rejected coordinate.
        position: f32,
    },

    /// Two interactables or subtitles in one scene share an id.
    #[error("duplicate id '{id}' in scene '{scene}'")]
    DuplicateId {
        /// Scene containing the duplicate.
        scene: SceneId,
        /// The repeated id.
        id: String,
    },

    /// A scene the runtime transitions into has no spawn point.
    #[error("scene '{0}' has no spawn point")]
    MissingSpawn(SceneId),

    /// A subtitle or line has empty text.
    #[error("empty text in {0}")]
    EmptyText(String),
}
