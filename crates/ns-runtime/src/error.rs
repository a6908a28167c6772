//! Errors raised when building a session.

use ns_core::ContentError;

/// Result type for session construction and configuration.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Failures that can only happen before a session runs. Once a session is
/// built, gameplay operations never fail: invalid requests are dropped.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The content pack did not validate.
    #[error("invalid content: {0}")]
    Content(#[from] ContentError),

    /// A tuning file could not be parsed.
    #[error("malformed runtime config: {0}")]
    MalformedConfig(#[from] serde_json::Error),

    /// A tuning value is unusable.
    #[error("invalid runtime config: {0}")]
    InvalidConfig(String),
}
