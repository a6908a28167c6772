//! Static story content: the pack type, the built-in story and load-time
//! validation.

mod builtin;
mod pack;
mod validate;

pub use pack::{ContentPack, LeftBoundary, TriggerRule};
