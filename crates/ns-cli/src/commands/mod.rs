pub mod catalog;
pub mod check;
pub mod export;
pub mod play;
pub mod replay;

use std::fs;
use std::path::{Path, PathBuf};

use ns_core::ContentPack;
use ns_runtime::{AudioSink, RuntimeConfig, Session};

/// Where content and tuning come from.
pub struct Sources {
    /// Content pack JSON, or the built-in story.
    pub content: Option<PathBuf>,
    /// Tuning JSON, or the defaults.
    pub config: Option<PathBuf>,
}

impl Sources {
    /// Load and validate the content pack.
    pub fn content(&self) -> Result<ContentPack, String> {
        match &self.content {
            Some(path) => ContentPack::load(path).map_err(|e| e.to_string()),
            None => Ok(ContentPack::builtin()),
        }
    }

    /// Parse the content pack without validating it.
    fn raw_content(&self) -> Result<ContentPack, String> {
        match &self.content {
            Some(path) => ContentPack::from_json(&read(path)?).map_err(|e| e.to_string()),
            None => Ok(ContentPack::builtin()),
        }
    }

    /// Load the tuning file.
    pub fn config(&self) -> Result<RuntimeConfig, String> {
        match &self.config {
            Some(path) => RuntimeConfig::from_json(&read(path)?).map_err(|e| e.to_string()),
            None => Ok(RuntimeConfig::default()),
        }
    }

    /// A fresh session over the selected content and tuning.
    pub fn session(&self, audio: Box<dyn AudioSink>) -> Result<Session, String> {
        Session::new(self.content()?, self.config()?, audio).map_err(|e| e.to_string())
    }

    /// Display name for the selected content.
    fn content_name(&self) -> String {
        self.content
            .as_ref()
            .map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
    }
}

fn read(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}
