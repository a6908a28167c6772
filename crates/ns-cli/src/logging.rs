//! `tracing` subscriber setup.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log to stderr. Quiet unless `RUST_LOG` asks for more, so command output
/// stays readable.
pub fn init_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(filter("warn"))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Log to a file, for when the terminal belongs to the TUI.
pub fn init_file(path: &Path) -> Result<(), String> {
    let file = File::create(path)
        .map_err(|e| format!("cannot open log file {}: {e}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter("info"))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
    Ok(())
}
