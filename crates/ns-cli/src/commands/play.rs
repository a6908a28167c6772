use ns_runtime::TracingAudio;

use super::Sources;

pub fn run(sources: &Sources) -> Result<(), String> {
    let session = sources.session(Box::new(TracingAudio))?;
    crate::tui::run(session)
}
