use colored::Colorize;
use ns_core::SceneId;

use super::Sources;

pub fn run(sources: &Sources) -> Result<(), String> {
    let pack = sources.raw_content()?;
    let problems = pack.problems();

    for problem in &problems {
        eprintln!("  {} {problem}", "error:".red().bold());
    }
    if !problems.is_empty() {
        return Err(format!(
            "{} problem{} in '{}'",
            problems.len(),
            if problems.len() == 1 { "" } else { "s" },
            sources.content_name()
        ));
    }

    if sources.config.is_some() {
        sources.config()?;
    }

    let interactables: usize = SceneId::ALL.iter().map(|s| pack.catalog(*s).len()).sum();
    let subtitles: usize = SceneId::ALL.iter().map(|s| pack.subtitles(*s).len()).sum();

    println!("  All checks passed for '{}'.", sources.content_name());
    println!(
        "  {} scripts, {} interactables, {} subtitles, {} trigger rules",
        pack.scripts.len(),
        interactables,
        subtitles,
        pack.triggers.len()
    );

    Ok(())
}
