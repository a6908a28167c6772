//! Headless playback of a timed input script.
//!
//! A script is plain text, one step per line, `#` starts a comment:
//!
//! ```text
//! start
//! wait 3500
//! finish            # play the open dialogue through
//! hold right 2000   # press, wait, release
//! tap interact
//! press left
//! wait 500ms
//! release left
//! ```

use std::fs;
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use ns_runtime::{Button, NullAudio, Session, SessionEventKind};
use tracing::info;

use super::Sources;

/// One line of an input script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Start,
    Wait(u64),
    Press(Button),
    Release(Button),
    Tap(Button),
    Hold(Button, u64),
    Finish,
}

pub fn run(sources: &Sources, script: &Path, cues: bool) -> Result<(), String> {
    let text = fs::read_to_string(script)
        .map_err(|e| format!("cannot read {}: {e}", script.display()))?;
    let steps = parse(&text)?;
    info!(path = %script.display(), steps = steps.len(), "replay_loaded");

    let mut session = sources.session(Box::new(NullAudio))?;
    for step in &steps {
        apply(&mut session, *step);
    }

    println!(
        "  {} '{}' {}",
        "Replay".bold(),
        script.display(),
        format!("({} steps, {} ms)", steps.len(), session.now_ms()).dimmed()
    );
    println!();

    println!("  {}", "Event Log".bold().underline());
    println!();
    let mut shown = 0;
    for event in session.events().events() {
        if !cues && matches!(event.kind, SessionEventKind::Cue { .. }) {
            continue;
        }
        shown += 1;
        let at = format!("[{:>6} ms]", event.at_ms).dimmed();
        let line = format!("{} {}", event.kind.label(), event.description);
        println!("  {at} {}", colorize(&event.kind, &line));
    }
    if shown == 0 {
        println!("  {}", "(no events)".dimmed());
    }
    println!();

    println!("  {}", "Final State".bold().underline());
    println!();
    println!("{}", final_state(&session));

    Ok(())
}

fn apply(session: &mut Session, step: Step) {
    match step {
        Step::Start => session.start(),
        Step::Wait(ms) => session.advance(ms),
        Step::Press(button) => session.key_down(button),
        Step::Release(button) => session.key_up(button),
        Step::Tap(button) => {
            session.key_down(button);
            session.key_up(button);
        }
        Step::Hold(button, ms) => {
            session.key_down(button);
            session.advance(ms);
            session.key_up(button);
        }
        Step::Finish => {
            while session.dialogue().is_some() {
                session.advance_dialogue();
            }
        }
    }
}

fn parse(script: &str) -> Result<Vec<Step>, String> {
    let mut steps = Vec::new();
    for (index, raw) in script.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let step = parse_step(&words).map_err(|e| format!("line {}: {e}", index + 1))?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_step(words: &[&str]) -> Result<Step, String> {
    match words {
        ["start"] => Ok(Step::Start),
        ["finish"] => Ok(Step::Finish),
        ["wait", ms] => Ok(Step::Wait(millis(ms)?)),
        ["press", button] => Ok(Step::Press(button.parse()?)),
        ["release", button] => Ok(Step::Release(button.parse()?)),
        ["tap", button] => Ok(Step::Tap(button.parse()?)),
        ["hold", button, ms] => Ok(Step::Hold(button.parse()?, millis(ms)?)),
        _ => Err(format!("unknown or malformed step '{}'", words.join(" "))),
    }
}

fn millis(text: &str) -> Result<u64, String> {
    text.trim_end_matches("ms")
        .parse()
        .map_err(|_| format!("'{text}' is not a duration in milliseconds"))
}

fn colorize(kind: &SessionEventKind, text: &str) -> String {
    match kind {
        SessionEventKind::SceneChanged { .. } => text.cyan().to_string(),
        SessionEventKind::FlagSet { .. }
        | SessionEventKind::ItemGiven { .. }
        | SessionEventKind::ItemTaken { .. } => text.green().to_string(),
        SessionEventKind::DialogueStarted { .. } | SessionEventKind::DialogueFinished { .. } => {
            text.yellow().to_string()
        }
        SessionEventKind::ClimaxScheduled
        | SessionEventKind::ClimaxStep { .. }
        | SessionEventKind::Epilogue => text.red().bold().to_string(),
        SessionEventKind::ReentryDropped { .. } => text.red().to_string(),
        SessionEventKind::Cue { .. } => text.dimmed().to_string(),
        _ => text.to_string(),
    }
}

fn final_state(session: &Session) -> Table {
    let snap = session.snapshot();
    let flags: Vec<String> = snap.flags.raised().map(|f| f.to_string()).collect();
    let or_dash = |items: Vec<String>| {
        if items.is_empty() {
            "—".to_string()
        } else {
            items.join(", ")
        }
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["scene".to_string(), snap.scene.to_string()]);
    table.add_row(vec![
        "position".to_string(),
        format!("{:.2}", snap.position.get()),
    ]);
    table.add_row(vec!["facing".to_string(), format!("{:?}", snap.facing)]);
    table.add_row(vec!["flags".to_string(), or_dash(flags)]);
    table.add_row(vec![
        "inventory".to_string(),
        or_dash(snap.inventory.items().to_vec()),
    ]);
    table.add_row(vec!["vision".to_string(), snap.vision.to_string()]);
    table.add_row(vec![
        "climax step".to_string(),
        snap.climax_step.index().to_string(),
    ]);
    table.add_row(vec!["objective".to_string(), session.objective().to_string()]);
    table.add_row(vec!["ended".to_string(), session.is_ended().to_string()]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_kind() {
        let steps = parse(
            "# opening\nstart\nwait 3500\nfinish\nhold right 2000ms\n\npress left\nrelease left\ntap vision  # look\n",
        )
        .unwrap();
        assert_eq!(
            steps,
            [
                Step::Start,
                Step::Wait(3500),
                Step::Finish,
                Step::Hold(Button::Right, 2000),
                Step::Press(Button::Left),
                Step::Release(Button::Left),
                Step::Tap(Button::ToggleVision),
            ]
        );
    }

    #[test]
    fn reports_line_of_bad_step() {
        let err = parse("start\nwait soon\n").unwrap_err();
        assert!(err.starts_with("line 2:"), "{err}");
        let err = parse("start\njump\n").unwrap_err();
        assert!(err.contains("jump"), "{err}");
    }

    #[test]
    fn unknown_button_is_rejected() {
        assert!(parse("press up").is_err());
    }

    #[test]
    fn opening_replay_reaches_meeting() {
        let steps = parse("start\nwait 3500\nfinish\nhold right 11000\nwait 3300\n").unwrap();
        let mut session = Session::new(
            ns_core::ContentPack::builtin(),
            ns_runtime::RuntimeConfig::default(),
            Box::new(NullAudio),
        )
        .unwrap();
        for step in steps {
            apply(&mut session, step);
        }
        assert_eq!(session.scene(), ns_core::SceneId::Meeting);
    }
}
