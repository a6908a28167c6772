//! Typewriter dialogue playback.
//!
//! The engine owns at most one script at a time together with its
//! continuation. It never schedules anything itself: the session schedules
//! reveal and effect-expiry timers carrying a [`LineToken`], and the engine
//! ignores tokens that no longer name the line on screen.

use ns_core::{Effect, LineEffect, Mood, Script, ScriptId};

/// Engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialoguePhase {
    /// No script loaded.
    #[default]
    Idle,
    /// A script is being installed. Only observed inside [`DialogueEngine::start`].
    Loading,
    /// Characters of the current line are being revealed.
    Typing,
    /// The line is fully shown and waits for an advance.
    AwaitingAdvance,
    /// The last line was acknowledged. Only observed inside
    /// [`DialogueEngine::advance`].
    Finished,
}

/// Identity of one line of one script run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineToken {
    generation: u64,
    line: usize,
}

/// What [`DialogueEngine::start`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Started {
    /// Token of line 0.
    pub token: LineToken,
    /// The script that was cleared without running its continuation.
    pub superseded: Option<ScriptId>,
}

/// Result of one reveal timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// The token no longer names a line that is typing.
    Stale,
    /// One more character is visible.
    Typed {
        /// Index of the character just revealed.
        index: usize,
        /// Whether the line is now complete.
        done: bool,
    },
}

/// Result of [`DialogueEngine::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Nothing is playing.
    Idle,
    /// The line was still typing; it is now fully shown.
    Revealed,
    /// The next line started typing.
    NextLine(LineToken),
    /// The script is over. The continuation is handed out exactly once.
    Finished {
        /// The script that ended.
        script: ScriptId,
        /// Its continuation.
        on_finish: Vec<Effect>,
    },
}

#[derive(Debug)]
struct ActiveScript {
    script: Script,
    line: usize,
    revealed: usize,
    on_finish: Vec<Effect>,
    effect_visible: bool,
}

impl ActiveScript {
    fn line_len(&self) -> usize {
        self.script.lines.get(self.line).map_or(0, |l| l.char_count())
    }
}

/// Read-only view of the line on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueView<'a> {
    /// Speaker tag.
    pub speaker: &'a str,
    /// Text typed so far.
    pub shown: &'a str,
    /// The whole line.
    pub full_text: &'a str,
    /// Whether typing is complete.
    pub typing_complete: bool,
    /// Line mood.
    pub mood: Mood,
    /// Visual effect, while it lasts.
    pub effect: Option<LineEffect>,
    /// Zero-based line index.
    pub line: usize,
    /// Lines in the script.
    pub line_count: usize,
    /// Which script is playing.
    pub script: ScriptId,
}

impl DialogueView<'_> {
    /// Whether advancing from this line ends the script.
    pub fn is_last(&self) -> bool {
        self.line + 1 >= self.line_count
    }
}

/// Plays one script at a time.
#[derive(Debug, Default)]
pub struct DialogueEngine {
    generation: u64,
    phase: DialoguePhase,
    active: Option<ActiveScript>,
}

impl DialogueEngine {
    /// An idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a script and start typing its first line. An active script is
    /// cleared first and its continuation is dropped.
    pub fn start(&mut self, script: Script, on_finish: Vec<Effect>) -> Started {
        let superseded = self.active.take().map(|old| old.script.id);
        self.phase = DialoguePhase::Loading;
        self.generation += 1;
        self.active = Some(ActiveScript {
            script,
            line: 0,
            revealed: 0,
            on_finish,
            effect_visible: false,
        });
        let token = self.enter_line(0);
        Started { token, superseded }
    }

    fn enter_line(&mut self, line: usize) -> LineToken {
        if let Some(active) = self.active.as_mut() {
            active.line = line;
            active.revealed = 0;
            active.effect_visible = active
                .script
                .lines
                .get(line)
                .is_some_and(|l| l.effect.is_some());
            self.phase = if active.line_len() == 0 {
                DialoguePhase::AwaitingAdvance
            } else {
                DialoguePhase::Typing
            };
        }
        LineToken {
            generation: self.generation,
            line,
        }
    }

    fn is_current(&self, token: LineToken) -> bool {
        token.generation == self.generation
            && self.active.as_ref().is_some_and(|a| a.line == token.line)
    }

    /// Reveal the next character of the line named by `token`.
    pub fn reveal_next(&mut self, token: LineToken) -> Reveal {
        if self.phase != DialoguePhase::Typing || !self.is_current(token) {
            return Reveal::Stale;
        }
        let Some(active) = self.active.as_mut() else {
            return Reveal::Stale;
        };
        let index = active.revealed;
        active.revealed += 1;
        let done = active.revealed >= active.line_len();
        if done {
            self.phase = DialoguePhase::AwaitingAdvance;
        }
        Reveal::Typed { index, done }
    }

    /// Show the rest of the current line at once. Returns `false` if nothing
    /// was typing.
    pub fn force_show(&mut self) -> bool {
        if self.phase != DialoguePhase::Typing {
            return false;
        }
        if let Some(active) = self.active.as_mut() {
            active.revealed = active.line_len();
        }
        self.phase = DialoguePhase::AwaitingAdvance;
        true
    }

    /// Acknowledge the current line.
    ///
    /// While typing this only completes the text. On a complete line it moves
    /// on, or ends the script and hands back its continuation.
    pub fn advance(&mut self) -> Advance {
        match self.phase {
            DialoguePhase::Idle | DialoguePhase::Loading | DialoguePhase::Finished => Advance::Idle,
            DialoguePhase::Typing => {
                self.force_show();
                Advance::Revealed
            }
            DialoguePhase::AwaitingAdvance => {
                let Some(active) = self.active.as_ref() else {
                    self.phase = DialoguePhase::Idle;
                    return Advance::Idle;
                };
                let next = active.line + 1;
                if next < active.script.len() {
                    return Advance::NextLine(self.enter_line(next));
                }
                self.phase = DialoguePhase::Finished;
                let finished = self.active.take();
                self.phase = DialoguePhase::Idle;
                match finished {
                    Some(done) => Advance::Finished {
                        script: done.script.id,
                        on_finish: done.on_finish,
                    },
                    None => Advance::Idle,
                }
            }
        }
    }

    /// Expire the visual effect of the line named by `token`.
    pub fn clear_effect(&mut self, token: LineToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        match self.active.as_mut() {
            Some(active) if active.effect_visible => {
                active.effect_visible = false;
                true
            }
            _ => false,
        }
    }

    /// Current state.
    pub fn phase(&self) -> DialoguePhase {
        self.phase
    }

    /// Whether a script is loaded.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The script on screen, if any.
    pub fn script_id(&self) -> Option<ScriptId> {
        self.active.as_ref().map(|a| a.script.id)
    }

    /// Token of the line on screen.
    pub fn token(&self) -> Option<LineToken> {
        self.active.as_ref().map(|a| LineToken {
            generation: self.generation,
            line: a.line,
        })
    }

    /// View of the line on screen.
    pub fn view(&self) -> Option<DialogueView<'_>> {
        let active = self.active.as_ref()?;
        let line = active.script.lines.get(active.line)?;
        let cut = line
            .text
            .char_indices()
            .nth(active.revealed)
            .map_or(line.text.len(), |(byte, _)| byte);
        Some(DialogueView {
            speaker: &line.speaker,
            shown: &line.text[..cut],
            full_text: &line.text,
            typing_complete: self.phase == DialoguePhase::AwaitingAdvance,
            mood: line.mood.unwrap_or_default(),
            effect: line.effect.filter(|_| active.effect_visible),
            line: active.line,
            line_count: active.script.len(),
            script: active.script.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_core::{DialogueLine, StoryFlag};

    fn script() -> Script {
        Script::new(
            ScriptId::LilyEncounter,
            vec![
                DialogueLine::new("燕", "好大").with_effect(LineEffect::Shake),
                DialogueLine::new("燕", "花"),
            ],
        )
    }

    fn type_out(engine: &mut DialogueEngine, token: LineToken) {
        while let Reveal::Typed { done: false, .. } = engine.reveal_next(token) {}
    }

    #[test]
    fn start_enters_typing() {
        let mut engine = DialogueEngine::new();
        let started = engine.start(script(), Vec::new());
        assert_eq!(engine.phase(), DialoguePhase::Typing);
        assert_eq!(started.superseded, None);
        let view = engine.view().unwrap();
        assert_eq!(view.shown, "");
        assert_eq!(view.effect, Some(LineEffect::Shake));
    }

    #[test]
    fn reveal_is_char_by_char() {
        let mut engine = DialogueEngine::new();
        let token = engine.start(script(), Vec::new()).token;
        assert_eq!(engine.reveal_next(token), Reveal::Typed { index: 0, done: false });
        assert_eq!(engine.view().unwrap().shown, "好");
        assert_eq!(engine.reveal_next(token), Reveal::Typed { index: 1, done: true });
        assert!(engine.view().unwrap().typing_complete);
        assert_eq!(engine.reveal_next(token), Reveal::Stale);
    }

    #[test]
    fn advance_while_typing_only_reveals() {
        let mut engine = DialogueEngine::new();
        engine.start(script(), Vec::new());
        assert_eq!(engine.advance(), Advance::Revealed);
        let view = engine.view().unwrap();
        assert_eq!(view.line, 0);
        assert_eq!(view.shown, "好大");
        assert_eq!(engine.phase(), DialoguePhase::AwaitingAdvance);
    }

    #[test]
    fn advance_on_complete_line_moves_on_then_finishes() {
        let mut engine = DialogueEngine::new();
        let on_finish = vec![Effect::SetFlag {
            flag: StoryFlag::MetGuide,
        }];
        let token = engine.start(script(), on_finish.clone()).token;
        type_out(&mut engine, token);

        let Advance::NextLine(second) = engine.advance() else {
            panic!("expected next line");
        };
        assert_eq!(engine.view().unwrap().line, 1);
        type_out(&mut engine, second);

        assert_eq!(
            engine.advance(),
            Advance::Finished {
                script: ScriptId::LilyEncounter,
                on_finish,
            }
        );
        assert_eq!(engine.phase(), DialoguePhase::Idle);
        assert!(!engine.is_active());
        assert_eq!(engine.advance(), Advance::Idle);
    }

    #[test]
    fn old_tokens_are_stale_after_restart() {
        let mut engine = DialogueEngine::new();
        let old = engine.start(script(), Vec::new()).token;
        let started = engine.start(script(), Vec::new());
        assert_eq!(started.superseded, Some(ScriptId::LilyEncounter));
        assert_eq!(engine.reveal_next(old), Reveal::Stale);
        assert!(!engine.clear_effect(old));
        assert!(engine.clear_effect(started.token));
        assert_eq!(engine.view().unwrap().effect, None);
    }

    #[test]
    fn previous_line_token_is_stale() {
        let mut engine = DialogueEngine::new();
        let first = engine.start(script(), Vec::new()).token;
        engine.force_show();
        engine.advance();
        assert_eq!(engine.reveal_next(first), Reveal::Stale);
    }

    #[test]
    fn empty_line_is_immediately_complete() {
        let mut engine = DialogueEngine::new();
        engine.start(
            Script::new(ScriptId::Shadows, vec![DialogueLine::new("燕", "")]),
            Vec::new(),
        );
        assert_eq!(engine.phase(), DialoguePhase::AwaitingAdvance);
        assert!(matches!(engine.advance(), Advance::Finished { .. }));
    }
}
