//! The aggregate root.
//!
//! A [`Session`] owns every piece of mutable story state and is the only
//! thing that mutates it. Callers drive it with [`Session::tick`] and the
//! input operations, and read it back through [`Session::snapshot`] and the
//! view accessors.
//!
//! Pending work never runs on its own: it sits in a timer queue as
//! [`Deferred`] values and is delivered at the start of the first tick whose
//! clock reaches its due time, before input and movement are processed.

use std::fmt;

use ns_core::{
    ClimaxStep, ContentPack, Drone, Effect, Facing, InteractableView, Inventory, Position,
    SceneId, ScriptId, StoryFlag, StoryFlags, Subtitle,
};
use tracing::{debug, info, trace, warn};

use crate::audio::{AudioCue, AudioSink, TracingAudio};
use crate::climax::{ClimaxBeat, ClimaxPhase, ClimaxSequencer};
use crate::clock::{SessionClock, movement_delta};
use crate::config::RuntimeConfig;
use crate::dialogue::{Advance, DialogueEngine, DialogueView, LineToken, Reveal};
use crate::error::RuntimeResult;
use crate::event::{EventLog, Reentry, SessionEvent, SessionEventKind};
use crate::input::{Button, InputState};
use crate::movement::{self, Heading, MovementBlock};
use crate::objective::{Objective, objective};
use crate::resolver;
use crate::subtitle::{SubtitleToken, SubtitleTracker};
use crate::timer::TimerQueue;
use crate::transition::{SceneSwap, TransitionController, TransitionToken};
use crate::triggers;

/// Frame length used by [`Session::advance`].
pub const FRAME_MS: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransitionStage {
    Midpoint,
    Reveal,
    Finish,
}

/// Work scheduled against the session clock.
#[derive(Debug)]
enum Deferred {
    Effects(Vec<Effect>),
    Reveal(LineToken),
    ClearLineEffect(LineToken),
    Transition(TransitionToken, TransitionStage),
    Climax(ClimaxBeat),
    ClearSubtitle(SubtitleToken),
    ClearNotice(u64),
    WakeUp,
    VisionHint,
}

/// Read-only projection of the session for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Session time.
    pub at_ms: u64,
    /// Whether the title screen has been left.
    pub started: bool,
    /// Active scene.
    pub scene: SceneId,
    /// Player position.
    pub position: Position,
    /// Player facing.
    pub facing: Facing,
    /// Whether the player walked this frame.
    pub moving: bool,
    /// Non-interactive lying pose.
    pub lying_down: bool,
    /// Vision mode.
    pub vision: bool,
    /// Finale stage.
    pub climax_step: ClimaxStep,
    /// Screen shake.
    pub shaking: bool,
    /// Full-screen cover opacity, `0.0..=1.0`.
    pub cover: f32,
    /// Terminal epilogue.
    pub epilogue_shown: bool,
    /// A transition is in flight.
    pub transitioning: bool,
    /// Dialogue is on screen.
    pub dialogue_active: bool,
    /// Story flags.
    pub flags: StoryFlags,
    /// Carried items.
    pub inventory: Inventory,
    /// Ambient loop.
    pub drone: Option<Drone>,
    /// Boundary notice text, while it shows.
    pub block_notice: Option<String>,
    /// First-run movement hint.
    pub movement_hint: bool,
    /// Vision-mode hint.
    pub vision_hint: bool,
}

/// One play-through.
pub struct Session {
    content: ContentPack,
    config: RuntimeConfig,
    audio: Box<dyn AudioSink>,
    clock: SessionClock,
    timers: TimerQueue<Deferred>,
    input: InputState,
    events: EventLog,

    scene: SceneId,
    position: Position,
    facing: Facing,
    moving: bool,
    flags: StoryFlags,
    inventory: Inventory,

    dialogue: DialogueEngine,
    transition: TransitionController,
    climax: ClimaxSequencer,
    subtitles: SubtitleTracker,

    started: bool,
    lying_down: bool,
    vision: bool,
    shaking: bool,
    blackout: bool,
    epilogue_shown: bool,
    drone: Option<Drone>,
    notice: Option<String>,
    notice_seq: u64,
    movement_hint: bool,
    vision_hint: bool,
    last_footstep_ms: Option<u64>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("at_ms", &self.clock.now())
            .field("scene", &self.scene)
            .field("position", &self.position.get())
            .field("climax", &self.climax.phase())
            .field("pending", &self.timers.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Session {
    /// Create a session on the title screen. Content and config are
    /// validated here so nothing can fail mid-session.
    pub fn new(
        content: ContentPack,
        config: RuntimeConfig,
        audio: Box<dyn AudioSink>,
    ) -> RuntimeResult<Self> {
        content.validate()?;
        config.validate()?;
        let position = content.spawn(SceneId::Intro).unwrap_or_default();
        info!(
            scripts = content.scripts.len(),
            rules = content.triggers.len(),
            "session_created"
        );
        Ok(Self {
            transition: TransitionController::new(config.transition),
            events: EventLog::new(config.max_events),
            content,
            config,
            audio,
            clock: SessionClock::new(),
            timers: TimerQueue::new(),
            input: InputState::new(),
            scene: SceneId::Intro,
            position,
            facing: Facing::Right,
            moving: false,
            flags: StoryFlags::new(),
            inventory: Inventory::new(),
            dialogue: DialogueEngine::new(),
            climax: ClimaxSequencer::new(),
            subtitles: SubtitleTracker::new(),
            started: false,
            lying_down: false,
            vision: false,
            shaking: false,
            blackout: false,
            epilogue_shown: false,
            drone: None,
            notice: None,
            notice_seq: 0,
            movement_hint: false,
            vision_hint: false,
            last_footstep_ms: None,
        })
    }

    /// A session over the built-in story with default tuning, logging its
    /// audio cues through `tracing`.
    pub fn builtin() -> RuntimeResult<Self> {
        Self::new(
            ContentPack::builtin(),
            RuntimeConfig::default(),
            Box::new(TracingAudio),
        )
    }

    // ---- lifecycle -------------------------------------------------------

    /// Leave the title screen: wake up in the forest.
    pub fn start(&mut self) {
        if self.started {
            self.drop_reentry(Reentry::Start);
            return;
        }
        self.started = true;
        self.movement_hint = true;
        self.record(SessionEventKind::Started, "session started");
        self.set_drone(Some(Drone::Forest));
        let spawn = self.content.spawn(SceneId::Forest);
        self.change_scene(SceneId::Forest, spawn);
        self.lying_down = true;
        self.schedule_in(self.config.wake_up_ms, Deferred::WakeUp);
    }

    /// One frame. Delivers due deferred work, then moves the player,
    /// evaluates trigger rules and updates the subtitle, in that order.
    pub fn tick(&mut self, elapsed_ms: u64) {
        let now = self.clock.advance(elapsed_ms);
        while let Some(deferred) = self.timers.pop_due(now) {
            self.fire(deferred);
        }
        let dt = movement_delta(elapsed_ms, self.config.max_frame_delta_ms);
        self.update_movement(dt);
        self.evaluate_triggers();
        self.update_subtitle();
    }

    /// Fast-forward by `ms`, in frames of at most [`FRAME_MS`], landing
    /// exactly on every timer's due time.
    pub fn advance(&mut self, ms: u64) {
        let end = self.clock.now().saturating_add(ms);
        while self.clock.now() < end {
            let now = self.clock.now();
            let mut step = (end - now).min(FRAME_MS);
            if let Some(due) = self.timers.next_due().filter(|due| *due > now) {
                step = step.min(due - now);
            }
            self.tick(step);
        }
    }

    // ---- input -----------------------------------------------------------

    /// A button went down. Interact and vision act on the press edge only.
    pub fn key_down(&mut self, button: Button) {
        if !self.accepts_input() {
            return;
        }
        let fresh = self.input.press(button);
        match button {
            Button::Left | Button::Right => {}
            Button::Interact if fresh => {
                if self.dialogue.is_active() {
                    self.advance_dialogue();
                } else {
                    self.interact();
                }
            }
            Button::ToggleVision if fresh => self.toggle_vision(),
            Button::Interact | Button::ToggleVision => {}
        }
    }

    /// A button went up.
    pub fn key_up(&mut self, button: Button) {
        self.input.release(button);
    }

    /// Whether a button is held.
    pub fn is_held(&self, button: Button) -> bool {
        self.input.is_held(button)
    }

    /// Use the first interactable in range. Silently does nothing when
    /// anything forbids it.
    pub fn interact(&mut self) {
        if !self.started
            || self.is_ended()
            || self.dialogue.is_active()
            || self.transition.in_flight()
            || self.lying_down
            || self.climax.step().is_active()
        {
            trace!("interact_ignored");
            return;
        }
        let Some(item) = resolver::target(
            self.content.catalog(self.scene),
            self.position,
            self.config.interact_range,
        )
        .cloned() else {
            return;
        };
        if let Err(refusal) = resolver::admit(&item, &self.flags, self.vision) {
            debug!(target = %item.id, ?refusal, "interaction_refused");
            return;
        }
        self.cue(AudioCue::Interact);
        info!(target = %item.id, kind = ?item.kind, "interaction");
        let effects = resolver::plan(
            item.kind,
            &self.flags,
            &self.content,
            self.config.post_transition_ms,
        );
        self.apply_all(effects);
    }

    /// Advance or force-complete the dialogue line on screen.
    pub fn advance_dialogue(&mut self) {
        match self.dialogue.advance() {
            Advance::Idle => {}
            Advance::Revealed => trace!("line_revealed"),
            Advance::NextLine(token) => self.schedule_line(token),
            Advance::Finished { script, on_finish } => {
                info!(script = %script, "dialogue_finished");
                self.record(
                    SessionEventKind::DialogueFinished { script },
                    format!("script {script} finished"),
                );
                if script == ScriptId::Climax && self.climax.dialogue_finished() {
                    self.climax_impact();
                }
                self.apply_all(on_finish);
            }
        }
    }

    /// Flip vision mode and dismiss its hint.
    pub fn toggle_vision(&mut self) {
        if !self.accepts_input() {
            return;
        }
        self.vision = !self.vision;
        self.vision_hint = false;
        self.record(
            SessionEventKind::VisionToggled { on: self.vision },
            if self.vision { "vision on" } else { "vision off" },
        );
    }

    // ---- queries ---------------------------------------------------------

    /// Current state for presentation.
    pub fn snapshot(&self) -> Snapshot {
        let now = self.clock.now();
        Snapshot {
            at_ms: now,
            started: self.started,
            scene: self.scene,
            position: self.position,
            facing: self.facing,
            moving: self.moving,
            lying_down: self.lying_down,
            vision: self.vision,
            climax_step: self.climax.step(),
            shaking: self.shaking,
            cover: if self.blackout {
                1.0
            } else {
                self.transition.cover_level(now)
            },
            epilogue_shown: self.epilogue_shown,
            transitioning: self.transition.in_flight(),
            dialogue_active: self.dialogue.is_active(),
            flags: self.flags,
            inventory: self.inventory.clone(),
            drone: self.drone,
            block_notice: self.notice.clone(),
            movement_hint: self.movement_hint,
            vision_hint: self.vision_hint,
        }
    }

    /// The dialogue line on screen.
    pub fn dialogue(&self) -> Option<DialogueView<'_>> {
        self.dialogue.view()
    }

    /// The visible subtitle.
    pub fn subtitle(&self) -> Option<&Subtitle> {
        self.subtitles.visible()
    }

    /// Next-step hint.
    pub fn objective(&self) -> Objective {
        objective(self.scene, self.position, &self.flags)
    }

    /// The current scene's catalog with derived completion.
    pub fn interactables(&self) -> Vec<InteractableView<'_>> {
        self.content
            .catalog(self.scene)
            .iter()
            .map(|item| item.view(&self.flags))
            .collect()
    }

    /// The object `interact` would target right now, if any.
    pub fn prompt(&self) -> Option<InteractableView<'_>> {
        resolver::target(
            self.content.catalog(self.scene),
            self.position,
            self.config.interact_range,
        )
        .map(|item| item.view(&self.flags))
    }

    /// Why movement is suspended, if it is.
    pub fn movement_block(&self) -> Option<MovementBlock> {
        if !self.started {
            Some(MovementBlock::NotStarted)
        } else if self.is_ended() {
            Some(MovementBlock::Ended)
        } else if self.dialogue.is_active() {
            Some(MovementBlock::Dialogue)
        } else if self.lying_down {
            Some(MovementBlock::LyingDown)
        } else if self.transition.in_flight() {
            Some(MovementBlock::Transition)
        } else if self.climax.step().is_active() {
            Some(MovementBlock::Climax)
        } else {
            None
        }
    }

    /// Whether the title screen has been left.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the ending or epilogue is showing.
    pub fn is_ended(&self) -> bool {
        self.epilogue_shown || self.scene == SceneId::Ending
    }

    /// Event history.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Session time.
    pub fn now_ms(&self) -> u64 {
        self.clock.now()
    }

    /// Active scene.
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    /// Player position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Story flags.
    pub fn flags(&self) -> &StoryFlags {
        &self.flags
    }

    /// Finale phase.
    pub fn climax_phase(&self) -> ClimaxPhase {
        self.climax.phase()
    }

    /// Content in use.
    pub fn content(&self) -> &ContentPack {
        &self.content
    }

    /// Tuning in use.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Number of pending deferred items.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    // ---- internals -------------------------------------------------------

    fn accepts_input(&self) -> bool {
        self.started && !self.is_ended()
    }

    fn record(&mut self, kind: SessionEventKind, description: impl Into<String>) {
        let event = SessionEvent::new(self.clock.now(), kind, description);
        trace!(at_ms = event.at_ms, event = event.kind.label(), "{}", event.description);
        self.events.push(event);
    }

    fn drop_reentry(&mut self, what: Reentry) {
        warn!(?what, "reentry_dropped");
        self.record(
            SessionEventKind::ReentryDropped { what },
            format!("{what:?} already running"),
        );
    }

    fn cue(&mut self, cue: AudioCue) {
        self.audio.play(cue);
        if cue != AudioCue::Typing {
            self.record(SessionEventKind::Cue { cue }, cue.to_string());
        }
    }

    fn schedule_in(&mut self, delay_ms: u64, deferred: Deferred) {
        let due = self.clock.now().saturating_add(delay_ms);
        self.timers.schedule(due, deferred);
    }

    fn fire(&mut self, deferred: Deferred) {
        match deferred {
            Deferred::Effects(effects) => self.apply_all(effects),
            Deferred::Reveal(token) => match self.dialogue.reveal_next(token) {
                Reveal::Stale => trace!("stale_reveal"),
                Reveal::Typed { index, done } => {
                    if index % 3 == 0 {
                        self.cue(AudioCue::Typing);
                    }
                    if !done {
                        self.schedule_in(self.config.typing_delay_ms, Deferred::Reveal(token));
                    }
                }
            },
            Deferred::ClearLineEffect(token) => {
                if !self.dialogue.clear_effect(token) {
                    trace!("stale_line_effect");
                }
            }
            Deferred::Transition(token, stage) => self.advance_transition(token, stage),
            Deferred::Climax(beat) => self.climax_beat(beat),
            Deferred::ClearSubtitle(token) => {
                if !self.subtitles.expire(token) {
                    trace!("stale_subtitle_expiry");
                }
            }
            Deferred::ClearNotice(seq) => {
                if seq == self.notice_seq {
                    self.notice = None;
                }
            }
            Deferred::WakeUp => {
                self.lying_down = false;
                self.record(SessionEventKind::StoodUp, "stood up");
                self.schedule_in(
                    self.config.intro_dialogue_ms,
                    Deferred::Effects(vec![Effect::StartScript {
                        script: ScriptId::Intro,
                        on_finish: Vec::new(),
                    }]),
                );
            }
            Deferred::VisionHint => {
                if !self.is_ended() {
                    self.vision_hint = true;
                }
            }
        }
    }

    fn apply_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::SetFlag { flag } => self.raise_flag(flag),
            Effect::GiveItem { item } => {
                if self.inventory.give(item.clone()) {
                    self.record(SessionEventKind::ItemGiven { item: item.clone() }, item);
                }
            }
            Effect::TakeItem { item } => {
                if self.inventory.take(&item) {
                    self.record(SessionEventKind::ItemTaken { item: item.clone() }, item);
                }
            }
            Effect::SetScene { scene, position } => {
                self.change_scene(scene, position.map(Position::new));
            }
            Effect::Transition {
                scene,
                position,
                on_midpoint,
            } => self.begin_transition(scene, Position::new(position), on_midpoint),
            Effect::StartScript { script, on_finish } => self.start_script(script, on_finish),
            Effect::StartDrone { drone } => self.set_drone(Some(drone)),
            Effect::StopDrone => self.set_drone(None),
            Effect::ShowVisionHint => {
                self.schedule_in(self.config.vision_hint_ms, Deferred::VisionHint);
            }
            Effect::After { delay_ms, effects } => {
                self.schedule_in(delay_ms, Deferred::Effects(effects));
            }
        }
    }

    fn raise_flag(&mut self, flag: StoryFlag) {
        if !self.flags.raise(flag) {
            return;
        }
        info!(flag = %flag, "flag_set");
        self.record(SessionEventKind::FlagSet { flag }, flag.to_string());
        if self.flags.altar_complete() {
            self.schedule_climax();
        }
    }

    fn schedule_climax(&mut self) {
        if self.is_ended() {
            return;
        }
        if !self.climax.schedule() {
            self.drop_reentry(Reentry::Climax);
            return;
        }
        info!(delay_ms = self.config.climax.trigger_delay_ms, "climax_scheduled");
        self.record(SessionEventKind::ClimaxScheduled, "all altar steps done");
        self.schedule_in(
            self.config.climax.trigger_delay_ms,
            Deferred::Climax(ClimaxBeat::Begin),
        );
    }

    fn change_scene(&mut self, scene: SceneId, position: Option<Position>) {
        let from = self.scene;
        self.scene = scene;
        if let Some(position) = position {
            self.position = position;
        }
        if from != scene {
            info!(from = %from, to = %scene, "scene_changed");
            self.record(
                SessionEventKind::SceneChanged { from, to: scene },
                format!("{from} -> {scene}"),
            );
        }
    }

    fn begin_transition(&mut self, scene: SceneId, position: Position, on_midpoint: Vec<Effect>) {
        let swap = SceneSwap {
            scene,
            position,
            on_midpoint,
        };
        match self.transition.begin(swap, self.clock.now()) {
            None => self.drop_reentry(Reentry::Transition),
            Some(token) => {
                self.moving = false;
                info!(to = %scene, "transition_started");
                self.record(
                    SessionEventKind::TransitionStarted { to: scene },
                    format!("to {scene}"),
                );
                self.schedule_in(
                    self.config.transition.cover_ms,
                    Deferred::Transition(token, TransitionStage::Midpoint),
                );
            }
        }
    }

    fn advance_transition(&mut self, token: TransitionToken, stage: TransitionStage) {
        let now = self.clock.now();
        let timings = self.config.transition;
        match stage {
            TransitionStage::Midpoint => {
                let Some(swap) = self.transition.midpoint(token, now) else {
                    trace!("stale_transition_midpoint");
                    return;
                };
                self.change_scene(swap.scene, Some(swap.position));
                self.record(
                    SessionEventKind::TransitionMidpoint { to: swap.scene },
                    format!("at {}", swap.position.get()),
                );
                self.apply_all(swap.on_midpoint);
                self.schedule_in(
                    timings.hold_ms,
                    Deferred::Transition(token, TransitionStage::Reveal),
                );
            }
            TransitionStage::Reveal => {
                if self.transition.reveal(token, now) {
                    self.schedule_in(
                        timings.reveal_ms,
                        Deferred::Transition(token, TransitionStage::Finish),
                    );
                } else {
                    trace!("stale_transition_reveal");
                }
            }
            TransitionStage::Finish => {
                if self.transition.finish(token) {
                    self.record(SessionEventKind::TransitionFinished, "cover gone");
                } else {
                    trace!("stale_transition_finish");
                }
            }
        }
    }

    fn start_script(&mut self, id: ScriptId, on_finish: Vec<Effect>) {
        let Some(script) = self.content.script(id).cloned() else {
            warn!(script = %id, "script_missing");
            return;
        };
        self.input.release(Button::Left);
        self.input.release(Button::Right);
        self.moving = false;
        let started = self.dialogue.start(script, on_finish);
        if let Some(old) = started.superseded {
            warn!(old = %old, new = %id, "dialogue_superseded");
            self.drop_reentry(Reentry::Dialogue);
        }
        info!(script = %id, "dialogue_started");
        self.record(
            SessionEventKind::DialogueStarted { script: id },
            format!("script {id}"),
        );
        self.schedule_line(started.token);
    }

    fn schedule_line(&mut self, token: LineToken) {
        let (typing, has_effect) = match self.dialogue.view() {
            Some(view) => (!view.typing_complete, view.effect.is_some()),
            None => return,
        };
        if typing {
            self.schedule_in(self.config.typing_delay_ms, Deferred::Reveal(token));
        }
        if has_effect {
            self.schedule_in(self.config.line_effect_ms, Deferred::ClearLineEffect(token));
        }
    }

    fn set_drone(&mut self, drone: Option<Drone>) {
        self.drone = drone;
        match drone {
            Some(drone) => self.cue(AudioCue::StartDrone(drone)),
            None => self.cue(AudioCue::StopDrone),
        }
    }

    fn climax_beat(&mut self, beat: ClimaxBeat) {
        if beat == ClimaxBeat::Begin && self.scene == SceneId::Climax {
            self.drop_reentry(Reentry::Climax);
            return;
        }
        if !self.climax.apply(beat) {
            warn!(?beat, phase = ?self.climax.phase(), "climax_beat_out_of_order");
            return;
        }
        let timings = self.config.climax;
        match beat {
            ClimaxBeat::Begin => {
                self.set_drone(None);
                self.cue(AudioCue::Scare);
                self.change_scene(SceneId::Climax, None);
                self.lying_down = true;
                self.shaking = true;
                self.moving = false;
                self.schedule_in(timings.emerge_ms, Deferred::Climax(ClimaxBeat::Emerge));
            }
            ClimaxBeat::Emerge => {
                self.record_step();
                self.set_drone(Some(Drone::Forest));
                self.schedule_in(timings.speak_ms, Deferred::Climax(ClimaxBeat::Speak));
            }
            ClimaxBeat::Speak => self.start_script(ScriptId::Climax, Vec::new()),
            ClimaxBeat::Blackout => {
                self.blackout = true;
                self.shaking = false;
                self.schedule_in(timings.epilogue_ms, Deferred::Climax(ClimaxBeat::Epilogue));
            }
            ClimaxBeat::Epilogue => {
                self.epilogue_shown = true;
                self.blackout = false;
                self.input.clear();
                info!("epilogue");
                self.record(SessionEventKind::Epilogue, "epilogue shown");
            }
        }
    }

    fn climax_impact(&mut self) {
        self.record_step();
        self.cue(AudioCue::Scare);
        self.shaking = true;
        self.schedule_in(
            self.config.climax.blackout_ms,
            Deferred::Climax(ClimaxBeat::Blackout),
        );
    }

    fn record_step(&mut self) {
        let step = self.climax.step();
        info!(step = step.index(), "climax_step");
        self.record(
            SessionEventKind::ClimaxStep { step },
            format!("step {}", step.index()),
        );
    }

    fn update_movement(&mut self, dt_ms: f32) {
        if let Some(block) = self.movement_block() {
            if self.moving {
                trace!(?block, "movement_suspended");
            }
            self.moving = false;
            return;
        }
        let heading = Heading {
            left: self.input.is_held(Button::Left),
            right: self.input.is_held(Button::Right),
        };
        let step = movement::step(
            self.position,
            self.facing,
            heading,
            dt_ms,
            self.config.walk_speed,
            self.content.left_boundary(self.scene),
        );
        if step.pressed_right {
            self.movement_hint = false;
        }
        if step.hit_boundary {
            self.show_block_notice();
        }
        self.position = step.position;
        self.facing = step.facing;
        self.moving = step.moving;

        if step.moving {
            let now = self.clock.now();
            let interval = self.config.footstep_interval_ms;
            if self
                .last_footstep_ms
                .is_none_or(|last| now.saturating_sub(last) >= interval)
            {
                self.last_footstep_ms = Some(now);
                self.cue(AudioCue::Footstep);
            }
        }
    }

    fn show_block_notice(&mut self) {
        if self.notice.is_some() {
            return;
        }
        self.notice_seq += 1;
        self.notice = Some(self.content.block_notice.clone());
        let scene = self.scene;
        debug!(scene = %scene, "movement_blocked");
        self.record(
            SessionEventKind::MovementBlocked { scene },
            self.content.block_notice.clone(),
        );
        self.schedule_in(
            self.config.block_notice_ms,
            Deferred::ClearNotice(self.notice_seq),
        );
    }

    fn evaluate_triggers(&mut self) {
        if !self.accepts_input()
            || self.dialogue.is_active()
            || self.transition.in_flight()
            || self.climax.has_begun()
        {
            return;
        }
        let fired: Vec<Vec<Effect>> =
            triggers::matching(&self.content.triggers, self.scene, self.position, &self.flags)
                .map(|rule| rule.effects.clone())
                .collect();
        for effects in fired {
            if self.dialogue.is_active() || self.transition.in_flight() {
                break;
            }
            debug!(scene = %self.scene, position = self.position.get(), "trigger_fired");
            self.apply_all(effects);
        }
    }

    fn update_subtitle(&mut self) {
        if !self.accepts_input() {
            return;
        }
        let shown = self
            .subtitles
            .observe(
                self.content.subtitles(self.scene),
                self.position,
                self.config.subtitle_range,
            )
            .map(|(token, s)| (token, s.id.clone(), s.whisper, s.effective_duration_ms()));
        let Some((token, id, whisper, duration_ms)) = shown else {
            return;
        };
        debug!(id = %id, duration_ms, "subtitle_shown");
        self.record(SessionEventKind::SubtitleShown { id: id.clone() }, id);
        if whisper {
            self.cue(AudioCue::Whisper);
        }
        self.schedule_in(duration_ms, Deferred::ClearSubtitle(token));
    }

    #[cfg(test)]
    fn place(&mut self, scene: SceneId, x: f32) {
        self.scene = scene;
        self.position = Position::new(x);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;
    use crate::audio::NullAudio;
    use crate::dialogue::DialoguePhase;

    #[derive(Debug, Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<AudioCue>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: AudioCue) {
            self.0.borrow_mut().push(cue);
        }
    }

    impl Recorder {
        fn count(&self, cue: AudioCue) -> usize {
            self.0.borrow().iter().filter(|c| **c == cue).count()
        }
    }

    fn fresh() -> Session {
        Session::new(
            ContentPack::builtin(),
            RuntimeConfig::default(),
            Box::new(NullAudio),
        )
        .unwrap()
    }

    fn recorded() -> (Session, Recorder) {
        let recorder = Recorder::default();
        let session = Session::new(
            ContentPack::builtin(),
            RuntimeConfig::default(),
            Box::new(recorder.clone()),
        )
        .unwrap();
        (session, recorder)
    }

    fn finish_dialogue(s: &mut Session) {
        while s.dialogue.is_active() {
            s.advance_dialogue();
        }
    }

    /// Started, intro played through, player placed.
    fn ready_in(s: &mut Session, scene: SceneId, x: f32) {
        s.start();
        s.advance(3500);
        finish_dialogue(s);
        s.place(scene, x);
    }

    fn ready(scene: SceneId, x: f32) -> Session {
        let mut s = fresh();
        ready_in(&mut s, scene, x);
        s
    }

    fn tap(s: &mut Session, button: Button) {
        s.key_down(button);
        s.key_up(button);
    }

    #[test]
    fn title_screen_ignores_input() {
        let mut s = fresh();
        s.key_down(Button::Right);
        s.advance(1000);
        assert_eq!(s.position(), Position::new(5.0));
        assert_eq!(s.scene(), SceneId::Intro);
        assert_eq!(s.movement_block(), Some(MovementBlock::NotStarted));
        assert!(!s.is_held(Button::Right));
    }

    #[test]
    fn start_wakes_up_in_forest() {
        let mut s = fresh();
        s.start();
        let snap = s.snapshot();
        assert_eq!(snap.scene, SceneId::Forest);
        assert!(snap.lying_down);
        assert!(snap.movement_hint);
        assert_eq!(snap.drone, Some(Drone::Forest));

        s.key_down(Button::Right);
        s.advance(2999);
        assert_eq!(s.position(), Position::new(5.0));
        assert!(s.snapshot().lying_down);

        s.advance(1);
        assert!(!s.snapshot().lying_down);
        s.advance(500);
        assert_eq!(s.dialogue.script_id(), Some(ScriptId::Intro));
    }

    #[test]
    fn second_start_is_dropped() {
        let mut s = fresh();
        s.start();
        s.start();
        assert_eq!(
            s.events().count(&SessionEventKind::ReentryDropped {
                what: Reentry::Start
            }),
            1
        );
    }

    #[test]
    fn opening_event_log() {
        let mut s = fresh();
        s.start();
        s.advance(3500);
        let lines: Vec<String> = s
            .events()
            .events()
            .iter()
            .map(|e| format!("{} {} {}", e.at_ms, e.kind.label(), e.description))
            .collect();
        insta::assert_snapshot!(lines.join("\n"), @r"
        0 started session started
        0 cue drone:forest
        0 scene_changed intro -> forest
        16 subtitle_shown f1
        16 cue whisper
        3000 stood_up stood up
        3500 dialogue_started script intro
        ");
    }

    #[test]
    fn walking_right_moves_and_dismisses_hint() {
        let mut s = ready(SceneId::Forest, 30.0);
        assert!(s.snapshot().movement_hint);
        s.key_down(Button::Right);
        s.advance(1000);
        let snap = s.snapshot();
        assert!((snap.position.get() - 38.6).abs() < 0.01);
        assert!(snap.moving);
        assert_eq!(snap.facing, Facing::Right);
        assert!(!snap.movement_hint);
        s.key_up(Button::Right);
        s.advance(16);
        assert!(!s.snapshot().moving);
    }

    #[test]
    fn frame_stall_is_capped() {
        let mut s = ready(SceneId::Forest, 30.0);
        s.key_down(Button::Right);
        s.tick(5000);
        assert!((s.position().get() - 30.43).abs() < 0.01);
    }

    #[test]
    fn footsteps_are_spaced() {
        let (mut s, audio) = recorded();
        ready_in(&mut s, SceneId::Path, 10.0);
        s.key_down(Button::Right);
        s.advance(1000);
        assert_eq!(audio.count(AudioCue::Footstep), 3);
    }

    #[test]
    fn forest_exit_transitions_to_meeting() {
        let mut s = ready(SceneId::Forest, 97.0);
        s.key_down(Button::Right);
        s.advance(200);
        assert!(s.snapshot().transitioning);
        assert_eq!(s.scene(), SceneId::Forest);

        s.advance(1200);
        assert_eq!(s.scene(), SceneId::Meeting);
        assert_eq!(s.position(), Position::new(2.0));
        assert_eq!(s.movement_block(), Some(MovementBlock::Transition));

        s.advance(2000);
        assert!(!s.snapshot().transitioning);
        assert_eq!(
            s.events().count(&SessionEventKind::TransitionStarted {
                to: SceneId::Meeting
            }),
            1
        );
        assert_eq!(s.events().count(&SessionEventKind::TransitionFinished), 1);
    }

    #[test]
    fn transition_blocks_for_full_span() {
        let mut s = ready(SceneId::Forest, 98.5);
        s.advance(16);
        let begun = s.now_ms();
        s.key_down(Button::Right);
        let mut held = (s.scene(), s.position());
        while s.snapshot().transitioning {
            assert_eq!(s.movement_block(), Some(MovementBlock::Transition));
            if s.scene() == held.0 {
                assert_eq!(s.position(), held.1, "moved under the cover");
            } else {
                held = (s.scene(), s.position());
            }
            assert!(!s.snapshot().moving);
            s.advance(16);
        }
        assert_eq!(held, (SceneId::Meeting, Position::new(2.0)));
        assert!(s.now_ms() - begun >= 3200);
    }

    #[test]
    fn overlapping_transition_is_dropped() {
        let mut s = ready(SceneId::Forest, 50.0);
        let go = |scene| Effect::Transition {
            scene,
            position: 2.0,
            on_midpoint: Vec::new(),
        };
        s.apply(go(SceneId::Meeting));
        s.advance(500);
        s.apply(go(SceneId::Path));
        s.advance(5000);
        assert_eq!(s.scene(), SceneId::Meeting);
        assert_eq!(
            s.events().count(&SessionEventKind::ReentryDropped {
                what: Reentry::Transition
            }),
            1
        );
    }

    #[test]
    fn meeting_dialogue_then_search() {
        let mut s = ready(SceneId::Meeting, 65.0);
        s.advance(16);
        assert_eq!(s.dialogue.script_id(), Some(ScriptId::Meeting));
        assert!(!s.flags().is_set(StoryFlag::MetGuide));

        finish_dialogue(&mut s);
        assert!(s.flags().is_set(StoryFlag::MetGuide));
        assert_eq!(s.scene(), SceneId::Search);
        assert_eq!(s.position(), Position::new(65.0));

        assert!(!s.snapshot().vision_hint);
        s.advance(500);
        assert!(s.snapshot().vision_hint);
        tap(&mut s, Button::ToggleVision);
        assert!(!s.snapshot().vision_hint);
        assert!(s.snapshot().vision);
    }

    #[test]
    fn meeting_rule_fires_once() {
        let mut s = ready(SceneId::Meeting, 65.0);
        s.advance(16);
        finish_dialogue(&mut s);
        s.place(SceneId::Meeting, 65.0);
        s.advance(100);
        assert_eq!(
            s.events().count(&SessionEventKind::DialogueStarted {
                script: ScriptId::Meeting
            }),
            1
        );
    }

    #[test]
    fn dialogue_clears_held_input() {
        let mut s = ready(SceneId::Path, 50.0);
        s.key_down(Button::Right);
        s.advance(32);
        assert!(s.snapshot().moving);
        tap(&mut s, Button::Interact);
        assert_eq!(s.dialogue.script_id(), Some(ScriptId::LilyEncounter));
        assert!(!s.is_held(Button::Right));
        assert!(!s.snapshot().moving);
    }

    #[test]
    fn interact_key_advances_dialogue() {
        let mut s = ready(SceneId::Path, 50.0);
        tap(&mut s, Button::Interact);
        assert_eq!(s.dialogue.phase(), DialoguePhase::Typing);
        tap(&mut s, Button::Interact);
        assert_eq!(s.dialogue().unwrap().line, 0);
        assert!(s.dialogue().unwrap().typing_complete);
        tap(&mut s, Button::Interact);
        assert_eq!(s.dialogue().unwrap().line, 1);
    }

    #[test]
    fn held_interact_does_not_repeat() {
        let mut s = ready(SceneId::Path, 50.0);
        s.key_down(Button::Interact);
        s.key_down(Button::Interact);
        s.key_down(Button::Interact);
        assert_eq!(s.dialogue().unwrap().line, 0);
        assert!(!s.dialogue().unwrap().typing_complete);
    }

    #[test]
    fn typing_reveals_over_time_with_sparse_cues() {
        let (mut s, audio) = recorded();
        ready_in(&mut s, SceneId::Path, 50.0);
        let before = audio.count(AudioCue::Typing);
        s.interact();
        // "好大的鹿子百合。" has 8 characters.
        s.advance(50);
        assert_eq!(s.dialogue().unwrap().shown, "好");
        s.advance(350);
        let view = s.dialogue().unwrap();
        assert_eq!(view.shown, view.full_text);
        assert!(view.typing_complete);
        assert_eq!(audio.count(AudioCue::Typing) - before, 3);
    }

    #[test]
    fn skipped_line_ignores_pending_reveals() {
        let mut s = ready(SceneId::Path, 50.0);
        s.interact();
        s.advance(60);
        s.advance_dialogue();
        s.advance_dialogue();
        s.advance(50);
        let view = s.dialogue().unwrap();
        assert_eq!(view.line, 1);
        assert_eq!(view.shown, "本");
    }

    #[test]
    fn shake_effect_expires() {
        let mut s = ready(SceneId::Temple, 3.0);
        s.interact();
        assert_eq!(s.dialogue.script_id(), Some(ScriptId::Shadows));
        assert!(s.dialogue().unwrap().effect.is_some());
        s.advance(499);
        assert!(s.dialogue().unwrap().effect.is_some());
        s.advance(1);
        assert!(s.dialogue().unwrap().effect.is_none());
    }

    #[test]
    fn seed_needs_vision_mode() {
        let (mut s, audio) = recorded();
        ready_in(&mut s, SceneId::Search, 65.0);
        s.flags.raise(StoryFlag::MetGuide);
        s.interact();
        assert!(!s.dialogue.is_active());
        assert!(!s.flags().is_set(StoryFlag::HasSeed));
        assert_eq!(audio.count(AudioCue::Interact), 0);

        s.toggle_vision();
        s.interact();
        assert_eq!(s.dialogue.script_id(), Some(ScriptId::FoundSeed));
        finish_dialogue(&mut s);
        assert!(s.flags().is_set(StoryFlag::HasSeed));
        assert!(s.snapshot().inventory.contains("seed"));
    }

    #[test]
    fn pot_plants_seed_and_moves_to_path() {
        let mut s = ready(SceneId::Search, 75.0);
        s.interact();
        assert!(!s.dialogue.is_active(), "pot refuses without a seed");

        s.flags.raise(StoryFlag::HasSeed);
        s.inventory.give("seed");
        s.interact();
        assert!(s.flags().is_set(StoryFlag::SeedPlanted));
        assert!(s.snapshot().inventory.is_empty());
        assert_eq!(s.dialogue.script_id(), Some(ScriptId::PlantedSeed));

        finish_dialogue(&mut s);
        assert_eq!(s.snapshot().drone, None);
        s.advance(1200);
        assert_eq!(s.scene(), SceneId::Path);
        assert_eq!(s.position(), Position::new(5.0));
        s.advance(500);
        assert_eq!(s.snapshot().drone, Some(Drone::Chanting));

        s.place(SceneId::Search, 75.0);
        s.advance(5000);
        s.interact();
        assert!(!s.dialogue.is_active(), "planted pot is completed");
    }

    #[test]
    fn door_leads_into_temple_then_intro() {
        let mut s = ready(SceneId::Path, 90.0);
        s.interact();
        assert_eq!(s.dialogue.script_id(), Some(ScriptId::BeforeTemple));
        finish_dialogue(&mut s);
        s.advance(1200);
        assert_eq!(s.scene(), SceneId::Temple);
        assert_eq!(s.position(), Position::new(15.0));
        assert!(s.flags().is_set(StoryFlag::EnteredTemple));
        assert_eq!(s.snapshot().drone, Some(Drone::Chanting));
        assert!(!s.dialogue.is_active());
        s.advance(500);
        assert_eq!(s.dialogue.script_id(), Some(ScriptId::TempleIntro));
    }

    #[test]
    fn interact_is_ignored_mid_transition() {
        let mut s = ready(SceneId::Path, 50.0);
        s.apply(Effect::Transition {
            scene: SceneId::Path,
            position: 50.0,
            on_midpoint: Vec::new(),
        });
        s.interact();
        assert!(!s.dialogue.is_active());
    }

    #[test]
    fn temple_boundary_blocks_left_with_cooldown() {
        let mut s = ready(SceneId::Temple, 11.0);
        s.key_down(Button::Left);
        s.advance(16);
        assert_eq!(s.position(), Position::new(11.0));
        assert!(s.snapshot().block_notice.is_some());
        s.advance(1000);
        let blocked = |s: &Session| {
            s.events()
                .matching(|k| matches!(k, SessionEventKind::MovementBlocked { .. }))
                .len()
        };
        assert_eq!(blocked(&s), 1);
        s.advance(1000);
        assert_eq!(blocked(&s), 2);
    }

    #[test]
    fn left_is_free_above_boundary() {
        let mut s = ready(SceneId::Temple, 20.0);
        s.key_down(Button::Left);
        s.advance(500);
        assert!(s.position().get() < 20.0);
        assert_eq!(s.snapshot().facing, Facing::Left);
    }

    fn complete_altars(s: &mut Session) {
        for x in [30.0, 50.0, 70.0] {
            s.place(SceneId::Temple, x);
            s.interact();
        }
    }

    #[test]
    fn altars_schedule_climax_after_delay() {
        let mut s = ready(SceneId::Temple, 30.0);
        complete_altars(&mut s);
        assert!(s.flags().altar_complete());
        assert_eq!(s.events().count(&SessionEventKind::ClimaxScheduled), 1);
        assert_eq!(s.scene(), SceneId::Temple);

        s.advance(799);
        assert_eq!(s.scene(), SceneId::Temple);
        s.advance(1);
        assert_eq!(s.scene(), SceneId::Climax);
    }

    #[test]
    fn climax_triggers_once() {
        let mut s = ready(SceneId::Temple, 30.0);
        complete_altars(&mut s);
        complete_altars(&mut s);
        s.apply(Effect::SetFlag {
            flag: StoryFlag::WineDrunk,
        });
        assert_eq!(s.events().count(&SessionEventKind::ClimaxScheduled), 1);
        s.advance(20_000);
        assert_eq!(
            s.events()
                .matching(|k| matches!(k, SessionEventKind::SceneChanged { to: SceneId::Climax, .. }))
                .len(),
            1
        );
    }

    #[test]
    fn climax_timeline() {
        let (mut s, audio) = recorded();
        ready_in(&mut s, SceneId::Temple, 30.0);
        complete_altars(&mut s);
        s.advance(800);

        let snap = s.snapshot();
        assert_eq!(snap.scene, SceneId::Climax);
        assert!(snap.lying_down && snap.shaking);
        assert_eq!(snap.climax_step, ClimaxStep::Normal);
        assert_eq!(snap.drone, None);
        assert_eq!(audio.count(AudioCue::Scare), 1);

        s.advance(1000);
        assert_eq!(s.snapshot().climax_step, ClimaxStep::ShadowEmerged);
        assert_eq!(s.snapshot().drone, Some(Drone::Forest));
        s.interact();
        assert!(!s.dialogue.is_active(), "interaction is suspended");

        s.advance(3000);
        assert_eq!(s.dialogue.script_id(), Some(ScriptId::Climax));
        finish_dialogue(&mut s);
        let snap = s.snapshot();
        assert_eq!(snap.climax_step, ClimaxStep::VinesSmashed);
        assert!(snap.shaking);
        assert_eq!(audio.count(AudioCue::Scare), 2);

        s.advance(800);
        let snap = s.snapshot();
        assert_eq!(snap.cover, 1.0);
        assert!(!snap.shaking);
        assert!(!snap.epilogue_shown);

        s.advance(2500);
        let snap = s.snapshot();
        assert!(snap.epilogue_shown);
        assert_eq!(snap.cover, 0.0);
        assert_eq!(s.movement_block(), Some(MovementBlock::Ended));
        assert_eq!(s.climax_phase(), ClimaxPhase::Epilogue);
    }

    #[test]
    fn climax_alone_freezes_movement() {
        let mut s = ready(SceneId::Temple, 30.0);
        complete_altars(&mut s);
        s.advance(1800);
        assert_eq!(s.snapshot().climax_step, ClimaxStep::ShadowEmerged);
        assert!(!s.dialogue.is_active());

        s.lying_down = false;
        let before = s.position();
        s.key_down(Button::Right);
        s.advance(500);
        assert_eq!(s.movement_block(), Some(MovementBlock::Climax));
        assert_eq!(s.position(), before);
        assert!(!s.snapshot().moving);
    }

    #[test]
    fn nothing_moves_after_epilogue() {
        let mut s = ready(SceneId::Temple, 30.0);
        complete_altars(&mut s);
        s.advance(4800);
        finish_dialogue(&mut s);
        s.advance(3300);
        assert!(s.is_ended());
        let before = s.snapshot();
        s.key_down(Button::Right);
        tap(&mut s, Button::ToggleVision);
        s.advance(1000);
        assert_eq!(s.snapshot().position, before.position);
        assert_eq!(s.snapshot().vision, before.vision);
    }

    #[test]
    fn forest_whispers_along_the_walk() {
        let (mut s, audio) = recorded();
        s.start();
        s.advance(3500);
        finish_dialogue(&mut s);
        let before = audio.count(AudioCue::Whisper);
        s.key_down(Button::Right);
        // 5 -> ~95 takes a little over 10 seconds. f1 runs out while the
        // player is still near it, so it comes back once.
        s.advance(10_500);
        assert_eq!(audio.count(AudioCue::Whisper) - before, 6);
        let shown: Vec<String> = s
            .events()
            .matching(|k| matches!(k, SessionEventKind::SubtitleShown { .. }))
            .iter()
            .map(|e| e.description.clone())
            .collect();
        assert_eq!(shown, ["f1", "f1", "f2", "f3", "f4", "f5", "f6"]);
    }

    #[test]
    fn expired_subtitle_returns_on_the_way_back() {
        let (mut s, audio) = recorded();
        ready_in(&mut s, SceneId::Forest, 45.0);
        s.advance(16);
        assert_eq!(s.subtitle().map(|t| t.id.as_str()), Some("f3"));
        let whispers = audio.count(AudioCue::Whisper);

        // Between f2 and f3, out of range of both.
        s.place(SceneId::Forest, 35.0);
        s.advance(3100);
        assert!(s.subtitle().is_none());

        s.place(SceneId::Forest, 45.0);
        s.advance(16);
        assert_eq!(s.subtitle().map(|t| t.id.as_str()), Some("f3"));
        assert_eq!(audio.count(AudioCue::Whisper), whispers + 1);
        assert_eq!(
            s.events().count(&SessionEventKind::SubtitleShown { id: "f3".to_string() }),
            2
        );
    }

    #[test]
    fn subtitle_repeats_while_standing_in_range() {
        let mut s = ready(SceneId::Search, 15.0);
        s.advance(16);
        assert_eq!(s.subtitle().map(|t| t.id.as_str()), Some("s1"));
        s.advance(3100);
        assert_eq!(s.subtitle().map(|t| t.id.as_str()), Some("s1"));
        assert_eq!(
            s.events().count(&SessionEventKind::SubtitleShown { id: "s1".to_string() }),
            2
        );
    }

    #[test]
    fn objective_follows_progress() {
        let mut s = fresh();
        assert_eq!(s.objective(), Objective::Explore);
        ready_in(&mut s, SceneId::Temple, 30.0);
        for flag in [StoryFlag::MetGuide, StoryFlag::HasSeed, StoryFlag::SeedPlanted] {
            s.flags.raise(flag);
        }
        assert_eq!(s.objective(), Objective::OfferFlower);
        s.interact();
        assert_eq!(s.objective(), Objective::LightIncense);
    }

    #[test]
    fn interactables_project_completion() {
        let mut s = ready(SceneId::Temple, 30.0);
        s.interact();
        let done: Vec<&str> = s
            .interactables()
            .iter()
            .filter(|v| v.completed)
            .map(|v| v.template.id.as_str())
            .collect();
        assert_eq!(done, ["altar_flower"]);
        assert_eq!(s.prompt().map(|v| v.completed), Some(true));
    }

    #[test]
    fn invalid_content_fails_at_creation() {
        let mut pack = ContentPack::builtin();
        pack.spawns.clear();
        let err = Session::new(pack, RuntimeConfig::default(), Box::new(NullAudio)).unwrap_err();
        assert!(matches!(err, crate::error::RuntimeError::Content(_)));
    }

    proptest! {
        #[test]
        fn position_stays_in_bounds(
            ops in proptest::collection::vec((0u8..6, 1u64..120), 1..200),
            start in 0.0f32..100.0,
        ) {
            let mut s = ready(SceneId::Path, start);
            for (op, ms) in ops {
                match op {
                    0 => s.key_down(Button::Left),
                    1 => s.key_down(Button::Right),
                    2 => s.key_up(Button::Left),
                    3 => s.key_up(Button::Right),
                    4 => tap(&mut s, Button::Interact),
                    _ => {}
                }
                s.tick(ms);
                prop_assert!(Position::in_range(s.position().get()));
            }
        }

        #[test]
        fn dialogue_freezes_position(
            ops in proptest::collection::vec((any::<bool>(), any::<bool>(), 1u64..60), 1..60),
        ) {
            let mut s = ready(SceneId::Path, 50.0);
            s.interact();
            let frozen = s.position();
            for (left, right, ms) in ops {
                if left { s.key_down(Button::Left) } else { s.key_up(Button::Left) }
                if right { s.key_down(Button::Right) } else { s.key_up(Button::Right) }
                s.tick(ms);
                prop_assert!(s.movement_block().is_some());
                prop_assert_eq!(s.position(), frozen);
                prop_assert!(!s.snapshot().moving);
            }
        }

        #[test]
        fn lying_down_freezes_position(frames in proptest::collection::vec(1u64..40, 1..60)) {
            let mut s = fresh();
            s.start();
            s.key_down(Button::Right);
            for ms in frames {
                s.tick(ms);
                if s.snapshot().lying_down {
                    prop_assert_eq!(s.position(), Position::new(5.0));
                }
            }
        }

        #[test]
        fn climax_step_never_decreases(
            frames in proptest::collection::vec(1u64..400, 10..120),
            advances in proptest::collection::vec(any::<bool>(), 10..120),
        ) {
            let mut s = ready(SceneId::Temple, 30.0);
            complete_altars(&mut s);
            let mut last = s.snapshot().climax_step;
            for (ms, press) in frames.into_iter().zip(advances) {
                if press {
                    s.advance_dialogue();
                }
                s.tick(ms);
                let step = s.snapshot().climax_step;
                prop_assert!(step >= last);
                last = step;
            }
        }
    }
}
