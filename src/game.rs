//! Session host
//!
//! Owns everything one running game needs and performs the per-frame
//! update-then-draw step. Hosts feed it input, drive it with a
//! `FrameScheduler` and hand the resulting scenes to a `Presenter`.

use crate::audio::{AudioSink, SoundCue};
use crate::highscores::HighScore;
use crate::platform::input::{Direction, InputState};
use crate::platform::storage::ScoreStore;
use crate::renderer::scene::{self, Scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, is_finished, tick};

/// One game session plus its input, audio and high score
pub struct Game<A: AudioSink, S: ScoreStore> {
    state: GameState,
    input: InputState,
    audio: A,
    high_score: HighScore<S>,
    settings: Settings,
}

impl<A: AudioSink, S: ScoreStore> Game<A, S> {
    pub fn new(seed: u64, settings: Settings, mut audio: A, store: S) -> Self {
        audio.apply_settings(&settings);
        Self {
            state: GameState::new(seed),
            input: InputState::new(settings.pointer_control),
            audio,
            high_score: HighScore::load(store),
            settings,
        }
    }

    /// Click/tap: start from the menu or an end screen. Ignored mid-game.
    pub fn activate(&mut self) -> bool {
        let started = self.state.start();
        if started {
            log::info!("Game started (seed {})", self.state.seed);
        }
        started
    }

    pub fn key_down(&mut self, dir: Direction) {
        self.input.key_down(dir);
    }

    pub fn key_up(&mut self, dir: Direction) {
        self.input.key_up(dir);
    }

    /// Pointer moved to play-area `x`
    pub fn pointer_move(&mut self, x: f32) {
        self.input.pointer_move(x);
    }

    pub fn toggle_autopilot(&mut self) -> bool {
        let on = self.input.toggle_autopilot();
        log::info!("Autopilot: {}", on);
        on
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.input.pointer_enabled = settings.pointer_control;
        if !settings.pointer_control {
            self.input.pointer_x = None;
        }
        self.audio.apply_settings(&settings);
        self.settings = settings;
    }

    /// Flip mute and return the updated settings for the host to persist
    pub fn toggle_mute(&mut self) -> &Settings {
        let mut settings = self.settings.clone();
        settings.muted = !settings.muted;
        log::info!("Muted: {}", settings.muted);
        self.apply_settings(settings);
        &self.settings
    }

    /// Advance one frame and describe it
    pub fn frame(&mut self) -> Scene {
        tick(&mut self.state, &self.input.tick_input());

        for event in self.state.drain_events() {
            self.audio.play(SoundCue::for_event(&event));
            match event {
                GameEvent::BrickDestroyed { score, .. } => {
                    self.high_score.record(score);
                }
                GameEvent::GameOver => {
                    log::info!("Game over with score {}", self.state.score);
                }
                GameEvent::Win => {
                    log::info!("Cleared the wall in {} frames", self.state.frame);
                }
                _ => {}
            }
        }

        scene::build(&self.state, self.high_score.display())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn high_score(&self) -> &HighScore<S> {
        &self.high_score
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Direct access to the session, for hosts and tests that stage positions
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

/// Decides whether another frame runs
pub trait FrameScheduler {
    fn next_frame(&mut self, state: &GameState) -> bool;
}

/// At most `remaining` frames, optionally stopping once the session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFrames {
    pub remaining: u64,
    pub stop_when_finished: bool,
}

impl FixedFrames {
    pub fn new(frames: u64) -> Self {
        Self {
            remaining: frames,
            stop_when_finished: false,
        }
    }

    pub fn until_finished(mut self) -> Self {
        self.stop_when_finished = true;
        self
    }
}

impl FrameScheduler for FixedFrames {
    fn next_frame(&mut self, state: &GameState) -> bool {
        if self.remaining == 0 || (self.stop_when_finished && is_finished(state)) {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Consumes finished frames
pub trait Presenter {
    fn present(&mut self, scene: &Scene);
}

impl<F: FnMut(&Scene)> Presenter for F {
    fn present(&mut self, scene: &Scene) {
        self(scene)
    }
}

/// Run frames until the scheduler says stop. Returns the number of frames run.
pub fn run<A, S, F, P>(game: &mut Game<A, S>, scheduler: &mut F, presenter: &mut P) -> u64
where
    A: AudioSink,
    S: ScoreStore,
    F: FrameScheduler,
    P: Presenter,
{
    let mut frames = 0;
    while scheduler.next_frame(game.state()) {
        let scene = game.frame();
        presenter.present(&scene);
        frames += 1;
    }
    frames
}
