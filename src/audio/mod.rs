//! Sound cues
//!
//! Every game event maps to one cue, and every cue to one fixed synth
//! parameter set. Output goes through an `AudioSink` so the game loop works
//! the same with Web Audio, with no audio at all, or in tests.

pub mod synth;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

use crate::settings::Settings;
use crate::sim::GameEvent;
use synth::{Shape, SynthParams};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Ball hits a side wall or the ceiling
    WallBounce,
    /// Ball hits the paddle
    PaddleBounce,
    /// Brick destroyed
    BrickDestroy,
    /// Ball lost, lives remain
    LifeLost,
    /// Last life lost
    GameOver,
    /// All bricks cleared
    Win,
    /// Game started from a menu or end screen
    UiConfirm,
}

impl SoundCue {
    pub const ALL: [SoundCue; 7] = [
        SoundCue::WallBounce,
        SoundCue::PaddleBounce,
        SoundCue::BrickDestroy,
        SoundCue::LifeLost,
        SoundCue::GameOver,
        SoundCue::Win,
        SoundCue::UiConfirm,
    ];

    /// Cue fired for a game event
    pub fn for_event(event: &GameEvent) -> SoundCue {
        match event {
            GameEvent::Started => SoundCue::UiConfirm,
            GameEvent::WallBounce => SoundCue::WallBounce,
            GameEvent::PaddleBounce => SoundCue::PaddleBounce,
            GameEvent::BrickDestroyed { .. } => SoundCue::BrickDestroy,
            GameEvent::LifeLost { .. } => SoundCue::LifeLost,
            GameEvent::GameOver => SoundCue::GameOver,
            GameEvent::Win => SoundCue::Win,
        }
    }

    /// Fixed synth parameters for this cue
    pub fn params(self) -> SynthParams {
        let d = SynthParams::default();
        match self {
            // Short descending click
            SoundCue::UiConfirm => SynthParams {
                volume: 2.01,
                frequency: 1680.0,
                attack: 0.01,
                sustain: 0.02,
                release: 0.01,
                shape_curve: 0.95,
                delta_slide: -26.0,
                pitch_jump: 417.0,
                pitch_jump_time: 0.02,
                delay: 0.05,
                sustain_volume: 0.27,
                decay: 0.01,
                ..d
            },
            // Crunchy noise burst
            SoundCue::BrickDestroy => SynthParams {
                volume: 1.01,
                frequency: 766.0,
                attack: 0.03,
                sustain: 0.05,
                release: 0.05,
                shape: Shape::Noise,
                shape_curve: 0.98,
                delta_slide: 0.1,
                noise: 0.9,
                modulation: 38.0,
                bit_crush: 0.8,
                sustain_volume: 0.38,
                decay: 0.05,
                ..d
            },
            SoundCue::PaddleBounce => SynthParams {
                frequency: 172.0,
                attack: 0.01,
                sustain: 0.04,
                release: 0.06,
                shape_curve: 1.13,
                slide: 0.1,
                noise: 0.9,
                modulation: -101.0,
                bit_crush: 0.2,
                sustain_volume: 0.66,
                decay: 0.04,
                tremolo: 0.3,
                ..d
            },
            SoundCue::WallBounce => SynthParams {
                volume: 0.5,
                randomness: 0.0,
                frequency: 140.0,
                attack: 0.01,
                sustain: 0.02,
                release: 0.04,
                shape: Shape::Saw,
                shape_curve: 1.13,
                slide: 0.1,
                noise: 0.9,
                modulation: -101.0,
                bit_crush: 0.2,
                sustain_volume: 0.2,
                decay: 0.02,
                tremolo: 0.3,
                ..d
            },
            // Falling warble
            SoundCue::LifeLost => SynthParams {
                frequency: 294.0,
                attack: 0.01,
                sustain: 0.12,
                release: 0.23,
                shape: Shape::Saw,
                shape_curve: 0.16,
                slide: -10.0,
                delta_slide: 10.0,
                pitch_jump_time: 0.09,
                repeat_time: 0.07,
                noise: 0.1,
                sustain_volume: 0.78,
                decay: 0.18,
                ..d
            },
            SoundCue::GameOver => SynthParams {
                volume: 1.57,
                frequency: 674.0,
                attack: 0.03,
                sustain: 0.15,
                release: 0.38,
                shape: Shape::Triangle,
                shape_curve: 0.38,
                slide: -0.7,
                delta_slide: -0.1,
                pitch_jump: -9.0,
                pitch_jump_time: 0.14,
                repeat_time: 0.19,
                modulation: 43.0,
                delay: 0.05,
                sustain_volume: 0.55,
                decay: 0.12,
                ..d
            },
            // Rising arpeggio
            SoundCue::Win => SynthParams {
                frequency: 137.0,
                attack: 0.02,
                sustain: 0.4,
                release: 0.4,
                shape: Shape::Triangle,
                shape_curve: 1.88,
                pitch_jump: 39.0,
                pitch_jump_time: 0.16,
                repeat_time: 0.05,
                sustain_volume: 0.5,
                decay: 0.24,
                ..d
            },
        }
    }
}

/// Anything that can play a cue
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);

    /// Pick up volume/mute changes
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Silent sink for native builds and headless runs
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("cue {:?}", cue);
    }
}

/// Sink that remembers every cue, in order
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<SoundCue>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: SoundCue) {
        self.played.push(cue);
    }
}
