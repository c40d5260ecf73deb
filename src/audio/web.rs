//! Audio system using Web Audio API
//!
//! Cues are synthesized on the fly and played from one-shot buffers.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use web_sys::AudioContext;

use super::synth::{self, SAMPLE_RATE};
use super::{AudioSink, SoundCue};
use crate::settings::Settings;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Gain applied to every cue, 0 when muted
    volume: f32,
    rng: Pcg32,
}

impl AudioManager {
    pub fn new(seed: u64) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: Settings::default().effective_volume(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Render a cue and start it on a fresh buffer source
    fn play_samples(ctx: &AudioContext, samples: &[f32]) -> Option<()> {
        let buffer = ctx
            .create_buffer(1, samples.len() as u32, SAMPLE_RATE as f32)
            .ok()?;
        buffer.copy_to_channel(samples, 0).ok()?;

        let source = ctx.create_buffer_source().ok()?;
        source.set_buffer(Some(&buffer));
        source.connect_with_audio_node(&ctx.destination()).ok()?;
        source.start().ok()?;
        Some(())
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, cue: SoundCue) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let mut samples = synth::render(&cue.params(), &mut self.rng);
        if samples.is_empty() {
            return;
        }
        for s in &mut samples {
            *s *= vol;
        }

        if Self::play_samples(ctx, &samples).is_none() {
            log::warn!("Failed to play {:?}", cue);
        }
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.clone().sanitized().effective_volume();
    }
}
