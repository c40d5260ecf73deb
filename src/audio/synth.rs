//! Procedural sound synthesizer
//!
//! Turns a compact parameter set into mono samples. Every cue in the game is
//! one of these parameter sets; nothing is loaded from files.

use rand::Rng;
use std::f64::consts::TAU;

/// Output sample rate (Hz)
pub const SAMPLE_RATE: f64 = 44_100.0;
/// Global gain applied to every sound
pub const MASTER_GAIN: f64 = 0.3;

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Sine,
    Triangle,
    Saw,
    /// Clipped tangent, harsh and buzzy
    Tan,
    /// Sine of the cubed phase, noisy
    Noise,
}

impl Shape {
    #[inline]
    fn sample(self, t: f64) -> f64 {
        match self {
            Shape::Sine => t.sin(),
            Shape::Triangle => 1.0 - 4.0 * ((t / TAU).round() - t / TAU).abs(),
            Shape::Saw => 1.0 - ((2.0 * t / TAU) % 2.0 + 2.0) % 2.0,
            Shape::Tan => t.tan().clamp(-1.0, 1.0),
            Shape::Noise => (t % TAU).powi(3).sin(),
        }
    }
}

/// Parameter set for one sound. Times are in seconds, frequencies in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthParams {
    pub volume: f64,
    /// Random pitch spread per play (fraction of frequency)
    pub randomness: f64,
    pub frequency: f64,
    pub attack: f64,
    pub sustain: f64,
    pub release: f64,
    pub shape: Shape,
    /// Exponent applied to the waveform magnitude
    pub shape_curve: f64,
    pub slide: f64,
    pub delta_slide: f64,
    pub pitch_jump: f64,
    pub pitch_jump_time: f64,
    pub repeat_time: f64,
    pub noise: f64,
    pub modulation: f64,
    pub bit_crush: f64,
    pub delay: f64,
    pub sustain_volume: f64,
    pub decay: f64,
    pub tremolo: f64,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            volume: 1.0,
            randomness: 0.05,
            frequency: 220.0,
            attack: 0.0,
            sustain: 0.0,
            release: 0.1,
            shape: Shape::Sine,
            shape_curve: 1.0,
            slide: 0.0,
            delta_slide: 0.0,
            pitch_jump: 0.0,
            pitch_jump_time: 0.0,
            repeat_time: 0.0,
            noise: 0.0,
            modulation: 0.0,
            bit_crush: 0.0,
            delay: 0.0,
            sustain_volume: 1.0,
            decay: 0.0,
            tremolo: 0.0,
        }
    }
}

impl SynthParams {
    /// Number of samples `render` produces
    pub fn sample_count(&self) -> usize {
        let attack = self.attack * SAMPLE_RATE + 9.0;
        (attack + (self.decay + self.sustain + self.release + self.delay) * SAMPLE_RATE) as usize
    }

    /// Peak absolute amplitude any rendered sample can reach
    pub fn peak(&self) -> f64 {
        self.volume.abs() * MASTER_GAIN
    }
}

/// Render a parameter set to samples at `SAMPLE_RATE`
pub fn render<R: Rng + ?Sized>(p: &SynthParams, rng: &mut R) -> Vec<f32> {
    let r = SAMPLE_RATE;

    let mut slide = p.slide * 500.0 * TAU / r / r;
    let start_slide = slide;
    let spread = if p.randomness > 0.0 {
        p.randomness * 2.0 * rng.random::<f64>() - p.randomness
    } else {
        0.0
    };
    let mut frequency = p.frequency * (1.0 + spread) * TAU / r;
    let mut start_frequency = frequency;

    let attack = p.attack * r + 9.0;
    let decay = p.decay * r;
    let sustain = p.sustain * r;
    let release = p.release * r;
    let delay = p.delay * r;
    let delta_slide = p.delta_slide * 500.0 * TAU / (r * r * r);
    let modulation = p.modulation * TAU / r;
    let pitch_jump = p.pitch_jump * TAU / r;
    let pitch_jump_time = p.pitch_jump_time * r;
    let repeat_time = (p.repeat_time * r) as u64;
    let crush = (p.bit_crush * 100.0) as u64;

    let length = p.sample_count();
    let len_f = length as f64;
    let gain = p.volume * MASTER_GAIN;

    let mut out: Vec<f32> = Vec::with_capacity(length);
    let mut t = 0.0f64;
    let mut tm = 0.0f64;
    let mut jump_counter = 1u64;
    let mut repeat_counter = 0u64;
    let mut crush_counter = 0u64;
    let mut s = 0.0f64;

    for i in 0..length {
        let fi = i as f64;

        crush_counter += 1;
        if crush == 0 || crush_counter % crush == 0 {
            let wave = p.shape.sample(t);
            let tremolo = if repeat_time > 0 {
                1.0 - p.tremolo + p.tremolo * (TAU * fi / repeat_time as f64).sin()
            } else {
                1.0
            };
            let envelope = if fi < attack {
                fi / attack
            } else if fi < attack + decay {
                1.0 - ((fi - attack) / decay) * (1.0 - p.sustain_volume)
            } else if fi < attack + decay + sustain {
                p.sustain_volume
            } else if fi < len_f - delay {
                (len_f - fi - delay) / release * p.sustain_volume
            } else {
                0.0
            };

            s = tremolo * wave.signum() * wave.abs().powf(p.shape_curve) * gain * envelope;

            if delay > 0.0 {
                let echo = if delay > fi {
                    0.0
                } else {
                    let fade = if fi < len_f - delay {
                        1.0
                    } else {
                        (len_f - fi) / delay
                    };
                    fade * out[(fi - delay) as usize] as f64 / 2.0
                };
                s = s / 2.0 + echo;
            }
        }
        out.push(s as f32);

        slide += delta_slide;
        frequency += slide;
        let f = frequency * (modulation * tm).cos();
        tm += 1.0;
        let grain = 1.0 - ((fi.sin() + 1.0) * 1e9) % 2.0;
        t += f - f * p.noise * grain;

        if jump_counter > 0 {
            jump_counter += 1;
            if jump_counter as f64 > pitch_jump_time {
                frequency += pitch_jump;
                start_frequency += pitch_jump;
                jump_counter = 0;
            }
        }

        if repeat_time > 0 {
            repeat_counter += 1;
            if repeat_counter % repeat_time == 0 {
                frequency = start_frequency;
                slide = start_slide;
                if jump_counter == 0 {
                    jump_counter = 1;
                }
            }
        }
    }

    out
}
