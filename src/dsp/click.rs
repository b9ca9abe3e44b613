use std::f32::consts::TAU;

/*
Metronome Click
===============

A click is a short sine burst. Its loudness follows a hold-then-decay
envelope:

  Gain
    1.0 ┤━━━━━━━━━┓
        │         ┃╲
        │         ┃ ╲_
        │         ┃   ╲__
        │         ┃      ╲___          (would reach 0.001 at 50ms)
    0.0 └─────────┸──────────┸───────→ Time
        0        10ms       30ms
               hold ends   cut off

- Hold: full gain for the first 10ms, so the attack is a hard edge the ear
  can place precisely.
- Decay: exponential, shaped so the gain would fall to 0.001 (-60dB) 40ms
  after the hold ends.
- Cut off: the voice stops at the requested duration (30ms for the
  scheduler's clicks), before the decay finishes.

Exponential decay is a constant ratio per sample:

    factor = floor^(1 / (decay_time * sample_rate))

so the envelope is one multiply per sample after the hold.

Voices can start partway into a block. `delay` is the number of frames of
the current block to skip before the first sample, which is what makes a
click land on its exact sample instead of on a block boundary.
*/

/// Time at full gain before the decay starts (seconds)
pub const HOLD_TIME: f32 = 0.01;
/// Time for the decay to reach `DECAY_FLOOR` (seconds)
pub const DECAY_TIME: f32 = 0.04;
/// Gain the decay aims for at `HOLD_TIME + DECAY_TIME`
pub const DECAY_FLOOR: f32 = 0.001;

/// One sounding click
#[derive(Debug, Clone)]
pub struct ClickVoice {
    phase: f32,
    phase_increment: f32,
    gain: f32,
    decay_factor: f32,
    hold_remaining: u32,
    /// Samples left to produce (not counting delay)
    remaining: u32,
    /// Frames to skip at the start of the next rendered block
    delay: u32,
}

impl ClickVoice {
    pub fn new(sample_rate: f32, frequency: f32, duration: f64) -> Self {
        let total = (duration * sample_rate as f64).round().max(1.0) as u32;
        let hold = (HOLD_TIME * sample_rate).round() as u32;
        let decay_samples = (DECAY_TIME * sample_rate).max(1.0);

        Self {
            phase: 0.0,
            phase_increment: TAU * frequency / sample_rate,
            gain: 1.0,
            decay_factor: DECAY_FLOOR.powf(1.0 / decay_samples),
            hold_remaining: hold,
            remaining: total,
            delay: 0,
        }
    }

    /// Start `frames` into the next rendered block
    pub fn with_delay(mut self, frames: u32) -> Self {
        self.delay = frames;
        self
    }

    /// Mix this click into `out`, advancing its state by `out.len()` frames.
    pub fn render_add(&mut self, out: &mut [f32]) {
        let skip = (self.delay as usize).min(out.len());
        self.delay -= skip as u32;

        for sample in out[skip..].iter_mut() {
            if self.remaining == 0 {
                break;
            }

            *sample += self.phase.sin() * self.gain;

            self.phase += self.phase_increment;
            if self.phase >= TAU {
                self.phase -= TAU;
            }

            if self.hold_remaining > 0 {
                self.hold_remaining -= 1;
            } else {
                self.gain *= self.decay_factor;
            }

            self.remaining -= 1;
        }
    }

    /// True once every sample has been produced
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Current envelope gain (0.0 - 1.0)
    pub fn gain(&self) -> f32 {
        self.gain
    }
}
