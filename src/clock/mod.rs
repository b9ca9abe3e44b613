//! Audio clock sources.
//!
//! The scheduler never sleeps on the audio clock and never asks it to play
//! "now". It reads the clock's current time, decides which clicks fall inside
//! the lookahead window, and hands each one over with an absolute start time.
//! The clock source is responsible for starting the click on that exact
//! sample.

/// Deterministic clock driven by the caller.
pub mod manual;

/// Default output device through cpal, fed over a realtime-safe ring buffer.
#[cfg(feature = "rtrb")]
pub mod device;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ClockError;

pub use manual::ManualClock;

#[cfg(feature = "rtrb")]
pub use device::CpalClock;

/// A click to start at an exact time
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRequest {
    /// Pitch in Hz
    pub frequency: f32,
    /// Start time in the clock's domain (seconds)
    pub start_time: f64,
    /// How long the click sounds (seconds)
    pub duration: f64,
}

/// Monotonic high-resolution clock that can start tones in the future
pub trait AudioClock {
    /// Obtain the underlying audio resource.
    ///
    /// Called by the scheduler on every `start()`; must be cheap and
    /// idempotent once acquired.
    fn acquire(&mut self) -> Result<(), ClockError> {
        Ok(())
    }

    /// Current time in seconds. Never decreases.
    fn now(&self) -> Result<f64, ClockError>;

    /// Queue a tone. Fire-and-forget: once accepted, the tone plays even if
    /// the scheduler stops.
    fn schedule_tone(&mut self, tone: ToneRequest) -> Result<(), ClockError>;
}

impl<C: AudioClock + ?Sized> AudioClock for Box<C> {
    fn acquire(&mut self) -> Result<(), ClockError> {
        (**self).acquire()
    }

    fn now(&self) -> Result<f64, ClockError> {
        (**self).now()
    }

    fn schedule_tone(&mut self, tone: ToneRequest) -> Result<(), ClockError> {
        (**self).schedule_tone(tone)
    }
}
