use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Fastest tempo the scheduler accepts
pub const MAX_TEMPO_BPM: f64 = 2000.0;
/// Longest measure the scheduler accepts, in beats
pub const MAX_BEATS_PER_MEASURE: u32 = 64;
/// Finest subdivision the scheduler accepts, in pulses per beat
pub const MAX_SUBDIVISION: u32 = 64;

/// Scheduler settings
///
/// Two clocks are involved. `wake_period` is the coarse, jittery host timer
/// that decides *when* the scheduler looks ahead. `schedule_ahead`,
/// `startup_offset` and `tone_duration` are in seconds of the audio clock,
/// which decides *when* clicks sound. `schedule_ahead` must comfortably
/// exceed the worst wake-up delay or clicks arrive late.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    pub tempo_bpm: f64,
    pub beats_per_measure: u32,
    /// Pulses per beat
    pub subdivision: u32,
    /// Period of the host wake-up
    pub wake_period: Duration,
    /// Lookahead window filled on every wake-up (seconds)
    pub schedule_ahead: f64,
    /// Delay between `start()` and the first click (seconds)
    pub startup_offset: f64,
    /// Length of each click (seconds)
    pub tone_duration: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: 120.0,
            beats_per_measure: 4,
            subdivision: 1,
            wake_period: Duration::from_millis(25),
            schedule_ahead: 0.1,
            startup_offset: 0.05,
            tone_duration: 0.03,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_tempo(self.tempo_bpm)?;
        validate_beats_per_measure(self.beats_per_measure)?;
        validate_subdivision(self.subdivision)?;

        if self.wake_period.is_zero() {
            return Err(ConfigurationError::NonPositive {
                name: "wake period",
                value: 0.0,
            });
        }
        positive("schedule-ahead window", self.schedule_ahead)?;
        positive("tone duration", self.tone_duration)?;

        if !self.startup_offset.is_finite() || self.startup_offset < 0.0 {
            return Err(ConfigurationError::NegativeStartupOffset(
                self.startup_offset,
            ));
        }

        Ok(())
    }
}

pub(crate) fn validate_tempo(bpm: f64) -> Result<(), ConfigurationError> {
    if bpm.is_finite() && bpm > 0.0 && bpm <= MAX_TEMPO_BPM {
        Ok(())
    } else {
        Err(ConfigurationError::Tempo {
            value: bpm,
            max: MAX_TEMPO_BPM,
        })
    }
}

pub(crate) fn validate_beats_per_measure(beats: u32) -> Result<(), ConfigurationError> {
    if (1..=MAX_BEATS_PER_MEASURE).contains(&beats) {
        Ok(())
    } else {
        Err(ConfigurationError::BeatsPerMeasure {
            value: beats,
            max: MAX_BEATS_PER_MEASURE,
        })
    }
}

pub(crate) fn validate_subdivision(subdivision: u32) -> Result<(), ConfigurationError> {
    if (1..=MAX_SUBDIVISION).contains(&subdivision) {
        Ok(())
    } else {
        Err(ConfigurationError::Subdivision {
            value: subdivision,
            max: MAX_SUBDIVISION,
        })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositive { name, value })
    }
}
