#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::pulse::PulseKind;

/// Beats per measure combined with pulses per beat
///
/// A measure holds `beats_per_measure * subdivision` pulses. Pulse indices
/// count from 0 at the downbeat.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meter {
    pub beats_per_measure: u32,
    pub subdivision: u32,
}

impl Meter {
    pub const fn new(beats_per_measure: u32, subdivision: u32) -> Self {
        Self {
            beats_per_measure,
            subdivision,
        }
    }

    /// Number of pulses in one measure
    pub fn pulses_per_measure(&self) -> u32 {
        self.beats_per_measure * self.subdivision
    }

    /// Classify a pulse index against this meter.
    ///
    /// Uses the meter as it is now, so an index scheduled before a meter
    /// change is classified by the new meter.
    pub fn classify(&self, index: u32) -> PulseKind {
        if index % self.pulses_per_measure() == 0 {
            PulseKind::MeasureStart
        } else if index % self.subdivision == 0 {
            PulseKind::Beat
        } else {
            PulseKind::Subdivision
        }
    }

    /// 0-based beat number containing the pulse
    pub fn beat_of(&self, index: u32) -> u32 {
        (index % self.pulses_per_measure()) / self.subdivision
    }

    /// Seconds between consecutive pulses at the given tempo
    pub fn seconds_per_pulse(&self, tempo_bpm: f64) -> f64 {
        60.0 / tempo_bpm / self.subdivision as f64
    }
}

impl Default for Meter {
    fn default() -> Self {
        Self::new(4, 1)
    }
}
