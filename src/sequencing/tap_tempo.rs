//! Tap tempo: estimate BPM from a run of taps.

use std::collections::VecDeque;

/// Taps kept for averaging; older taps fall out of the window
pub const MAX_TAPS: usize = 8;

/// Sliding window of tap timestamps
///
/// The estimate is the plain mean of the intervals between the retained
/// taps. There is no outlier rejection: one stray tap skews the result until
/// it leaves the window.
#[derive(Debug, Clone, Default)]
pub struct TapTempo {
    /// Tap timestamps in milliseconds, oldest first
    taps: VecDeque<f64>,
}

impl TapTempo {
    pub fn new() -> Self {
        Self {
            taps: VecDeque::with_capacity(MAX_TAPS),
        }
    }

    /// Record a tap at `at_ms` and return the tempo estimate, if any.
    ///
    /// Needs at least two taps. Returns `None` when the retained taps do not
    /// move forward in time (mean interval of zero or less).
    pub fn tap(&mut self, at_ms: f64) -> Option<f64> {
        if self.taps.len() == MAX_TAPS {
            self.taps.pop_front();
        }
        self.taps.push_back(at_ms);
        self.bpm()
    }

    /// Current estimate without recording a tap
    pub fn bpm(&self) -> Option<f64> {
        let (first, last) = (self.taps.front()?, self.taps.back()?);
        let intervals = self.taps.len() - 1;
        if intervals == 0 {
            return None;
        }

        // Mean of consecutive differences telescopes to (last - first) / n
        let mean_interval_ms = (last - first) / intervals as f64;
        if mean_interval_ms > 0.0 && mean_interval_ms.is_finite() {
            Some(60_000.0 / mean_interval_ms)
        } else {
            None
        }
    }

    /// Number of retained taps
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Forget all taps
    pub fn reset(&mut self) {
        self.taps.clear();
    }
}
