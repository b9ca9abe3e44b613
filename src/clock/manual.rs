use super::{AudioClock, ToneRequest};
use crate::error::ClockError;

/// Clock whose time only moves when told to
///
/// Records every tone it accepts instead of playing it. Failure modes can be
/// switched on to exercise the scheduler's error paths.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    time: f64,
    acquired: bool,
    refuse_acquire: bool,
    disconnected: bool,
    /// Accept this many more tones, then report a disconnect
    tones_before_failure: Option<usize>,
    tones: Vec<ToneRequest>,
}

impl ManualClock {
    /// Clock at time 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock whose `acquire()` always fails, like a machine with no output
    /// device
    pub fn unavailable() -> Self {
        Self {
            refuse_acquire: true,
            ..Self::default()
        }
    }

    /// Jump to an absolute time. Ignored if it would move backwards.
    pub fn set_time(&mut self, time: f64) {
        if time > self.time {
            self.time = time;
        }
    }

    /// Move time forward by `seconds`
    pub fn advance(&mut self, seconds: f64) {
        self.set_time(self.time + seconds);
    }

    /// Simulate the device going away: every later call fails
    pub fn disconnect(&mut self) {
        self.disconnected = true;
    }

    /// Accept `count` more tones, then disconnect on the next one
    pub fn fail_after_tones(&mut self, count: usize) {
        self.tones_before_failure = Some(count);
    }

    pub fn is_acquired(&self) -> bool {
        self.acquired
    }

    /// Tones accepted so far, in the order they were scheduled
    pub fn tones(&self) -> &[ToneRequest] {
        &self.tones
    }

    /// Take the recorded tones, leaving the record empty
    pub fn take_tones(&mut self) -> Vec<ToneRequest> {
        std::mem::take(&mut self.tones)
    }
}

impl AudioClock for ManualClock {
    fn acquire(&mut self) -> Result<(), ClockError> {
        if self.refuse_acquire {
            return Err(ClockError::NoDevice);
        }
        if self.disconnected {
            return Err(ClockError::Disconnected);
        }
        self.acquired = true;
        Ok(())
    }

    fn now(&self) -> Result<f64, ClockError> {
        if !self.acquired {
            return Err(ClockError::NotAcquired);
        }
        if self.disconnected {
            return Err(ClockError::Disconnected);
        }
        Ok(self.time)
    }

    fn schedule_tone(&mut self, tone: ToneRequest) -> Result<(), ClockError> {
        self.now()?;

        match self.tones_before_failure {
            Some(0) => {
                self.disconnected = true;
                return Err(ClockError::Disconnected);
            }
            Some(ref mut remaining) => *remaining -= 1,
            None => {}
        }

        self.tones.push(tone);
        Ok(())
    }
}
