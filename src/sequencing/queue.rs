use std::collections::VecDeque;

use super::pulse::{PulseEvent, PulseListener};

/// Pulses waiting to be shown
///
/// Pulses are scheduled up to a lookahead window before they sound. A
/// front-end that lit a beat the moment it was scheduled would run ahead of
/// the audio, so it queues pulses here and asks for the ones that are due
/// against the audio clock on every frame.
#[derive(Debug, Clone, Default)]
pub struct PulseQueue {
    pending: VecDeque<PulseEvent>,
}

impl PulseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest pulse whose start time is at or before `now`.
    ///
    /// Earlier due pulses are dropped: only the most recent one is worth
    /// drawing. Returns `None` if nothing became due.
    pub fn pop_due(&mut self, now: f64) -> Option<PulseEvent> {
        let mut latest = None;
        while let Some(event) = self.pending.front() {
            if event.time > now {
                break;
            }
            latest = self.pending.pop_front();
        }
        latest
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop everything not yet shown (e.g. on stop)
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl PulseListener for PulseQueue {
    fn on_pulse(&mut self, event: &PulseEvent) {
        self.pending.push_back(*event);
    }
}
