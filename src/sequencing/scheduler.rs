//! Lookahead click scheduler.
//!
//! The host wakes the scheduler every few tens of milliseconds, late and
//! irregularly. Each wake-up fills the next `schedule_ahead` seconds of the
//! audio clock with clicks whose start times come from pure accumulation
//! (`next_event_time += seconds_per_pulse`), never from "now". Wake-up jitter
//! therefore changes *when* a click is decided, not *when* it sounds, as long
//! as the window is longer than the worst wake-up delay.

use std::time::{Duration, Instant};

use super::config::{
    validate_beats_per_measure, validate_subdivision, validate_tempo, SchedulerConfig,
};
use super::meter::Meter;
use super::pulse::{PulseEvent, PulseListener};
use crate::clock::{AudioClock, ToneRequest};
use crate::error::{ClockError, Result};

/// The periodic wake-up, owned by a running scheduler
///
/// Plays the role of an interval timer in a single-threaded host: the host
/// loop sleeps for `time_until()` and polls when it is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollHandle {
    period: Duration,
    next_wake: Instant,
}

impl PollHandle {
    fn arm(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_wake: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_wake(&self) -> Instant {
        self.next_wake
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_wake
    }

    pub fn time_until(&self, now: Instant) -> Duration {
        self.next_wake.saturating_duration_since(now)
    }

    /// Schedule the following wake-up. Wake-ups missed while the host was
    /// busy are coalesced into one.
    fn rearm(&mut self, now: Instant) {
        self.next_wake += self.period;
        if self.next_wake <= now {
            self.next_wake = now + self.period;
        }
    }
}

/// Lookahead click scheduler
///
/// Emits every pulse twice: as a [`ToneRequest`] to the audio clock `C`, then
/// as a [`PulseEvent`] to the listener `L`. Instances share nothing, so any
/// number can run side by side.
pub struct Scheduler<C: AudioClock, L: PulseListener = ()> {
    clock: C,
    listener: L,
    config: SchedulerConfig,
    tempo_bpm: f64,
    meter: Meter,
    pulse_index: u32,
    next_event_time: f64,
    /// `Some` exactly while running
    poll: Option<PollHandle>,
}

impl<C: AudioClock> Scheduler<C, ()> {
    /// Scheduler with default settings and no visual listener
    pub fn new(clock: C) -> Self {
        Self::with_listener(clock, ())
    }
}

impl<C: AudioClock, L: PulseListener> Scheduler<C, L> {
    /// Scheduler with default settings
    pub fn with_listener(clock: C, listener: L) -> Self {
        Self::build(clock, listener, SchedulerConfig::default())
    }

    /// Scheduler with custom settings, validated up front
    pub fn with_config(clock: C, listener: L, config: SchedulerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(clock, listener, config))
    }

    fn build(clock: C, listener: L, config: SchedulerConfig) -> Self {
        Self {
            clock,
            listener,
            tempo_bpm: config.tempo_bpm,
            meter: Meter::new(config.beats_per_measure, config.subdivision),
            config,
            pulse_index: 0,
            next_event_time: 0.0,
            poll: None,
        }
    }

    /// Change the tempo. Clicks already scheduled keep their times; the new
    /// tempo applies from the next computed interval.
    pub fn set_tempo(&mut self, bpm: f64) -> Result<()> {
        validate_tempo(bpm)?;
        log::debug!("tempo {} -> {bpm} BPM", self.tempo_bpm);
        self.tempo_bpm = bpm;
        Ok(())
    }

    /// Change the beats per measure. The pulse index is left alone and
    /// wrapped into the new measure on the next advance.
    pub fn set_meter(&mut self, beats_per_measure: u32) -> Result<()> {
        validate_beats_per_measure(beats_per_measure)?;
        log::debug!(
            "beats per measure {} -> {beats_per_measure}",
            self.meter.beats_per_measure
        );
        self.meter.beats_per_measure = beats_per_measure;
        Ok(())
    }

    /// Change the pulses per beat. Same contract as [`Self::set_meter`].
    pub fn set_subdivision(&mut self, subdivision: u32) -> Result<()> {
        validate_subdivision(subdivision)?;
        log::debug!(
            "subdivision {} -> {subdivision}",
            self.meter.subdivision
        );
        self.meter.subdivision = subdivision;
        Ok(())
    }

    /// Start clicking. No-op if already running.
    ///
    /// Acquires the audio clock and places the first click `startup_offset`
    /// seconds after the clock's current time. On failure the scheduler
    /// stays stopped.
    pub fn start(&mut self) -> Result<()> {
        self.start_at(Instant::now())
    }

    /// [`Self::start`] with an explicit host time for arming the wake-up
    pub fn start_at(&mut self, now: Instant) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }

        self.clock.acquire()?;
        let clock_now = self.clock.now()?;

        self.pulse_index = 0;
        self.next_event_time = clock_now + self.config.startup_offset;
        self.poll = Some(PollHandle::arm(self.config.wake_period, now));

        log::debug!(
            "started at clock {clock_now:.4}s, first click at {:.4}s",
            self.next_event_time
        );
        Ok(())
    }

    /// Stop clicking. No-op if already stopped. Clicks already handed to the
    /// audio clock still play.
    pub fn stop(&mut self) {
        if self.poll.take().is_some() {
            log::debug!("stopped");
        }
    }

    /// Flip between running and stopped
    pub fn toggle(&mut self) -> Result<()> {
        if self.is_running() {
            self.stop();
            Ok(())
        } else {
            self.start()
        }
    }

    /// Run the wake-up if it is due. Returns the number of clicks scheduled.
    pub fn poll(&mut self) -> Result<usize> {
        self.poll_at(Instant::now())
    }

    /// [`Self::poll`] with an explicit host time
    pub fn poll_at(&mut self, now: Instant) -> Result<usize> {
        match &mut self.poll {
            Some(handle) if handle.is_due(now) => handle.rearm(now),
            _ => return Ok(0),
        }
        self.advance()
    }

    /// How long the host may sleep before the next poll; `None` when stopped
    pub fn time_until_wake(&self) -> Option<Duration> {
        self.time_until_wake_at(Instant::now())
    }

    pub fn time_until_wake_at(&self, now: Instant) -> Option<Duration> {
        self.poll.map(|handle| handle.time_until(now))
    }

    /// Fill the lookahead window. Returns the number of clicks scheduled.
    ///
    /// Normally driven by [`Self::poll`]; does nothing while stopped. If the
    /// audio clock fails part way, the scheduler stops and the error is
    /// returned. Clicks scheduled before the failure stand.
    pub fn advance(&mut self) -> Result<usize> {
        if !self.is_running() {
            return Ok(0);
        }

        // A meter change may have shrunk the measure under the cursor
        self.pulse_index %= self.meter.pulses_per_measure();

        let horizon = match self.clock.now() {
            Ok(now) => now + self.config.schedule_ahead,
            Err(err) => return Err(self.abort(err)),
        };

        let mut scheduled = 0;
        while self.next_event_time < horizon {
            if let Err(err) = self.schedule_pulse() {
                return Err(self.abort(err));
            }
            self.next_pulse();
            scheduled += 1;
        }

        Ok(scheduled)
    }

    /// Hand the pulse under the cursor to the clock, then to the listener
    fn schedule_pulse(&mut self) -> std::result::Result<(), ClockError> {
        let event = PulseEvent {
            index: self.pulse_index,
            kind: self.meter.classify(self.pulse_index),
            time: self.next_event_time,
        };

        self.clock.schedule_tone(ToneRequest {
            frequency: event.kind.frequency(),
            start_time: event.time,
            duration: self.config.tone_duration,
        })?;

        log::trace!(
            "pulse {} ({:?}) at {:.4}s",
            event.index,
            event.kind,
            event.time
        );
        self.listener.on_pulse(&event);
        Ok(())
    }

    /// Move the cursor one pulse forward at the current tempo
    fn next_pulse(&mut self) {
        self.next_event_time += self.meter.seconds_per_pulse(self.tempo_bpm);
        self.pulse_index = (self.pulse_index + 1) % self.meter.pulses_per_measure();
    }

    fn abort(&mut self, err: ClockError) -> crate::error::Error {
        log::error!("audio clock failed, stopping: {err}");
        self.poll = None;
        err.into()
    }

    pub fn is_running(&self) -> bool {
        self.poll.is_some()
    }

    pub fn poll_handle(&self) -> Option<&PollHandle> {
        self.poll.as_ref()
    }

    pub fn tempo(&self) -> f64 {
        self.tempo_bpm
    }

    pub fn meter(&self) -> Meter {
        self.meter
    }

    pub fn beats_per_measure(&self) -> u32 {
        self.meter.beats_per_measure
    }

    pub fn subdivision(&self) -> u32 {
        self.meter.subdivision
    }

    /// Index of the next pulse to schedule, within the current measure
    pub fn current_pulse_index(&self) -> u32 {
        self.pulse_index % self.meter.pulses_per_measure()
    }

    /// Start time of the next pulse to schedule
    pub fn next_event_time(&self) -> f64 {
        self.next_event_time
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Current audio clock time
    pub fn clock_time(&self) -> Result<f64> {
        Ok(self.clock.now()?)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Take the clock and listener back
    pub fn into_parts(self) -> (C, L) {
        (self.clock, self.listener)
    }
}
