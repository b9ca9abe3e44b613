use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use super::click::ClickVoice;
use crate::clock::ToneRequest;

/// Where the renderer gets its tone requests from
pub trait ToneSource {
    fn pop(&mut self) -> Option<ToneRequest>;
}

#[cfg(feature = "rtrb")]
impl ToneSource for Consumer<ToneRequest> {
    fn pop(&mut self) -> Option<ToneRequest> {
        Consumer::pop(self).ok()
    }
}

/// Offline source: requests queued up front
impl ToneSource for VecDeque<ToneRequest> {
    fn pop(&mut self) -> Option<ToneRequest> {
        self.pop_front()
    }
}

/// A click waiting for its start frame
#[derive(Debug, Clone, Copy)]
struct PendingClick {
    start_frame: u64,
    tone: ToneRequest,
}

const PENDING_CAPACITY: usize = 256;
const VOICE_CAPACITY: usize = 16;

/// Turns timestamped tone requests into sample-accurate audio
///
/// Runs on the audio thread. Time is counted in frames rendered since the
/// renderer was created; `position() / sample_rate` is the clock the
/// scheduler reads.
pub struct ClickRenderer<S: ToneSource> {
    source: S,
    sample_rate: f32,
    /// Frames rendered so far
    position: u64,
    /// Sorted by start frame
    pending: Vec<PendingClick>,
    voices: Vec<ClickVoice>,
    /// Clicks whose start frame had already passed when they arrived
    late: u64,
}

impl<S: ToneSource> ClickRenderer<S> {
    pub fn new(source: S, sample_rate: f32) -> Self {
        Self {
            source,
            sample_rate,
            position: 0,
            pending: Vec::with_capacity(PENDING_CAPACITY),
            voices: Vec::with_capacity(VOICE_CAPACITY),
            late: 0,
        }
    }

    /// Render the next block (mono) into `out`, overwriting it.
    pub fn render(&mut self, out: &mut [f32]) {
        self.receive();

        out.fill(0.0);

        let block_start = self.position;
        let block_end = block_start + out.len() as u64;

        // Start every click that begins inside this block (or was missed)
        let due = self
            .pending
            .partition_point(|click| click.start_frame < block_end);
        for click in self.pending.drain(..due) {
            let offset = if click.start_frame < block_start {
                self.late += 1;
                0
            } else {
                (click.start_frame - block_start) as u32
            };
            let voice = ClickVoice::new(
                self.sample_rate,
                click.tone.frequency,
                click.tone.duration,
            )
            .with_delay(offset);
            self.voices.push(voice);
        }

        for voice in &mut self.voices {
            voice.render_add(out);
        }
        self.voices.retain(|voice| !voice.is_finished());

        for sample in out.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }

        self.position = block_end;
    }

    /// Pull every queued request into the pending list, keeping it sorted
    fn receive(&mut self) {
        while let Some(tone) = self.source.pop() {
            let start_frame = (tone.start_time * self.sample_rate as f64).round().max(0.0) as u64;
            let click = PendingClick { start_frame, tone };

            // Requests arrive in order, so this is almost always a push
            let index = self
                .pending
                .partition_point(|pending| pending.start_frame <= start_frame);
            self.pending.insert(index, click);
        }
    }

    /// Frames rendered since creation
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Seconds rendered since creation
    pub fn time(&self) -> f64 {
        self.position as f64 / self.sample_rate as f64
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Clicks that could not start on their exact sample
    pub fn late_clicks(&self) -> u64 {
        self.late
    }

    /// Clicks sounding right now
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Clicks received but not started yet
    pub fn pending_clicks(&self) -> usize {
        self.pending.len()
    }
}
