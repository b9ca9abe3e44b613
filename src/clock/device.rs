use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Producer, RingBuffer};

use super::{AudioClock, ToneRequest};
use crate::{dsp::ClickRenderer, error::ClockError, MAX_BLOCK_SIZE};

/// Capacity of the scheduler → audio thread tone queue
pub const TONE_QUEUE_SIZE: usize = 1024;

/// State written by the audio thread, read by the scheduler
#[derive(Debug, Default)]
struct SharedState {
    /// Frames rendered since the stream opened
    frames: AtomicU64,
    /// Clicks that arrived after their start frame
    late: AtomicU64,
    /// Set by the stream error callback
    failed: AtomicBool,
}

/// An open output stream
struct Output {
    // Dropping the stream closes the device
    _stream: cpal::Stream,
    tx: Producer<ToneRequest>,
    shared: Arc<SharedState>,
    sample_rate: f64,
    channels: usize,
}

/// The default output device as an audio clock
///
/// The device is opened on the first `acquire()`, not on construction, so a
/// front-end can start without audio and report the failure when the user
/// presses play. Clock time is the number of frames the device has pulled
/// divided by the sample rate, which is the timeline clicks are rendered on.
pub struct CpalClock {
    output: Option<Output>,
    late_reported: u64,
}

impl CpalClock {
    pub fn new() -> Self {
        Self {
            output: None,
            late_reported: 0,
        }
    }

    /// Sample rate of the open stream
    pub fn sample_rate(&self) -> Option<f64> {
        self.output.as_ref().map(|output| output.sample_rate)
    }

    /// Channel count of the open stream
    pub fn channels(&self) -> Option<usize> {
        self.output.as_ref().map(|output| output.channels)
    }

    fn open() -> Result<Output, ClockError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(ClockError::NoDevice)?;
        let config = device
            .default_output_config()
            .map_err(|err| ClockError::Stream(err.to_string()))?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = (config.channels() as usize).max(1);

        let (tx, rx) = RingBuffer::<ToneRequest>::new(TONE_QUEUE_SIZE);
        let shared = Arc::new(SharedState::default());

        let mut renderer = ClickRenderer::new(rx, sample_rate);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let callback_shared = Arc::clone(&shared);
        let error_shared = Arc::clone(&shared);

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames_to_render];
                        renderer.render(block);

                        // Copy to output (mono to all channels)
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                        }

                        frames_written += frames_to_render;
                    }

                    callback_shared
                        .frames
                        .store(renderer.position(), Ordering::Release);
                    callback_shared
                        .late
                        .store(renderer.late_clicks(), Ordering::Relaxed);
                },
                move |err| {
                    error_shared.failed.store(true, Ordering::Release);
                    log::error!("audio stream error: {err}");
                },
                None,
            )
            .map_err(|err| ClockError::Stream(err.to_string()))?;

        stream
            .play()
            .map_err(|err| ClockError::Stream(err.to_string()))?;

        log::info!("audio output open: {sample_rate} Hz, {channels} channels");

        Ok(Output {
            _stream: stream,
            tx,
            shared,
            sample_rate: sample_rate as f64,
            channels,
        })
    }

    fn output(&self) -> Result<&Output, ClockError> {
        let output = self.output.as_ref().ok_or(ClockError::NotAcquired)?;
        if output.shared.failed.load(Ordering::Acquire) {
            return Err(ClockError::Disconnected);
        }
        Ok(output)
    }
}

impl Default for CpalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioClock for CpalClock {
    fn acquire(&mut self) -> Result<(), ClockError> {
        match &self.output {
            Some(output) if !output.shared.failed.load(Ordering::Acquire) => return Ok(()),
            Some(_) => log::warn!("audio stream failed earlier, reopening the output device"),
            None => {}
        }

        // Drop a dead stream before opening a new one
        self.output = None;
        self.late_reported = 0;
        self.output = Some(Self::open()?);
        Ok(())
    }

    fn now(&self) -> Result<f64, ClockError> {
        let output = self.output()?;
        let frames = output.shared.frames.load(Ordering::Acquire);
        Ok(frames as f64 / output.sample_rate)
    }

    fn schedule_tone(&mut self, tone: ToneRequest) -> Result<(), ClockError> {
        let late = self.output()?.shared.late.load(Ordering::Relaxed);
        if late > self.late_reported {
            log::warn!(
                "{} click(s) reached the audio thread after their start time; \
                 the schedule-ahead window is too short for this host",
                late - self.late_reported
            );
            self.late_reported = late;
        }

        let output = self.output.as_mut().ok_or(ClockError::NotAcquired)?;
        output.tx.push(tone).map_err(|_| ClockError::QueueFull)
    }
}
