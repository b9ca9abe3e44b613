//! Click synthesis for the audio thread.
//!
//! These components are allocation-free in steady state and realtime-safe,
//! so the output stream callback can own them directly. They know nothing
//! about tempo: they start tones at the frame they are asked for.

/// Sine burst with a hold-then-decay envelope.
pub mod click;
/// Sample-accurate mixer for timestamped clicks.
pub mod renderer;

pub use click::ClickVoice;
pub use renderer::{ClickRenderer, ToneSource};
