pub mod clock; // Audio clock sources the scheduler targets
pub mod dsp; // Click synthesis for the audio thread
pub mod error;
pub mod sequencing; // Lookahead scheduling, meter, tap tempo

pub use clock::{AudioClock, ManualClock, ToneRequest};
#[cfg(feature = "rtrb")]
pub use clock::CpalClock;
pub use error::{ClockError, ConfigurationError, Error, Result};
pub use sequencing::{
    Meter, PulseEvent, PulseKind, PulseListener, PulseQueue, Scheduler, SchedulerConfig,
    TapTempo, TimeSignature,
};

pub const MAX_BLOCK_SIZE: usize = 2048;
