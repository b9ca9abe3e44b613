//! Musical timing: meter, pulse classification and the lookahead scheduler.

pub mod config;
pub mod meter;
pub mod pulse;
pub mod queue;
pub mod scheduler;
pub mod tap_tempo;
pub mod time_signature;

pub use config::SchedulerConfig;
pub use meter::Meter;
pub use pulse::{PulseEvent, PulseKind, PulseListener, Rgb};
pub use queue::PulseQueue;
pub use scheduler::{PollHandle, Scheduler};
pub use tap_tempo::TapTempo;
pub use time_signature::TimeSignature;
