//! Error types for the scheduler and its audio clock sources.

use thiserror::Error;

/// Result type alias for metrognome operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced synchronously by the scheduler's public operations
#[derive(Debug, Error)]
pub enum Error {
    /// A setter or config was given a value the scheduler cannot run with.
    /// Prior state is left unchanged.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The audio clock source could not be acquired, or went away while
    /// running. The scheduler is left stopped.
    #[error("audio unavailable: {0}")]
    AudioUnavailable(#[from] ClockError),
}

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("tempo must be a finite number in (0, {max}] BPM, got {value}")]
    Tempo { value: f64, max: f64 },

    #[error("beats per measure must be in [1, {max}], got {value}")]
    BeatsPerMeasure { value: u32, max: u32 },

    #[error("subdivision must be in [1, {max}], got {value}")]
    Subdivision { value: u32, max: u32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("startup offset must not be negative, got {0}")]
    NegativeStartupOffset(f64),

    #[error("invalid time signature {0:?} (expected N/D, e.g. 3/4)")]
    TimeSignature(String),
}

/// Failures of an audio clock source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("no output device available")]
    NoDevice,

    #[error("failed to open output stream: {0}")]
    Stream(String),

    #[error("output device disconnected")]
    Disconnected,

    #[error("tone queue is full, audio thread is not draining it")]
    QueueFull,

    #[error("clock source has not been acquired")]
    NotAcquired,
}
