use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a pulse falls inside the measure
///
/// Each class has a fixed click pitch and a fixed color tag. The mapping is
/// not configurable.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PulseKind {
    /// First pulse of the measure (downbeat)
    MeasureStart,
    /// Pulse on a beat boundary that is not the downbeat
    Beat,
    /// Pulse between beats
    Subdivision,
}

impl PulseKind {
    /// Click pitch in Hz
    pub const fn frequency(self) -> f32 {
        match self {
            PulseKind::MeasureStart => 1000.0,
            PulseKind::Beat => 600.0,
            PulseKind::Subdivision => 400.0,
        }
    }

    /// Color tag for the visual cue
    pub const fn color(self) -> Rgb {
        match self {
            PulseKind::MeasureStart => Rgb::new(0x00, 0xFF, 0x00),
            PulseKind::Beat => Rgb::new(0x00, 0x00, 0xFF),
            PulseKind::Subdivision => Rgb::new(0xFF, 0xFF, 0x00),
        }
    }
}

/// 8-bit RGB color tag
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Formats as `#RRGGBB`
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// One scheduled click, as reported to the visual collaborator
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseEvent {
    /// Position in the measure, `0..beats_per_measure * subdivision`
    pub index: u32,
    pub kind: PulseKind,
    /// Start time in the audio clock's domain (seconds)
    pub time: f64,
}

/// Receives every pulse the scheduler emits, synchronously and in order
///
/// Called once per pulse right after the click has been handed to the audio
/// clock. Implementations must not block: they run inside the scheduler's
/// drain loop.
pub trait PulseListener {
    fn on_pulse(&mut self, event: &PulseEvent);
}

/// Discards pulses (audio-only use)
impl PulseListener for () {
    fn on_pulse(&mut self, _event: &PulseEvent) {}
}

/// Records every pulse (tests, offline rendering)
impl PulseListener for Vec<PulseEvent> {
    fn on_pulse(&mut self, event: &PulseEvent) {
        self.push(*event);
    }
}

impl<L: PulseListener + ?Sized> PulseListener for &mut L {
    fn on_pulse(&mut self, event: &PulseEvent) {
        (**self).on_pulse(event)
    }
}

/// Allow boxed listeners to be used as listeners (for dynamic dispatch)
impl<L: PulseListener + ?Sized> PulseListener for Box<L> {
    fn on_pulse(&mut self, event: &PulseEvent) {
        (**self).on_pulse(event)
    }
}
