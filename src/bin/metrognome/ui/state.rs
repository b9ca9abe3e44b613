//! Key bindings and the small pieces of state the UI keeps beside the scheduler

use crossterm::event::KeyCode;

/// Largest subdivision offered by the `s` key
pub const MAX_UI_SUBDIVISION: u32 = 4;

/// Commands the UI applies to the scheduler
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// Start or stop the click
    TogglePlayback,
    /// Change the tempo by this many BPM
    NudgeTempo(f64),
    /// Register a tap for tap tempo
    Tap,
    /// Cycle through the time signature presets
    NextTimeSignature,
    /// Cycle the subdivision through 1..=4
    NextSubdivision,
    Quit,
}

impl Action {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Char(' ') => Some(Action::TogglePlayback),
            KeyCode::Up | KeyCode::Char('+') => Some(Action::NudgeTempo(1.0)),
            KeyCode::Down | KeyCode::Char('-') => Some(Action::NudgeTempo(-1.0)),
            KeyCode::PageUp => Some(Action::NudgeTempo(10.0)),
            KeyCode::PageDown => Some(Action::NudgeTempo(-10.0)),
            KeyCode::Char('t') | KeyCode::Char('T') => Some(Action::Tap),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(Action::NextTimeSignature),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::NextSubdivision),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Subdivision after `current` when cycling (1, 2, 3, 4, 1, ...)
pub fn next_subdivision(current: u32) -> u32 {
    if current >= MAX_UI_SUBDIVISION {
        1
    } else {
        current + 1
    }
}

/// One-line message under the beat display
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Everything the transport bar shows
#[derive(Clone, Copy, Debug)]
pub struct TransportView {
    pub bpm: f64,
    pub is_playing: bool,
    pub beats_per_measure: u32,
    pub note_value: u32,
    pub subdivision: u32,
    /// Audio clock time, if the device is open
    pub clock_time: Option<f64>,
    pub sample_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_toggles_and_q_quits() {
        assert_eq!(
            Action::from_key(KeyCode::Char(' ')),
            Some(Action::TogglePlayback)
        );
        assert_eq!(Action::from_key(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(Action::from_key(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(Action::from_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn arrows_nudge_by_one_and_pages_by_ten() {
        assert_eq!(Action::from_key(KeyCode::Up), Some(Action::NudgeTempo(1.0)));
        assert_eq!(
            Action::from_key(KeyCode::Down),
            Some(Action::NudgeTempo(-1.0))
        );
        assert_eq!(
            Action::from_key(KeyCode::PageUp),
            Some(Action::NudgeTempo(10.0))
        );
        assert_eq!(
            Action::from_key(KeyCode::PageDown),
            Some(Action::NudgeTempo(-10.0))
        );
    }

    #[test]
    fn subdivision_cycles_back_to_one() {
        assert_eq!(next_subdivision(1), 2);
        assert_eq!(next_subdivision(3), 4);
        assert_eq!(next_subdivision(4), 1);
        // Values set from the command line above the cycle restart it
        assert_eq!(next_subdivision(7), 1);
    }

    #[test]
    fn status_constructors() {
        assert!(!Status::info("Playing").is_error);
        assert!(Status::error("no device").is_error);
        assert_eq!(Status::default().message, "");
    }
}
