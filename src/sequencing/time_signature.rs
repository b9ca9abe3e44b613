use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Time signature as shown to the user
///
/// Only the numerator drives the click: the scheduler counts
/// `beats_per_measure` beats per bar and ignores the note value, which is
/// kept for display.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    /// Number of beats per bar (numerator)
    pub beats_per_measure: u32,
    /// Note value that gets one beat (denominator: 4 = quarter, 8 = eighth)
    pub note_value: u32,
}

impl TimeSignature {
    /// 2/4 time (march)
    pub const TWO_FOUR: TimeSignature = TimeSignature::new(2, 4);

    /// 3/4 time (waltz)
    pub const THREE_FOUR: TimeSignature = TimeSignature::new(3, 4);

    /// Standard 4/4 time
    pub const FOUR_FOUR: TimeSignature = TimeSignature::new(4, 4);

    /// 5/4 time
    pub const FIVE_FOUR: TimeSignature = TimeSignature::new(5, 4);

    /// 6/8 time, clicked as six eighths
    pub const SIX_EIGHT: TimeSignature = TimeSignature::new(6, 8);

    /// 7/8 time
    pub const SEVEN_EIGHT: TimeSignature = TimeSignature::new(7, 8);

    /// 9/8 time
    pub const NINE_EIGHT: TimeSignature = TimeSignature::new(9, 8);

    /// 12/8 time
    pub const TWELVE_EIGHT: TimeSignature = TimeSignature::new(12, 8);

    /// Signatures offered by the front-end, in cycling order
    pub const PRESETS: [TimeSignature; 8] = [
        Self::TWO_FOUR,
        Self::THREE_FOUR,
        Self::FOUR_FOUR,
        Self::FIVE_FOUR,
        Self::SIX_EIGHT,
        Self::SEVEN_EIGHT,
        Self::NINE_EIGHT,
        Self::TWELVE_EIGHT,
    ];

    pub const fn new(beats_per_measure: u32, note_value: u32) -> Self {
        Self {
            beats_per_measure,
            note_value,
        }
    }

    /// The preset after this one, wrapping around.
    /// Signatures outside the preset list restart at the first preset.
    pub fn next_preset(&self) -> Self {
        let position = Self::PRESETS.iter().position(|preset| preset == self);
        match position {
            Some(i) => Self::PRESETS[(i + 1) % Self::PRESETS.len()],
            None => Self::PRESETS[0],
        }
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::FOUR_FOUR
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats_per_measure, self.note_value)
    }
}

impl FromStr for TimeSignature {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationError::TimeSignature(s.to_string());

        let (numerator, denominator) = s.trim().split_once('/').ok_or_else(invalid)?;
        let beats_per_measure: u32 = numerator.trim().parse().map_err(|_| invalid())?;
        let note_value: u32 = denominator.trim().parse().map_err(|_| invalid())?;

        if beats_per_measure == 0 || note_value == 0 {
            return Err(invalid());
        }

        Ok(Self::new(beats_per_measure, note_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numerator_and_denominator() {
        let ts: TimeSignature = "6/8".parse().unwrap();
        assert_eq!(ts, TimeSignature::SIX_EIGHT);
        assert_eq!(ts.beats_per_measure, 6);

        let ts: TimeSignature = " 3 / 4 ".parse().unwrap();
        assert_eq!(ts, TimeSignature::THREE_FOUR);
    }

    #[test]
    fn rejects_malformed_signatures() {
        for input in ["", "4", "4/", "/4", "0/4", "4/0", "a/4", "-3/4"] {
            let result = input.parse::<TimeSignature>();
            assert_eq!(
                result,
                Err(ConfigurationError::TimeSignature(input.to_string())),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        for preset in TimeSignature::PRESETS {
            let parsed: TimeSignature = preset.to_string().parse().unwrap();
            assert_eq!(parsed, preset);
        }
    }

    #[test]
    fn presets_cycle() {
        let mut ts = TimeSignature::FOUR_FOUR;
        for _ in 0..TimeSignature::PRESETS.len() {
            ts = ts.next_preset();
        }
        assert_eq!(ts, TimeSignature::FOUR_FOUR);

        assert_eq!(TimeSignature::TWELVE_EIGHT.next_preset(), TimeSignature::TWO_FOUR);
        assert_eq!(TimeSignature::new(11, 16).next_preset(), TimeSignature::TWO_FOUR);
    }
}
