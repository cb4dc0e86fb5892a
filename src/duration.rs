//! Right-aligned HHMMSS digit parsing

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hours, minutes and seconds as keyed in or as left on the clock.
///
/// Parsed values are not range-clamped: `"90"` stays 90 seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HmsDuration {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl HmsDuration {
    /// Build from already-split fields
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self { hours, minutes, seconds }
    }

    /// Normalized breakdown of a number of seconds, used for displaying time left
    pub fn from_total_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    /// Total seconds, see [`to_total_seconds`]
    pub fn total_seconds(&self) -> u64 {
        to_total_seconds(self)
    }
}

impl fmt::Display for HmsDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Parse up to six digits of HHMMSS entry, filling from the seconds end.
///
/// Any digit-only input of length 0..=6 is accepted, so this can run after
/// every keystroke for a live preview. Positions are counted in bytes and
/// bytes that are not ASCII digits contribute nothing, so other input never
/// panics.
pub fn parse(digits: &str) -> HmsDuration {
    let digits = digits.as_bytes();
    let len = digits.len();
    match len {
        0 => HmsDuration::default(),
        1..=2 => HmsDuration::new(0, 0, value_of(digits)),
        _ => {
            let seconds = value_of(&digits[len - 2..]);
            let minutes_start = match len {
                5 => 1,
                6 => 2,
                _ => 0,
            };
            let minutes = value_of(&digits[minutes_start..len - 2]);
            let hours = if len >= 5 { value_of(&digits[..len - 4]) } else { 0 };
            HmsDuration::new(hours, minutes, seconds)
        }
    }
}

/// `hours * 3600 + minutes * 60 + seconds`, with no upper bound
pub fn to_total_seconds(duration: &HmsDuration) -> u64 {
    duration.hours * 3600 + duration.minutes * 60 + duration.seconds
}

fn value_of(digits: &[u8]) -> u64 {
    digits
        .iter()
        .filter(|b| b.is_ascii_digit())
        .fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
}
