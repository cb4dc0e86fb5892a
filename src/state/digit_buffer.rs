//! HHMMSS digit entry buffer

use std::str::FromStr;

use crate::{duration::{self, HmsDuration}, error::InputRejected};

/// Digits keyed in by the user, most significant first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitBuffer {
    digits: String,
}

impl DigitBuffer {
    pub const MAX_LEN: usize = 6;

    /// Create an empty buffer ("00:00:00")
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one digit to the seconds end
    pub fn push(&mut self, digit: char) -> Result<(), InputRejected> {
        if !digit.is_ascii_digit() {
            return Err(InputRejected::NotADigit(digit));
        }
        if self.digits.len() >= Self::MAX_LEN {
            return Err(InputRejected::BufferFull { max: Self::MAX_LEN });
        }
        if self.digits.is_empty() && digit == '0' {
            return Err(InputRejected::LeadingZero);
        }
        self.digits.push(digit);
        Ok(())
    }

    /// Remove the most recently entered digit, if any
    pub fn pop(&mut self) -> Option<char> {
        self.digits.pop()
    }

    /// Drop every digit
    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Digits as entered
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Number of digits entered
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// True when nothing has been entered
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Live preview of the entry as hours, minutes and seconds
    pub fn duration(&self) -> HmsDuration {
        duration::parse(&self.digits)
    }

    /// Seconds the entry would count down from
    pub fn total_seconds(&self) -> u64 {
        duration::to_total_seconds(&self.duration())
    }
}

impl FromStr for DigitBuffer {
    type Err = InputRejected;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut buffer = Self::new();
        for c in s.chars() {
            buffer.push(c)?;
        }
        Ok(buffer)
    }
}
