//! Rejection types returned by the engine and the digit entry

use thiserror::Error;

/// Why the engine refused a start or stop command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("Timer is already running")]
    AlreadyRunning,
    #[error("Timer is not running")]
    NotRunning,
    #[error("Timer duration must be greater than zero")]
    InvalidDuration,
}

/// Why a digit-entry edit was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputRejected {
    #[error("At most {max} digits can be entered")]
    BufferFull { max: usize },
    #[error("The first digit cannot be zero")]
    LeadingZero,
    #[error("'{0}' is not a digit")]
    NotADigit(char),
    #[error("Timer is already running")]
    TimerRunning,
}
