//! State management module
//!
//! Digit entry, countdown snapshots and the application state tying them together.

pub mod app_state;
pub mod digit_buffer;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, DigitPreview};
pub use digit_buffer::DigitBuffer;
pub use timer_state::{CountdownEvent, TimerState, TimerStatus};
