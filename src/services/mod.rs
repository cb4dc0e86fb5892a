//! Collaborators the countdown engine calls out to
//!
//! The notification indicator and the completion alert live outside the
//! engine; these traits are the shape of the calls into them.

pub mod alert;
pub mod notification;

// Re-export main types
pub use alert::{Alerter, TerminalAlerter};
pub use notification::{LogNotifier, Notifier};
