//! Ongoing-countdown indicator

use chrono::{DateTime, Utc};
use tracing::info;

/// Surface that shows an "ongoing countdown" indicator while a timer runs
pub trait Notifier: Send + Sync {
    fn show_countdown(&self, total_seconds: u64, finishes_at: DateTime<Utc>);
    fn clear_countdown(&self);
}

/// Notifier that only writes to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_countdown(&self, total_seconds: u64, finishes_at: DateTime<Utc>) {
        info!(
            "Timer has started: counting down {}s, finishing at {}",
            total_seconds,
            finishes_at.format("%H:%M:%S")
        );
    }

    fn clear_countdown(&self) {
        info!("Countdown indicator cleared");
    }
}
