//! Countdown status snapshots and events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Engine state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
}

/// Point-in-time view of the countdown, as returned by `status()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub status: TimerStatus,
    pub total_seconds: Option<u64>,
    pub remaining_seconds: Option<u64>,
    pub started_at: Option<DateTime<Utc>>,
}

impl TimerState {
    /// Create an idle timer state
    pub fn idle() -> Self {
        Self {
            status: TimerStatus::Idle,
            total_seconds: None,
            remaining_seconds: None,
            started_at: None,
        }
    }

    /// Create a running timer state
    pub fn running(total_seconds: u64, remaining_seconds: u64, started_at: DateTime<Utc>) -> Self {
        Self {
            status: TimerStatus::Running,
            total_seconds: Some(total_seconds),
            remaining_seconds: Some(remaining_seconds),
            started_at: Some(started_at),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Remaining seconds if the timer is running
    pub fn remaining_seconds(&self) -> Option<u64> {
        if self.is_running() {
            self.remaining_seconds
        } else {
            None
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Announcements pushed by the engine to whoever is subscribed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum CountdownEvent {
    Progress { session: u64, remaining_seconds: u64 },
    Finished { session: u64 },
}

impl CountdownEvent {
    pub fn session(&self) -> u64 {
        match self {
            Self::Progress { session, .. } | Self::Finished { session } => *session,
        }
    }

    /// Event name used on the SSE stream
    pub fn name(&self) -> &'static str {
        match self {
            Self::Progress { .. } => "progress",
            Self::Finished { .. } => "finished",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_hides_remaining() {
        let mut state = TimerState::running(10, 7, Utc::now());
        assert_eq!(state.remaining_seconds(), Some(7));
        state.status = TimerStatus::Idle;
        assert_eq!(state.remaining_seconds(), None);
    }

    #[test]
    fn events_serialize_tagged() {
        let json = serde_json::to_value(CountdownEvent::Progress { session: 3, remaining_seconds: 4 }).unwrap();
        assert_eq!(json["event"], "progress");
        assert_eq!(json["remaining_seconds"], 4);

        let json = serde_json::to_value(CountdownEvent::Finished { session: 3 }).unwrap();
        assert_eq!(json["event"], "finished");
        assert_eq!(json["session"], 3);
    }
}
