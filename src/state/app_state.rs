//! Main application state management

use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    duration::HmsDuration,
    engine::{CountdownEngine, SessionHandle},
    error::{InputRejected, Rejected},
};
use super::{DigitBuffer, TimerState};

/// What a digit edit left in the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitPreview {
    pub digits: String,
    pub duration: HmsDuration,
    pub total_seconds: u64,
}

impl From<&DigitBuffer> for DigitPreview {
    fn from(buffer: &DigitBuffer) -> Self {
        Self {
            digits: buffer.as_str().to_string(),
            duration: buffer.duration(),
            total_seconds: buffer.total_seconds(),
        }
    }
}

/// UI-side controller: owns the digit entry and the engine handle
#[derive(Debug)]
pub struct AppState {
    pub engine: CountdownEngine,
    digits: Mutex<DigitBuffer>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    pub fn new(engine: CountdownEngine, port: u16, host: String) -> Self {
        Self {
            engine,
            digits: Mutex::new(DigitBuffer::new()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    fn lock_digits(&self) -> MutexGuard<'_, DigitBuffer> {
        self.digits.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_action(&self, action: &str) {
        let mut last = self.last_action.lock().unwrap_or_else(PoisonError::into_inner);
        *last = Some((action.to_string(), Utc::now()));
    }

    /// Edits are refused while a session runs; callers hold the digits lock,
    /// matching the lock order of `start_timer`
    fn ensure_idle(&self) -> Result<(), InputRejected> {
        if self.engine.status().is_running() {
            return Err(InputRejected::TimerRunning);
        }
        Ok(())
    }

    /// Current buffer with its live preview
    pub fn digits(&self) -> DigitPreview {
        DigitPreview::from(&*self.lock_digits())
    }

    /// Append a digit keystroke
    pub fn press_digit(&self, digit: char) -> Result<DigitPreview, InputRejected> {
        let mut digits = self.lock_digits();
        self.ensure_idle()?;
        digits.push(digit)?;
        let preview = DigitPreview::from(&*digits);
        drop(digits);

        debug!("Digit entry now {:?} ({})", preview.digits, preview.duration);
        Ok(preview)
    }

    /// Remove the last keystroke
    pub fn remove_digit(&self) -> Result<DigitPreview, InputRejected> {
        let mut digits = self.lock_digits();
        self.ensure_idle()?;
        digits.pop();
        Ok(DigitPreview::from(&*digits))
    }

    /// Clear the digit entry
    pub fn reset_digits(&self) -> DigitPreview {
        let mut digits = self.lock_digits();
        digits.clear();
        self.record_action("reset");
        DigitPreview::from(&*digits)
    }

    /// "Set Timer": start the engine from the buffer and clear it.
    ///
    /// While a session runs edits are refused, so the buffer stays empty
    /// until that session finishes or is stopped.
    pub fn start_timer(&self) -> Result<SessionHandle, Rejected> {
        let mut digits = self.lock_digits();
        let total_seconds = digits.total_seconds();
        let handle = self.engine.start(total_seconds)?;
        digits.clear();
        drop(digits);

        info!("Timer set for {}", HmsDuration::from_total_seconds(total_seconds));
        self.record_action("start");
        Ok(handle)
    }

    /// "Stop Timer": cancel the countdown and reset the entry
    pub fn stop_timer(&self) -> Result<(), Rejected> {
        self.engine.stop()?;
        self.lock_digits().clear();
        self.record_action("stop");
        Ok(())
    }

    /// Resync point for a (re)attached UI
    pub fn timer_state(&self) -> TimerState {
        self.engine.status()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last = self.last_action.lock().unwrap_or_else(PoisonError::into_inner);
        match last.as_ref() {
            Some((action, at)) => (Some(action.clone()), Some(*at)),
            None => (None, None),
        }
    }
}
