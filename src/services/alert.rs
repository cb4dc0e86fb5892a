//! Completion alert

use std::io::Write;

use tracing::{debug, warn};

/// Blocking "time's up" alert with an audible signal.
///
/// Called once per finished session. The engine does not wait for dismissal.
pub trait Alerter: Send + Sync {
    fn alert_finished(&self);
}

/// Alerter that logs and rings the terminal bell
#[derive(Debug, Default)]
pub struct TerminalAlerter;

impl Alerter for TerminalAlerter {
    fn alert_finished(&self) {
        warn!("Times up!");

        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
            debug!("Failed to ring terminal bell: {}", e);
        }
    }
}
