//! Background ticker driving one countdown session

use std::{sync::Arc, time::Duration};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::{engine::EngineShared, state::CountdownEvent};

/// Seconds shown for `remaining` time: one second of margin, then truncate.
///
/// The value only reaches the last second on the final tick and is never 0.
pub(crate) fn display_seconds(remaining: Duration) -> u64 {
    u64::try_from((remaining.as_millis() + 1000) / 1000).unwrap_or(u64::MAX)
}

/// Tick until `deadline`, publishing progress, then finish the session.
///
/// Exits quietly as soon as `session_id` is no longer the engine's current session.
pub(crate) async fn countdown_ticker(shared: Arc<EngineShared>, session_id: u64, deadline: Instant) {
    debug!("Starting countdown ticker for session {}", session_id);

    let mut interval = time::interval(shared.tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        if remaining < shared.tick_interval {
            // Less than a tick left: no more progress, finish on the deadline itself
            time::sleep_until(deadline).await;
            break;
        }

        let remaining_seconds = display_seconds(remaining);
        let mut session = shared.lock_session();
        match session.as_mut() {
            Some(active) if active.id == session_id => {
                active.remaining_seconds = remaining_seconds;
                shared.publish(CountdownEvent::Progress { session: session_id, remaining_seconds });
            }
            _ => {
                debug!("Session {} is no longer current, ticker exiting", session_id);
                return;
            }
        }
    }

    finish_session(&shared, session_id);
}

fn finish_session(shared: &EngineShared, session_id: u64) {
    {
        let mut session = shared.lock_session();
        if !matches!(session.as_ref(), Some(active) if active.id == session_id) {
            return;
        }
        *session = None;
        shared.publish(CountdownEvent::Finished { session: session_id });
        shared.notifier.clear_countdown();
    }

    info!("Countdown session {} finished", session_id);
    shared.alerter.alert_finished();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rounds_up_with_a_second_of_margin() {
        assert_eq!(display_seconds(Duration::from_millis(5000)), 6);
        assert_eq!(display_seconds(Duration::from_millis(4500)), 5);
        assert_eq!(display_seconds(Duration::from_millis(1000)), 2);
        assert_eq!(display_seconds(Duration::from_millis(999)), 1);
        assert_eq!(display_seconds(Duration::from_millis(1)), 1);
    }
}
