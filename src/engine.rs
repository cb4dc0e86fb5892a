//! Countdown engine
//!
//! A single-session state machine (`Idle` / `Running`). Starting a session
//! spawns a background ticker task that keeps running whether or not anyone
//! is subscribed to its events. All session mutation goes through one mutex,
//! and the ticker publishes while holding it, so once `stop()` returns that
//! session can no longer emit anything.

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tokio::{sync::broadcast, task::JoinHandle, time::Instant};
use tracing::{debug, info};

use crate::{
    error::Rejected,
    services::{Alerter, LogNotifier, Notifier, TerminalAlerter},
    state::{CountdownEvent, TimerState},
    tasks::countdown_ticker,
};

/// Cadence of progress evaluation while a session runs
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Returned by a successful `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHandle {
    pub id: u64,
    pub total_seconds: u64,
    pub started_at: DateTime<Utc>,
    pub finishes_at: DateTime<Utc>,
}

pub(crate) struct ActiveSession {
    pub id: u64,
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub started_at: DateTime<Utc>,
    pub ticker: Option<JoinHandle<()>>,
}

pub(crate) struct EngineShared {
    session: Mutex<Option<ActiveSession>>,
    events_tx: broadcast::Sender<CountdownEvent>,
    pub notifier: Arc<dyn Notifier>,
    pub alerter: Arc<dyn Alerter>,
    pub tick_interval: Duration,
    next_session_id: AtomicU64,
}

impl EngineShared {
    /// The guarded session is never left half-updated, so a poisoned lock is still usable
    pub fn lock_session(&self) -> MutexGuard<'_, Option<ActiveSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Push an event to current subscribers; dropped if nobody is listening
    pub fn publish(&self, event: CountdownEvent) {
        if self.events_tx.send(event).is_err() {
            debug!("No subscribers attached, dropping {:?}", event);
        }
    }
}

/// Handle to the countdown engine. Clones share the same engine.
#[derive(Clone)]
pub struct CountdownEngine {
    shared: Arc<EngineShared>,
}

impl CountdownEngine {
    /// Create an idle engine.
    ///
    /// A zero tick interval is raised to one millisecond.
    pub fn new(tick_interval: Duration, notifier: Arc<dyn Notifier>, alerter: Arc<dyn Alerter>) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            shared: Arc::new(EngineShared {
                session: Mutex::new(None),
                events_tx,
                notifier,
                alerter,
                tick_interval: tick_interval.max(Duration::from_millis(1)),
                next_session_id: AtomicU64::new(1),
            }),
        }
    }

    /// Start a countdown of `total_seconds`.
    ///
    /// Must be called from within a tokio runtime, since it spawns the ticker.
    pub fn start(&self, total_seconds: u64) -> Result<SessionHandle, Rejected> {
        let mut session = self.shared.lock_session();
        if session.is_some() {
            return Err(Rejected::AlreadyRunning);
        }
        if total_seconds == 0 {
            return Err(Rejected::InvalidDuration);
        }
        let deadline = Instant::now()
            .checked_add(Duration::from_secs(total_seconds))
            .ok_or(Rejected::InvalidDuration)?;

        let id = self.shared.next_session_id.fetch_add(1, Ordering::Relaxed);
        let started_at = Utc::now();
        let finishes_at = i64::try_from(total_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| started_at.checked_add_signed(delta))
            .unwrap_or(started_at);

        let ticker = tokio::spawn(countdown_ticker(Arc::clone(&self.shared), id, deadline));
        *session = Some(ActiveSession {
            id,
            total_seconds,
            remaining_seconds: total_seconds,
            started_at,
            ticker: Some(ticker),
        });
        self.shared.notifier.show_countdown(total_seconds, finishes_at);
        drop(session);

        info!("Countdown session {} started for {}s", id, total_seconds);
        Ok(SessionHandle { id, total_seconds, started_at, finishes_at })
    }

    /// Cancel the running countdown without firing `Finished`
    pub fn stop(&self) -> Result<(), Rejected> {
        let mut session = self.shared.lock_session();
        let Some(mut active) = session.take() else {
            return Err(Rejected::NotRunning);
        };
        if let Some(ticker) = active.ticker.take() {
            ticker.abort();
        }
        self.shared.notifier.clear_countdown();
        drop(session);

        info!("Countdown session {} stopped with {}s left", active.id, active.remaining_seconds);
        Ok(())
    }

    /// Current snapshot; only waits on the session lock, never on the ticker
    pub fn status(&self) -> TimerState {
        match self.shared.lock_session().as_ref() {
            Some(active) => TimerState::running(active.total_seconds, active.remaining_seconds, active.started_at),
            None => TimerState::idle(),
        }
    }

    /// Attach to the event stream. Only events published after this call are seen.
    pub fn subscribe(&self) -> broadcast::Receiver<CountdownEvent> {
        self.shared.events_tx.subscribe()
    }

    /// Cadence the ticker evaluates remaining time at
    pub fn tick_interval(&self) -> Duration {
        self.shared.tick_interval
    }
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL, Arc::new(LogNotifier), Arc::new(TerminalAlerter))
    }
}

impl fmt::Debug for CountdownEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownEngine")
            .field("tick_interval", &self.shared.tick_interval)
            .field("state", &self.status())
            .finish()
    }
}
