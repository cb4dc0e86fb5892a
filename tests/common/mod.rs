#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use chrono::{DateTime, Utc};
use countdown_timer::{
    engine::CountdownEngine,
    services::{Alerter, Notifier},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    Show(u64),
    Clear,
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<NotifierCall>>,
}

impl RecordingNotifier {
    pub fn calls(&self) -> Vec<NotifierCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show_countdown(&self, total_seconds: u64, _finishes_at: DateTime<Utc>) {
        self.calls.lock().unwrap().push(NotifierCall::Show(total_seconds));
    }

    fn clear_countdown(&self) {
        self.calls.lock().unwrap().push(NotifierCall::Clear);
    }
}

#[derive(Debug, Default)]
pub struct RecordingAlerter {
    alerts: Mutex<usize>,
}

impl RecordingAlerter {
    pub fn count(&self) -> usize {
        *self.alerts.lock().unwrap()
    }
}

impl Alerter for RecordingAlerter {
    fn alert_finished(&self) {
        *self.alerts.lock().unwrap() += 1;
    }
}

pub struct Harness {
    pub engine: CountdownEngine,
    pub notifier: Arc<RecordingNotifier>,
    pub alerter: Arc<RecordingAlerter>,
}

pub fn harness() -> Harness {
    let notifier = Arc::new(RecordingNotifier::default());
    let alerter = Arc::new(RecordingAlerter::default());
    let engine = CountdownEngine::new(
        Duration::from_millis(500),
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        Arc::clone(&alerter) as Arc<dyn Alerter>,
    );
    Harness { engine, notifier, alerter }
}
