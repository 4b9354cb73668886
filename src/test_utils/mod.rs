//! Shared helpers for unit tests.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::WatchEvent;
use crate::WatchFn;

pub type EventLog = Arc<Mutex<Vec<WatchEvent>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// A one-shot watch that appends its event to the shared log.
pub fn record_into(log: &EventLog) -> WatchFn {
    let log = Arc::clone(log);
    Box::new(move |event| log.lock().push(event))
}
