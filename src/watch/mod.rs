//! One-shot watch registration and dispatch.
//!
//! Watches are the notification half of the coordination contract: a caller
//! attaches a callback to a read, and the next matching mutation delivers it
//! exactly once. Continued notification requires re-registration.
//!
//! Delivery is synchronous: callbacks run inside the service lock as part of
//! the triggering operation, before that operation returns.


use std::fmt;

use tracing::trace;

use crate::ConnectionState;
use crate::Handle;

/// Discrete notification kinds delivered to watch callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Session lifecycle notification, delivered to the `init` watch
    Session,
    /// The watched node's data changed
    Changed,
    /// The watched node was deleted
    Deleted,
    /// The watched node's child set changed
    Child,
}

/// Payload every watch callback receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    /// Handle of the session that registered the watch
    pub handle: Handle,
    pub kind: EventKind,
    pub state: ConnectionState,
    /// Path the event concerns; empty for session events
    pub path: String,
}

/// A one-shot watch callback.
pub type WatchFn = Box<dyn FnOnce(WatchEvent) + Send + 'static>;

/// Watches registered against one node, each owned by the session that
/// registered it. Every node owns its sets; they are never shared across
/// nodes.
#[derive(Default)]
pub struct WatchSet {
    entries: Vec<(Handle, WatchFn)>,
}

impl WatchSet {
    pub(crate) fn register(
        &mut self,
        handle: Handle,
        watch: WatchFn,
    ) {
        self.entries.push((handle, watch));
    }

    /// Swaps the set to empty, then invokes every drained callback with
    /// `(handle, kind, state, path)`. Draining first is what makes delivery
    /// one-shot even when a callback registers a replacement watch.
    pub(crate) fn fire(
        &mut self,
        kind: EventKind,
        state: ConnectionState,
        path: &str,
    ) {
        if self.entries.is_empty() {
            return;
        }
        let due = std::mem::take(&mut self.entries);
        trace!("firing {} {:?} watch(es) for {:?}", due.len(), kind, path);
        for (handle, watch) in due {
            watch(WatchEvent {
                handle,
                kind,
                state,
                path: path.to_owned(),
            });
        }
    }

    /// Drops the given session's registrations without invoking them.
    pub(crate) fn clear_session(
        &mut self,
        handle: Handle,
    ) {
        self.entries.retain(|(h, _)| *h != handle);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for WatchSet {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("WatchSet")
            .field("len", &self.entries.len())
            .finish()
    }
}
