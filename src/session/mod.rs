//! Session bookkeeping for the emulated service.
//!
//! A session is one logical client connection. It owns the ephemeral paths
//! created under it and is addressed by a numeric handle. Sessions hold
//! paths by value (strings), never by node reference, so tree mutation and
//! session bookkeeping stay decoupled.


use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::KeeperError;

/// Numeric session identifier handed out by `init`.
///
/// Handles start at 0 and are always the lowest unused value, so a handle is
/// reused only after the owning session closes.
pub type Handle = u64;

/// Coarse status of a live session, distinct from per-event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Connected,
}

/// State kept per live session.
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) state: ConnectionState,
    ephemerals: BTreeSet<String>,
}

impl Session {
    fn new() -> Self {
        Self {
            state: ConnectionState::Connected,
            ephemerals: BTreeSet::new(),
        }
    }

    pub(crate) fn record_ephemeral(
        &mut self,
        path: &str,
    ) {
        self.ephemerals.insert(path.to_owned());
    }

    pub(crate) fn unrecord_ephemeral(
        &mut self,
        path: &str,
    ) {
        self.ephemerals.remove(path);
    }

    /// Paths owned by this session, in sorted order so close-time deletion
    /// is deterministic.
    pub(crate) fn ephemeral_paths(&self) -> Vec<String> {
        self.ephemerals.iter().cloned().collect()
    }

    #[cfg(test)]
    pub(crate) fn owns_ephemeral(
        &self,
        path: &str,
    ) -> bool {
        self.ephemerals.contains(path)
    }
}

/// Maps live handles to their sessions and allocates new handles.
#[derive(Debug, Default)]
pub(crate) struct SessionTable {
    sessions: BTreeMap<Handle, Session>,
}

impl SessionTable {
    /// Registers a new session under the lowest unused handle.
    pub(crate) fn open(&mut self) -> Handle {
        let mut handle: Handle = 0;
        while self.sessions.contains_key(&handle) {
            handle += 1;
        }
        self.sessions.insert(handle, Session::new());
        handle
    }

    pub(crate) fn check(
        &self,
        handle: Handle,
    ) -> Result<(), KeeperError> {
        self.get(handle).map(|_| ())
    }

    pub(crate) fn get(
        &self,
        handle: Handle,
    ) -> Result<&Session, KeeperError> {
        self.sessions
            .get(&handle)
            .ok_or(KeeperError::InvalidHandle(handle))
    }

    pub(crate) fn get_mut(
        &mut self,
        handle: Handle,
    ) -> Result<&mut Session, KeeperError> {
        self.sessions
            .get_mut(&handle)
            .ok_or(KeeperError::InvalidHandle(handle))
    }

    pub(crate) fn remove(
        &mut self,
        handle: Handle,
    ) {
        self.sessions.remove(&handle);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.sessions.len()
    }
}
