//! The enumerated operation interface of the coordination service.
//!
//! Adapters that substitute the emulator for a real client bind against this
//! trait; it reproduces, call-for-call, the contract surface client code
//! consumes.

#[cfg(test)]
use mockall::automock;

use crate::Acl;
use crate::ConnectionState;
use crate::Handle;
use crate::Result;
use crate::WatchFn;

/// Node metadata returned by a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stat {
    /// 1 when the node is ephemeral-owned, 0 otherwise
    pub ephemeral_owner: u64,
}

/// ACL metadata returned by `get_acl`. Feed `aversion` back into `set_acl`
/// to prove the update is based on the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AclStat {
    pub aversion: i32,
}

#[cfg_attr(test, automock)]
pub trait Coordination: Send + Sync {
    /// Opens a session. `addr` must equal the configured connection string.
    /// A given watch synchronously receives one session/connected event.
    /// Returns the lowest unused handle, starting at 0.
    fn init(
        &self,
        addr: &str,
        watch: Option<WatchFn>,
    ) -> Result<Handle>;

    /// Closes a session: deletes its ephemeral paths (with the usual delete
    /// notifications) and strips its watch registrations tree-wide.
    fn close(
        &self,
        handle: Handle,
    ) -> Result<()>;

    /// Connection state of a live session.
    fn state(
        &self,
        handle: Handle,
    ) -> Result<ConnectionState>;

    /// Creates a node under an existing parent. Fires the parent's
    /// children-changed watches. Returns the path.
    fn create(
        &self,
        handle: Handle,
        path: &str,
        data: &[u8],
        acl: &[Acl],
        flags: u32,
    ) -> Result<String>;

    /// Unlinks a node. Fires the node's deleted watches (both kinds), then
    /// the parent's children-changed watches.
    fn delete(
        &self,
        handle: Handle,
        path: &str,
    ) -> Result<()>;

    /// Whether a node exists. Never registers a watch.
    fn exists(
        &self,
        handle: Handle,
        path: &str,
    ) -> Result<bool>;

    /// Reads a node's data, optionally registering a one-shot data watch.
    fn get(
        &self,
        handle: Handle,
        path: &str,
        watch: Option<WatchFn>,
    ) -> Result<(Vec<u8>, Stat)>;

    /// Replaces a node's data and fires its changed watches.
    fn set(
        &self,
        handle: Handle,
        path: &str,
        data: &[u8],
    ) -> Result<()>;

    /// Child names in lexicographic order, optionally registering a one-shot
    /// child watch.
    fn get_children(
        &self,
        handle: Handle,
        path: &str,
        watch: Option<WatchFn>,
    ) -> Result<Vec<String>>;

    /// Reads a node's ACL and its current version.
    fn get_acl(
        &self,
        handle: Handle,
        path: &str,
    ) -> Result<(AclStat, Vec<Acl>)>;

    /// Replaces a node's ACL. `aversion` must equal the current version;
    /// on success the version increments by exactly 1.
    fn set_acl(
        &self,
        handle: Handle,
        path: &str,
        aversion: i32,
        acl: &[Acl],
    ) -> Result<()>;
}
