//! Coordination Service Error Hierarchy
//!
//! Defines the error surface of the emulated service, categorized by
//! protocol contract and operational concerns. Every failure is raised
//! synchronously to the caller of the failing operation; nothing is
//! retried internally.

use config::ConfigError;

use crate::Handle;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration loading and validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Coordination protocol violations surfaced to the caller
    #[error(transparent)]
    Keeper(#[from] KeeperError),
}

/// Failures the emulated service reports call-for-call, mirroring the
/// contract a real coordination server exposes to its clients.
#[derive(Debug, thiserror::Error)]
pub enum KeeperError {
    /// Operation addressed a path with a missing segment or missing leaf
    #[error("no node: {path}")]
    NoNode { path: String },

    /// Create targeted a name already present under the parent
    #[error("node exists: {path}")]
    NodeExists { path: String },

    /// ACL update supplied a version that no longer matches
    #[error("bad version: current aversion is {current}, got {given}")]
    BadVersion { current: i32, given: i32 },

    /// Operation addressed a session handle that is not live
    #[error("handle out of range: {0}")]
    InvalidHandle(Handle),

    /// Session init used an address other than the configured one
    #[error("address mismatch: expected {expected:?}, got {given:?}")]
    AddressMismatch { expected: String, given: String },
}

impl KeeperError {
    pub(crate) fn no_node(path: &str) -> Self {
        KeeperError::NoNode {
            path: path.to_owned(),
        }
    }

    pub(crate) fn node_exists(path: &str) -> Self {
        KeeperError::NodeExists {
            path: path.to_owned(),
        }
    }
}
