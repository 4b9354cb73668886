//! Hierarchical node store.
//!
//! The tree holds all emulated state: per-node data bytes, children, ACL
//! metadata and the pending watch registrations. It is exclusively owned by
//! the service instance and only ever mutated under its lock.

mod acl;
mod fixture;
mod node;
mod path;

pub use acl::*;
pub use fixture::*;
pub use node::*;
pub(crate) use path::*;

#[cfg(test)]
mod node_test;
