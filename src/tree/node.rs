use std::collections::BTreeMap;

use crate::tree::path::segments;
use crate::Acl;
use crate::ConnectionState;
use crate::EventKind;
use crate::Handle;
use crate::KeeperError;
use crate::WatchSet;
use crate::OPEN_ACL_UNSAFE;

/// Creation flag marking a node whose lifetime is bound to the creating
/// session.
pub const EPHEMERAL: u32 = 1;

/// One vertex of the emulated tree.
///
/// A node's position is unique: one parent, one name. The root has no parent
/// and is never deleted. Children are kept in a `BTreeMap` so enumeration is
/// lexicographic by construction.
#[derive(Debug)]
pub struct Node {
    pub(crate) data: Vec<u8>,
    pub(crate) children: BTreeMap<String, Node>,
    pub(crate) acl: Vec<Acl>,
    pub(crate) aversion: i32,
    pub(crate) flags: u32,
    pub(crate) watchers: WatchSet,
    pub(crate) child_watchers: WatchSet,
}

impl Default for Node {
    fn default() -> Self {
        Node::new(Vec::new())
    }
}

impl Node {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            children: BTreeMap::new(),
            acl: OPEN_ACL_UNSAFE.clone(),
            aversion: 0,
            flags: 0,
            watchers: WatchSet::default(),
            child_watchers: WatchSet::default(),
        }
    }

    /// Attaches a child, consuming and returning `self` so import
    /// collaborators can build trees by chaining.
    pub fn with_child(
        mut self,
        name: impl Into<String>,
        child: Node,
    ) -> Self {
        self.children.insert(name.into(), child);
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn aversion(&self) -> i32 {
        self.aversion
    }

    pub fn is_ephemeral(&self) -> bool {
        self.flags & EPHEMERAL != 0
    }

    pub fn child(
        &self,
        name: &str,
    ) -> Option<&Node> {
        self.children.get(name)
    }

    /// Child names in lexicographic order.
    pub fn child_names(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    /// Resolves a slash-separated path by descending `children` from this
    /// node. Empty segments are skipped; an absent segment fails `NoNode`.
    pub(crate) fn traverse(
        &self,
        path: &str,
    ) -> Result<&Node, KeeperError> {
        let mut node = self;
        for segment in segments(path) {
            node = node
                .children
                .get(segment)
                .ok_or_else(|| KeeperError::no_node(path))?;
        }
        Ok(node)
    }

    pub(crate) fn traverse_mut(
        &mut self,
        path: &str,
    ) -> Result<&mut Node, KeeperError> {
        let mut node = self;
        for segment in segments(path) {
            node = node
                .children
                .get_mut(segment)
                .ok_or_else(|| KeeperError::no_node(path))?;
        }
        Ok(node)
    }

    pub(crate) fn fire_changed(
        &mut self,
        state: ConnectionState,
        path: &str,
    ) {
        self.watchers.fire(EventKind::Changed, state, path);
    }

    pub(crate) fn fire_children_changed(
        &mut self,
        state: ConnectionState,
        path: &str,
    ) {
        self.child_watchers.fire(EventKind::Child, state, path);
    }

    /// A deleted node notifies watchers of both kinds before being dropped.
    /// The data-watcher and child-watcher sets drain independently, each
    /// exactly once.
    pub(crate) fn fire_deleted(
        &mut self,
        state: ConnectionState,
        path: &str,
    ) {
        self.watchers.fire(EventKind::Deleted, state, path);
        self.child_watchers.fire(EventKind::Deleted, state, path);
    }

    /// Strips a closed session's registrations from this node and every
    /// descendant, so no dangling per-session watches survive a close.
    pub(crate) fn clear_watchers(
        &mut self,
        handle: Handle,
    ) {
        self.watchers.clear_session(handle);
        self.child_watchers.clear_session(handle);
        for child in self.children.values_mut() {
            child.clear_watchers(handle);
        }
    }
}
