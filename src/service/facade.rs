//! The in-process service façade.
//!
//! One [`Emulator`] stands in for an entire coordination service: it owns the
//! node tree and the session table, validates every operation's
//! preconditions, mutates state and invokes due watch callbacks before the
//! triggering call returns.
//!
//! All state sits behind a single exclusive lock held for the whole of every
//! operation, watch callbacks included. Callbacks therefore run synchronously
//! inside the lock, which reproduces the real service's
//! delivery-before-completion semantics; a callback that calls back into the
//! emulator deadlocks. Callers must treat watch callbacks as notification
//! sinks, not as places to issue follow-up operations.

use parking_lot::Mutex;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::default_tree;
use crate::session::SessionTable;
use crate::tree::is_root;
use crate::tree::parent_and_name;
use crate::Acl;
use crate::AclStat;
use crate::ConnectionState;
use crate::Coordination;
use crate::EmulatorSettings;
use crate::Error;
use crate::EventKind;
use crate::Handle;
use crate::KeeperError;
use crate::Node;
use crate::Result;
use crate::Stat;
use crate::WatchEvent;
use crate::WatchFn;
use crate::EPHEMERAL;

/// The emulated service instance.
pub struct Emulator {
    connection_string: String,
    state: Mutex<EmulatorState>,
}

struct EmulatorState {
    root: Node,
    sessions: SessionTable,
}

impl Emulator {
    /// An emulator seeded with the standard fixture tree.
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self::with_tree(connection_string, default_tree())
    }

    /// An emulator over an externally built tree.
    pub fn with_tree(
        connection_string: impl Into<String>,
        root: Node,
    ) -> Self {
        Self {
            connection_string: connection_string.into(),
            state: Mutex::new(EmulatorState {
                root,
                sessions: SessionTable::default(),
            }),
        }
    }

    pub fn from_settings(settings: &EmulatorSettings) -> Self {
        let root = if settings.seed_default_tree {
            default_tree()
        } else {
            Node::default()
        };
        Self::with_tree(settings.connection_string.clone(), root)
    }

    /// The connection string `init` calls must present.
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    fn create_locked(
        state: &mut EmulatorState,
        handle: Handle,
        path: &str,
        data: &[u8],
        acl: &[Acl],
        flags: u32,
    ) -> Result<String> {
        let Some((base, name)) = parent_and_name(path) else {
            // The root always exists; anything else unsplittable has no
            // resolvable parent.
            let err = if is_root(path) {
                KeeperError::node_exists(path)
            } else {
                KeeperError::no_node(path)
            };
            return Err(err.into());
        };

        let parent = state.root.traverse_mut(base)?;
        if parent.children.contains_key(name) {
            return Err(KeeperError::node_exists(path).into());
        }

        let mut node = Node::new(data.to_vec());
        node.acl = acl.to_vec();
        node.flags = flags;
        parent.children.insert(name.to_owned(), node);
        parent.fire_children_changed(ConnectionState::Connected, base);

        if flags & EPHEMERAL != 0 {
            state.sessions.get_mut(handle)?.record_ephemeral(path);
        }
        Ok(path.to_owned())
    }

    fn delete_locked(
        state: &mut EmulatorState,
        handle: Handle,
        path: &str,
    ) -> Result<()> {
        let Some((base, name)) = parent_and_name(path) else {
            // The root is never unlinked.
            return Err(KeeperError::no_node(path).into());
        };

        let parent = state.root.traverse_mut(base)?;
        let mut node = parent
            .children
            .remove(name)
            .ok_or_else(|| KeeperError::no_node(path))?;
        node.fire_deleted(ConnectionState::Connected, path);
        parent.fire_children_changed(ConnectionState::Connected, base);

        if let Ok(session) = state.sessions.get_mut(handle) {
            session.unrecord_ephemeral(path);
        }
        Ok(())
    }
}

impl Coordination for Emulator {
    fn init(
        &self,
        addr: &str,
        watch: Option<WatchFn>,
    ) -> Result<Handle> {
        if addr != self.connection_string {
            warn!(
                "init refused: expected {:?}, got {:?}",
                self.connection_string, addr
            );
            return Err(KeeperError::AddressMismatch {
                expected: self.connection_string.clone(),
                given: addr.to_owned(),
            }
            .into());
        }

        let mut state = self.state.lock();
        let handle = state.sessions.open();
        debug!("session {} connected to {:?}", handle, addr);
        if let Some(watch) = watch {
            watch(WatchEvent {
                handle,
                kind: EventKind::Session,
                state: ConnectionState::Connected,
                path: String::new(),
            });
        }
        Ok(handle)
    }

    fn close(
        &self,
        handle: Handle,
    ) -> Result<()> {
        let mut state = self.state.lock();
        let ephemerals = state.sessions.get(handle)?.ephemeral_paths();
        for path in ephemerals {
            match Self::delete_locked(&mut state, handle, &path) {
                // Someone else already deleted it out from under the owner.
                Err(Error::Keeper(KeeperError::NoNode { .. })) => {
                    trace!("ephemeral {:?} already gone", path);
                }
                other => other?,
            }
        }
        state.sessions.remove(handle);
        state.root.clear_watchers(handle);
        debug!("session {} closed", handle);
        Ok(())
    }

    fn state(
        &self,
        handle: Handle,
    ) -> Result<ConnectionState> {
        let state = self.state.lock();
        Ok(state.sessions.get(handle)?.state)
    }

    fn create(
        &self,
        handle: Handle,
        path: &str,
        data: &[u8],
        acl: &[Acl],
        flags: u32,
    ) -> Result<String> {
        let mut state = self.state.lock();
        state.sessions.check(handle)?;
        debug!("create {:?} by session {}, flags {}", path, handle, flags);
        Self::create_locked(&mut state, handle, path, data, acl, flags)
    }

    fn delete(
        &self,
        handle: Handle,
        path: &str,
    ) -> Result<()> {
        let mut state = self.state.lock();
        state.sessions.check(handle)?;
        debug!("delete {:?} by session {}", path, handle);
        Self::delete_locked(&mut state, handle, path)
    }

    fn exists(
        &self,
        handle: Handle,
        path: &str,
    ) -> Result<bool> {
        let state = self.state.lock();
        state.sessions.check(handle)?;
        Ok(state.root.traverse(path).is_ok())
    }

    fn get(
        &self,
        handle: Handle,
        path: &str,
        watch: Option<WatchFn>,
    ) -> Result<(Vec<u8>, Stat)> {
        let mut state = self.state.lock();
        state.sessions.check(handle)?;
        let node = state.root.traverse_mut(path)?;
        if let Some(watch) = watch {
            node.watchers.register(handle, watch);
        }
        let stat = Stat {
            ephemeral_owner: if node.is_ephemeral() { 1 } else { 0 },
        };
        Ok((node.data.clone(), stat))
    }

    fn set(
        &self,
        handle: Handle,
        path: &str,
        data: &[u8],
    ) -> Result<()> {
        let mut state = self.state.lock();
        state.sessions.check(handle)?;
        let node = state.root.traverse_mut(path)?;
        node.data = data.to_vec();
        node.fire_changed(ConnectionState::Connected, path);
        Ok(())
    }

    fn get_children(
        &self,
        handle: Handle,
        path: &str,
        watch: Option<WatchFn>,
    ) -> Result<Vec<String>> {
        let mut state = self.state.lock();
        state.sessions.check(handle)?;
        let node = state.root.traverse_mut(path)?;
        if let Some(watch) = watch {
            node.child_watchers.register(handle, watch);
        }
        Ok(node.child_names())
    }

    fn get_acl(
        &self,
        handle: Handle,
        path: &str,
    ) -> Result<(AclStat, Vec<Acl>)> {
        let state = self.state.lock();
        state.sessions.check(handle)?;
        let node = state.root.traverse(path)?;
        Ok((
            AclStat {
                aversion: node.aversion,
            },
            node.acl.clone(),
        ))
    }

    fn set_acl(
        &self,
        handle: Handle,
        path: &str,
        aversion: i32,
        acl: &[Acl],
    ) -> Result<()> {
        let mut state = self.state.lock();
        state.sessions.check(handle)?;
        let node = state.root.traverse_mut(path)?;
        if aversion != node.aversion {
            return Err(KeeperError::BadVersion {
                current: node.aversion,
                given: aversion,
            }
            .into());
        }
        node.aversion += 1;
        node.acl = acl.to_vec();
        Ok(())
    }
}
