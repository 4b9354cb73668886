//! Access-control entries.
//!
//! ACLs are stored and versioned, never enforced: the emulator only has to
//! keep the bookkeeping a client reads back.

use lazy_static::lazy_static;
use serde::Deserialize;
use serde::Serialize;

pub const PERM_READ: u32 = 1;
pub const PERM_WRITE: u32 = 2;
pub const PERM_CREATE: u32 = 4;
pub const PERM_DELETE: u32 = 8;
pub const PERM_ADMIN: u32 = 16;
pub const PERM_ALL: u32 = PERM_READ | PERM_WRITE | PERM_CREATE | PERM_DELETE | PERM_ADMIN;

/// One access-control entry attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    pub perms: u32,
    pub scheme: String,
    pub id: String,
}

impl Acl {
    /// Entry granting `perms` to anyone under the `world` scheme.
    pub fn world(perms: u32) -> Self {
        Self {
            perms,
            scheme: "world".to_owned(),
            id: "anyone".to_owned(),
        }
    }
}

lazy_static! {
    /// Full access for everyone. The default ACL on new nodes.
    pub static ref OPEN_ACL_UNSAFE: Vec<Acl> = vec![Acl::world(PERM_ALL)];
    /// Read-only access for everyone.
    pub static ref READ_ACL_UNSAFE: Vec<Acl> = vec![Acl::world(PERM_READ)];
}
