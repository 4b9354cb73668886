//! Slash-separated path handling.
//!
//! Paths are absolute. Empty segments from leading, trailing or duplicate
//! slashes are skipped, so `//a///b` and `/a/b` address the same node.

/// Non-empty segments of `path`, in traversal order.
pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Splits `path` into (parent path, leaf name).
///
/// Returns `None` when there is no leaf to split off: the root path, or a
/// relative path whose parent cannot be resolved.
pub(crate) fn parent_and_name(path: &str) -> Option<(&str, &str)> {
    path.trim_end_matches('/').rsplit_once('/')
}

/// True when `path` addresses the root node.
pub(crate) fn is_root(path: &str) -> bool {
    segments(path).next().is_none()
}
