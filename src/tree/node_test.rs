use super::*;
use crate::test_utils::event_log;
use crate::test_utils::record_into;
use crate::ConnectionState;
use crate::EventKind;
use crate::KeeperError;
use crate::PERM_ALL;

fn sample_tree() -> Node {
    Node::default().with_child(
        "a",
        Node::new("a-data").with_child("b", Node::new("b-data")),
    )
}

#[test]
fn traverse_should_resolve_nested_paths() {
    let root = sample_tree();

    assert_eq!(root.traverse("/a").unwrap().data(), b"a-data");
    assert_eq!(root.traverse("/a/b").unwrap().data(), b"b-data");
}

#[test]
fn traverse_should_skip_empty_segments() {
    let root = sample_tree();

    let direct = root.traverse("/a/b").unwrap();
    let sloppy = root.traverse("//a///b/").unwrap();
    assert_eq!(direct.data(), sloppy.data());
}

#[test]
fn traverse_of_root_paths_should_return_the_root() {
    let root = sample_tree();

    assert_eq!(root.traverse("/").unwrap().child_names(), vec!["a"]);
    assert_eq!(root.traverse("").unwrap().child_names(), vec!["a"]);
}

#[test]
fn traverse_should_fail_on_a_missing_segment() {
    let root = sample_tree();

    let err = root.traverse("/a/missing/deeper").unwrap_err();
    assert!(matches!(err, KeeperError::NoNode { .. }));
}

#[test]
fn child_names_should_be_lexicographic_regardless_of_insertion_order() {
    let root = Node::default()
        .with_child("zebra", Node::default())
        .with_child("alpha", Node::default())
        .with_child("mango", Node::default());

    assert_eq!(root.child_names(), vec!["alpha", "mango", "zebra"]);
}

#[test]
fn new_nodes_should_carry_the_open_acl_and_version_zero() {
    let node = Node::new("x");

    assert_eq!(node.aversion(), 0);
    assert_eq!(node.acl.len(), 1);
    assert_eq!(node.acl[0].perms, PERM_ALL);
    assert_eq!(node.acl[0].scheme, "world");
    assert!(!node.is_ephemeral());
}

#[test]
fn fire_deleted_should_drain_both_watcher_kinds() {
    let log = event_log();
    let mut node = Node::new("x");
    node.watchers.register(0, record_into(&log));
    node.child_watchers.register(1, record_into(&log));

    node.fire_deleted(ConnectionState::Connected, "/x");

    let events = log.lock();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.kind == EventKind::Deleted));
    assert_eq!(events[0].handle, 0);
    assert_eq!(events[1].handle, 1);
    assert!(node.watchers.is_empty());
    assert!(node.child_watchers.is_empty());
}

#[test]
fn fire_changed_should_not_touch_child_watchers() {
    let log = event_log();
    let mut node = Node::new("x");
    node.watchers.register(0, record_into(&log));
    node.child_watchers.register(0, record_into(&log));

    node.fire_changed(ConnectionState::Connected, "/x");

    assert_eq!(log.lock().len(), 1);
    assert!(node.watchers.is_empty());
    assert_eq!(node.child_watchers.len(), 1);
}

#[test]
fn clear_watchers_should_recurse_into_descendants() {
    let log = event_log();
    let mut root = sample_tree();
    root.traverse_mut("/a")
        .unwrap()
        .watchers
        .register(3, record_into(&log));
    root.traverse_mut("/a/b")
        .unwrap()
        .child_watchers
        .register(3, record_into(&log));
    root.traverse_mut("/a/b")
        .unwrap()
        .watchers
        .register(4, record_into(&log));

    root.clear_watchers(3);

    assert!(root.traverse("/a").unwrap().watchers.is_empty());
    assert!(root.traverse("/a/b").unwrap().child_watchers.is_empty());
    // Another session's registration survives.
    assert_eq!(root.traverse("/a/b").unwrap().watchers.len(), 1);
}
