//! End-to-end scenarios over the public API, written the way dependent
//! client code drives the emulator.

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use serde_json::Value;
use treekeeper::Coordination;
use treekeeper::Emulator;
use treekeeper::EventKind;
use treekeeper::WatchEvent;
use treekeeper::WatchFn;
use treekeeper::EPHEMERAL;
use treekeeper::OPEN_ACL_UNSAFE;

const ADDR: &str = "zookeeper.example.com:2181";

type EventLog = Arc<Mutex<Vec<WatchEvent>>>;

fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

fn record_into(log: &EventLog) -> WatchFn {
    let log = Arc::clone(log);
    Box::new(move |event| log.lock().push(event))
}

#[test]
fn create_and_read_back_a_plain_node() {
    let emu = Emulator::new(ADDR);
    let handle = emu.init(ADDR, None).unwrap();

    emu.create(handle, "/a", b"x", &OPEN_ACL_UNSAFE, 0).unwrap();

    let (data, stat) = emu.get(handle, "/a", None).unwrap();
    assert_eq!(data, b"x");
    assert_eq!(stat.ephemeral_owner, 0);
}

#[test]
fn ephemeral_nodes_vanish_when_their_session_closes() {
    let emu = Emulator::new(ADDR);
    let owner = emu.init(ADDR, None).unwrap();

    emu.create(owner, "/a", b"x", &OPEN_ACL_UNSAFE, EPHEMERAL)
        .unwrap();
    emu.close(owner).unwrap();

    let checker = emu.init(ADDR, None).unwrap();
    assert!(!emu.exists(checker, "/a").unwrap());
}

#[test]
fn a_data_watch_is_delivered_exactly_once() {
    let emu = Emulator::new(ADDR);
    let handle = emu.init(ADDR, None).unwrap();
    emu.create(handle, "/a", b"x", &OPEN_ACL_UNSAFE, 0).unwrap();

    let log = event_log();
    emu.get(handle, "/a", Some(record_into(&log))).unwrap();

    emu.set(handle, "/a", b"y").unwrap();
    emu.set(handle, "/a", b"z").unwrap();

    let events = log.lock();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Changed);
    assert_eq!(events[0].path, "/a");
}

#[test]
fn the_default_fixture_is_visible_to_fresh_sessions() {
    let emu = Emulator::new(ADDR);
    let handle = emu.init(ADDR, None).unwrap();

    assert_eq!(
        emu.get_children(handle, "/", None).unwrap(),
        vec!["fooservice", "zookeeper"]
    );

    let (blob, _) = emu.get(handle, "/fooservice", None).unwrap();
    let config: Value = serde_json::from_slice(&blob).unwrap();
    assert_eq!(config["database"], "/databases/foomain");

    assert!(emu.exists(handle, "/zookeeper/quota").unwrap());
}

#[test]
fn optimistic_acl_updates_follow_read_modify_write() {
    let emu = Emulator::new(ADDR);
    let handle = emu.init(ADDR, None).unwrap();
    emu.create(handle, "/locked", b"", &OPEN_ACL_UNSAFE, 0)
        .unwrap();

    // A writer that raced and lost must re-read before retrying.
    let (stat, acl) = emu.get_acl(handle, "/locked").unwrap();
    emu.set_acl(handle, "/locked", stat.aversion, &acl).unwrap();
    assert!(emu.set_acl(handle, "/locked", stat.aversion, &acl).is_err());

    let (stat, acl) = emu.get_acl(handle, "/locked").unwrap();
    emu.set_acl(handle, "/locked", stat.aversion, &acl).unwrap();
}

#[test]
fn concurrent_sessions_from_multiple_threads_are_serialized() {
    let emu = Arc::new(Emulator::new(ADDR));

    let threads: Vec<_> = (0..4)
        .map(|i| {
            let emu = Arc::clone(&emu);
            thread::spawn(move || {
                let handle = emu.init(ADDR, None).unwrap();
                let path = format!("/t{i}");
                emu.create(handle, &path, b"", &OPEN_ACL_UNSAFE, 0).unwrap();
                handle
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }

    let handle = emu.init(ADDR, None).unwrap();
    for i in 0..4 {
        assert!(emu.exists(handle, &format!("/t{i}")).unwrap());
    }
}
