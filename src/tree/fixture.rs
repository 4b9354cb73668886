//! Default tree seeded when no import tree is supplied.

use serde_json::json;

use crate::Node;

/// The standard fixture dependent tests assume: a service entry carrying a
/// JSON configuration blob with an empty `providers` container, and the
/// server's own quota container.
pub fn default_tree() -> Node {
    let config_blob = json!({
        "database": "/databases/foomain",
        "threads": 1,
        "favorite_color": "red",
    });
    Node::default()
        .with_child(
            "fooservice",
            Node::new(config_blob.to_string()).with_child("providers", Node::default()),
        )
        .with_child("zookeeper", Node::new("").with_child("quota", Node::default()))
}
