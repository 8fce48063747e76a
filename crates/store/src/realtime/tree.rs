//! Operations on an in-memory copy of the content tree.
//!
//! The tree holds only objects and scalars. Arrays are stored as objects
//! keyed by index, nulls delete, and objects left empty disappear, so a
//! location either has a value or reads back as `Null`.

use serde_json::{Map, Value};

/// Normalize a value before it enters the tree.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Array(items) => {
            let map: Map<String, Value> = items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), normalize(v)))
                .filter(|(_, v)| !is_empty(v))
                .collect();
            if map.is_empty() {
                Value::Null
            } else {
                Value::Object(map)
            }
        }
        Value::Object(map) => {
            let map: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, normalize(v)))
                .filter(|(_, v)| !is_empty(v))
                .collect();
            if map.is_empty() {
                Value::Null
            } else {
                Value::Object(map)
            }
        }
        other => other,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Value at `segments`, or `Null`.
pub fn get_at(root: &Value, segments: &[&str]) -> Value {
    let mut node = root;
    for segment in segments {
        match node.get(*segment) {
            Some(child) => node = child,
            None => return Value::Null,
        }
    }
    node.clone()
}

/// Replace the value at `segments`. A `Null` value deletes.
pub fn set_at(node: &mut Value, segments: &[&str], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *node = normalize(value);
        return;
    };

    if !node.is_object() {
        if value.is_null() {
            return;
        }
        *node = Value::Object(Map::new());
    }

    if let Value::Object(map) = node {
        let child = map.entry(head.to_string()).or_insert(Value::Null);
        set_at(child, rest, value);
        if is_empty(child) {
            map.remove(*head);
        }
    }
    if is_empty(node) {
        *node = Value::Null;
    }
}

/// Replace each named child of the location at `segments`.
pub fn merge_at(node: &mut Value, segments: &[&str], children: Map<String, Value>) {
    for (key, value) in children {
        let mut path: Vec<&str> = segments.to_vec();
        path.extend(key.split('/').filter(|s| !s.is_empty()));
        set_at(node, &path, value);
    }
    if is_empty(node) {
        *node = Value::Null;
    }
}

/// Whether a write at `written` can change what a watcher of `watched` sees.
pub fn overlaps(watched: &[&str], written: &[&str]) -> bool {
    watched.iter().zip(written.iter()).all(|(a, b)| a == b)
}
