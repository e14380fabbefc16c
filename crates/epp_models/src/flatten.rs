//! Flat, dotted-path views over nested gateway data.
//!
//! Display code downstream expects `key -> value` pairs regardless of nesting
//! depth, e.g. `order-items.order-item.0.name`. Object keys and array indices
//! both become path segments; leaf strings have runs of whitespace collapsed
//! to a single space.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

pub const PATH_SEPARATOR: char = '.';

pub fn flatten(value: &Value) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();
    flatten_into(value, "", &mut result);
    result
}

fn flatten_into(value: &Value, prefix: &str, result: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(child, &join(prefix, key), result);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, &join(prefix, &index.to_string()), result);
            }
        }
        Value::String(text) => {
            result.insert(prefix.to_owned(), collapse_whitespace(text));
        }
        Value::Null => {
            result.insert(prefix.to_owned(), String::new());
        }
        scalar @ (Value::Bool(_) | Value::Number(_)) => {
            result.insert(prefix.to_owned(), scalar.to_string());
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}{PATH_SEPARATOR}{key}")
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Re-nests a flat view produced by [`flatten`].
///
/// Objects whose keys are exactly `0..n` come back as arrays. Leaves are
/// always strings.
pub fn unflatten(flat: &BTreeMap<String, String>) -> Value {
    let mut root = Map::new();
    for (path, leaf) in flat {
        let segments = path.split(PATH_SEPARATOR).collect::<Vec<_>>();
        insert_path(&mut root, &segments, leaf);
    }
    restore_arrays(Value::Object(root))
}

fn insert_path(target: &mut Map<String, Value>, segments: &[&str], leaf: &str) {
    match segments {
        [] => {}
        [last] => {
            target.insert((*last).to_owned(), Value::String(leaf.to_owned()));
        }
        [head, rest @ ..] => {
            let entry = target
                .entry((*head).to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(child) = entry {
                insert_path(child, rest, leaf);
            }
        }
    }
}

fn restore_arrays(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut map = map
                .into_iter()
                .map(|(key, child)| (key, restore_arrays(child)))
                .collect::<Map<String, Value>>();

            let is_index_only =
                !map.is_empty() && (0..map.len()).all(|index| map.contains_key(&index.to_string()));
            if is_index_only {
                Value::Array(
                    (0..map.len())
                        .filter_map(|index| map.remove(&index.to_string()))
                        .collect(),
                )
            } else {
                Value::Object(map)
            }
        }
        other => other,
    }
}
