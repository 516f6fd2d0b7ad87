//! # Key Normalization
//!
//! Strips the reserved `$` character from every map key at every depth.
//! Keys like `$where` or `a$b` would otherwise be interpreted as operators
//! by downstream document stores.

use serde_json::{Map, Value};

/// Character removed from all map keys before a payload is persisted.
pub const RESERVED_KEY_CHAR: char = '$';

/// Recursively remove [`RESERVED_KEY_CHAR`] from all map keys.
///
/// Structure is preserved: sequences are normalized element-wise, scalars
/// pass through unchanged, empty maps and sequences stay empty. If two keys
/// normalize to the same name, the last one in document order wins the
/// value slot while the first keeps its position.
pub fn strip_reserved_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut normalized = Map::with_capacity(map.len());
            for (key, inner) in map {
                let clean_key: String = key.chars().filter(|c| *c != RESERVED_KEY_CHAR).collect();
                normalized.insert(clean_key, strip_reserved_keys(inner));
            }
            Value::Object(normalized)
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(strip_reserved_keys).collect())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_no_reserved_keys(value: &Value) {
        match value {
            Value::Object(map) => {
                for (key, inner) in map {
                    assert!(
                        !key.contains(RESERVED_KEY_CHAR),
                        "reserved character survived in key: {}",
                        key
                    );
                    assert_no_reserved_keys(inner);
                }
            }
            Value::Array(items) => {
                for item in items {
                    assert_no_reserved_keys(item);
                }
            }
            _ => {}
        }
    }

    #[test]
    fn test_strips_prefix_dollar() {
        let normalized = strip_reserved_keys(json!({"$username": "Joe"}));
        assert_eq!(normalized, json!({"username": "Joe"}));
    }

    #[test]
    fn test_strips_dollar_anywhere_in_key() {
        let normalized = strip_reserved_keys(json!({"a$b$c": 1}));
        assert_eq!(normalized, json!({"abc": 1}));
    }

    #[test]
    fn test_strips_nested_and_inside_arrays() {
        let normalized = strip_reserved_keys(json!({
            "outer": {"$inner": [{"$deep": true}, 2, "x"]},
            "$list": [[{"$$k": null}]]
        }));
        assert_no_reserved_keys(&normalized);
        assert_eq!(
            normalized,
            json!({
                "outer": {"inner": [{"deep": true}, 2, "x"]},
                "list": [[{"k": null}]]
            })
        );
    }

    #[test]
    fn test_values_are_untouched() {
        let normalized = strip_reserved_keys(json!({"price": "$100", "n": 3.5}));
        assert_eq!(normalized, json!({"price": "$100", "n": 3.5}));
    }

    #[test]
    fn test_empty_containers_preserved() {
        let normalized = strip_reserved_keys(json!({"empty_map": {}, "empty_list": []}));
        assert_eq!(normalized, json!({"empty_map": {}, "empty_list": []}));
    }

    #[test]
    fn test_collision_last_value_wins() {
        // "$user" and "user" normalize to the same key: the later entry in
        // document order keeps the value.
        let normalized = strip_reserved_keys(json!({"$user": 1, "user": 2}));
        assert_eq!(normalized, json!({"user": 2}));

        let normalized = strip_reserved_keys(json!({"user": 1, "$user": 2}));
        assert_eq!(normalized, json!({"user": 2}));
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(strip_reserved_keys(json!(null)), json!(null));
        assert_eq!(strip_reserved_keys(json!(true)), json!(true));
        assert_eq!(strip_reserved_keys(json!("$text")), json!("$text"));
    }
}
