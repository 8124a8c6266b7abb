//! Small object-manipulation toolkit over JSON values (`pick`, `omit`, `get`).
//!
//! Paths use dot notation with optional bracket indices: `user.tags[0]` and
//! `user.tags.0` address the same value.

use serde_json::{Map, Value};

fn segments(path: &str) -> Vec<String> {
    path.replace('[', ".")
        .replace(']', "")
        .split('.')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Read the value at `path`, if present.
pub fn get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    segments(path)
        .iter()
        .try_fold(value, |current, key| child(current, key))
}

/// Read the value at `path`, falling back to `default`.
pub fn get_or(value: &Value, path: &str, default: Value) -> Value {
    get(value, path).cloned().unwrap_or(default)
}

fn insert_at(target: &mut Map<String, Value>, keys: &[String], picked: Value) {
    let Some((first, rest)) = keys.split_first() else {
        return;
    };

    if rest.is_empty() {
        target.insert(first.clone(), picked);
        return;
    }

    let slot = target
        .entry(first.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(inner) = slot {
        insert_at(inner, rest, picked);
    }
}

/// New object holding only the given paths. Missing paths are skipped.
pub fn pick<S: AsRef<str>>(value: &Value, paths: &[S]) -> Value {
    let mut out = Map::new();

    for path in paths {
        let keys = segments(path.as_ref());
        if let Some(found) = get(value, path.as_ref()) {
            insert_at(&mut out, &keys, found.clone());
        }
    }

    Value::Object(out)
}

fn remove_at(value: &mut Value, keys: &[String]) {
    let Some((first, rest)) = keys.split_first() else {
        return;
    };

    match value {
        Value::Object(map) if rest.is_empty() => {
            map.remove(first);
        }
        Value::Object(map) => {
            if let Some(inner) = map.get_mut(first) {
                remove_at(inner, rest);
            }
        }
        Value::Array(items) => {
            if let Ok(i) = first.parse::<usize>() {
                if rest.is_empty() {
                    if i < items.len() {
                        items.remove(i);
                    }
                } else if let Some(inner) = items.get_mut(i) {
                    remove_at(inner, rest);
                }
            }
        }
        _ => {}
    }
}

/// Copy of `value` without the given paths.
pub fn omit<S: AsRef<str>>(value: &Value, paths: &[S]) -> Value {
    let mut out = value.clone();
    for path in paths {
        remove_at(&mut out, &segments(path.as_ref()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "id": 7,
            "name": "ada",
            "profile": { "email": "ada@example.com", "tags": ["admin", "ops"] }
        })
    }

    #[test]
    fn get_follows_dots_and_brackets() {
        let v = sample();
        assert_eq!(get(&v, "profile.email"), Some(&json!("ada@example.com")));
        assert_eq!(get(&v, "profile.tags[1]"), Some(&json!("ops")));
        assert_eq!(get(&v, "profile.tags.0"), Some(&json!("admin")));
        assert_eq!(get(&v, "profile.missing"), None);
        assert_eq!(get_or(&v, "nope", json!(42)), json!(42));
    }

    #[test]
    fn pick_keeps_only_requested_paths() {
        let v = sample();
        assert_eq!(
            pick(&v, &["id", "profile.email", "absent"]),
            json!({ "id": 7, "profile": { "email": "ada@example.com" } })
        );
    }

    #[test]
    fn omit_removes_requested_paths() {
        let v = sample();
        assert_eq!(
            omit(&v, &["name", "profile.tags"]),
            json!({ "id": 7, "profile": { "email": "ada@example.com" } })
        );
        assert_eq!(omit(&json!([1, 2, 3]), &["1"]), json!([1, 3]));
    }

    #[test]
    fn non_objects_are_handled_without_panicking() {
        assert_eq!(pick(&json!(3), &["a"]), json!({}));
        assert_eq!(omit(&json!("s"), &["a"]), json!("s"));
        assert_eq!(get(&json!(null), "a.b"), None);
    }
}
