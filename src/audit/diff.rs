//! Field-level diffs between two serialized entity states
//!
//! Nested objects and equal-length arrays are walked so a settlement shows
//! up as `participants[2].paid: false -> true` rather than a whole-array change.

use serde_json::Value;

/// Summarise the changes between `before` and `after`, `None` when identical
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = collect_changes(before, after, "");
    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// One `path: old -> new` line per changed leaf
pub fn collect_changes(before: &Value, after: &Value, prefix: &str) -> Vec<String> {
    let mut changes = Vec::new();

    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            for (key, before_val) in before_obj {
                let path = join_path(prefix, key);
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => {
                        changes.extend(collect_changes(before_val, after_val, &path));
                    }
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        path,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!(
                        "{}: (added) -> {}",
                        join_path(prefix, key),
                        format_value(after_val)
                    ));
                }
            }
        }
        (Value::Array(before_arr), Value::Array(after_arr))
            if before_arr.len() == after_arr.len() =>
        {
            for (i, (b, a)) in before_arr.iter().zip(after_arr).enumerate() {
                if b != a {
                    changes.extend(collect_changes(b, a, &format!("{}[{}]", prefix, i)));
                }
            }
        }
        _ => {
            if before != after {
                changes.push(format!(
                    "{}: {} -> {}",
                    prefix,
                    format_value(before),
                    format_value(after)
                ));
            }
        }
    }

    changes
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                format!("\"{}...\"", s.chars().take(47).collect::<String>())
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
