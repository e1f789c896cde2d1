//! Change summaries for audit entries

use serde_json::Value;

/// Describe the top-level fields that differ between two JSON values
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )),
        _ => None,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields() {
        let before = json!({"Concepto": "Luz", "Cantidad": 60, "Pagado": false});
        let after = json!({"Concepto": "Luz", "Cantidad": 65, "Pagado": true});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("Cantidad: 60 -> 65"));
        assert!(diff.contains("Pagado: false -> true"));
        assert!(!diff.contains("Concepto"));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"Concepto": "Luz"});
        assert_eq!(generate_diff(&value, &value), None);
    }

    #[test]
    fn test_plain_values() {
        assert_eq!(
            generate_diff(&json!("Deporte"), &json!("Gimnasio")),
            Some("\"Deporte\" -> \"Gimnasio\"".to_string())
        );
    }

    #[test]
    fn test_long_strings_truncated_on_char_boundary() {
        let long = "á".repeat(60);
        let diff = generate_diff(&json!({"Concepto": long}), &json!({"Concepto": "x"})).unwrap();
        assert!(diff.contains("...\""));
    }
}
