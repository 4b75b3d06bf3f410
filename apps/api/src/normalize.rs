//! Tolerant mapping from extracted `serde_json::Value` trees to typed
//! responses. Missing or mistyped fields get documented defaults — the API
//! prefers returning something usable over rejecting a whole completion.

use serde_json::Value;

/// String field with a default for missing/mistyped values.
pub fn str_or(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

/// String-array field; non-string elements are dropped.
pub fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// String-array field falling back to the given defaults when empty/absent.
pub fn string_list_or(value: &Value, key: &str, defaults: &[&str]) -> Vec<String> {
    let list = string_list(value, key);
    if list.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        list
    }
}

/// Integer-array field; non-integer elements are dropped.
pub fn int_list(value: &Value, key: &str) -> Vec<i64> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default()
}

/// A field that the model may emit as either a string or an array of
/// paragraph strings (joined with blank lines), or anything else (stringified).
pub fn text_or_paragraphs(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Requests carry `methodology` either as a plain string or as a structured
/// object whose `description` field holds the prose. Anything else is
/// stringified so the prompt still receives usable text.
pub fn methodology_description(methodology: &Value) -> String {
    match methodology {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| methodology.to_string()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_str_or_defaults_on_missing_and_mistyped() {
        let v = json!({"title": "Real", "count": 3});
        assert_eq!(str_or(&v, "title", "d"), "Real");
        assert_eq!(str_or(&v, "missing", "d"), "d");
        assert_eq!(str_or(&v, "count", "d"), "d");
    }

    #[test]
    fn test_string_list_drops_non_strings() {
        let v = json!({"cats": ["A", 2, "B", null]});
        assert_eq!(string_list(&v, "cats"), vec!["A", "B"]);
        assert!(string_list(&v, "missing").is_empty());
    }

    #[test]
    fn test_string_list_or_falls_back() {
        let v = json!({"cats": []});
        assert_eq!(string_list_or(&v, "cats", &["General"]), vec!["General"]);
        assert_eq!(string_list_or(&v, "missing", &["General"]), vec!["General"]);
    }

    #[test]
    fn test_text_or_paragraphs_joins_arrays() {
        let v = json!({"content": ["First paragraph.", "Second paragraph."]});
        assert_eq!(
            text_or_paragraphs(&v, "content"),
            "First paragraph.\n\nSecond paragraph."
        );
        let v = json!({"content": "Single block."});
        assert_eq!(text_or_paragraphs(&v, "content"), "Single block.");
    }

    #[test]
    fn test_methodology_description_variants() {
        assert_eq!(
            methodology_description(&json!("Systematic Review")),
            "Systematic Review"
        );
        assert_eq!(
            methodology_description(&json!({"title": "X", "description": "Detailed approach"})),
            "Detailed approach"
        );
        // Object without a description stringifies rather than erroring
        let odd = json!({"title": "X"});
        assert_eq!(methodology_description(&odd), odd.to_string());
    }
}
