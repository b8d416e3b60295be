use serde_json::Value;
use std::sync::Arc;

/// Resolves a stable id for a row at a given position of the current page.
pub type RowIdFn = Arc<dyn Fn(&Value, usize) -> String + Send + Sync>;

/// `_id`, then `id`, then the positional index.
///
/// Rows without a backend id fall back to their index, so their selection
/// does not survive a page change.
pub fn default_row_id(row: &Value, index: usize) -> String {
    ["_id", "id"]
        .iter()
        .filter_map(|key| row.get(*key))
        .find(|v| !v.is_null())
        .map(value_to_text)
        .unwrap_or_else(|| index.to_string())
}

/// Plain-text rendering of a cell value.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Reads `key` from a row; dotted keys walk nested objects (`brand.name`).
pub fn lookup<'a>(row: &'a Value, key: &str) -> Option<&'a Value> {
    if let Some(v) = row.get(key) {
        return Some(v);
    }
    key.split('.').try_fold(row, |current, part| current.get(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_row_id() {
        assert_eq!(default_row_id(&json!({ "_id": "a" }), 0), "a");
        assert_eq!(default_row_id(&json!({ "id": 5 }), 1), "5");
        assert_eq!(default_row_id(&json!({}), 2), "2");
        assert_eq!(default_row_id(&json!({ "_id": null, "id": "x" }), 3), "x");
    }

    #[test]
    fn test_lookup_nested() {
        let row = json!({ "brand": { "name": "Drools" }, "a.b": 1 });
        assert_eq!(lookup(&row, "brand.name"), Some(&json!("Drools")));
        assert_eq!(lookup(&row, "a.b"), Some(&json!(1)));
        assert_eq!(lookup(&row, "brand.missing"), None);
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&json!(null)), "");
        assert_eq!(value_to_text(&json!("Cat")), "Cat");
        assert_eq!(value_to_text(&json!(12.5)), "12.5");
        assert_eq!(value_to_text(&json!(["a"])), "[\"a\"]");
    }
}
