//! Output formatting and control utilities.
//!
//! CHANGELOG:
//! - 10/19/2026 - Trimmed to json/compact/fields for list and contact output
//! - 01/10/2026 - Initial implementation (Claude)

use serde::Serialize;
use serde_json::{json, Value};

/// Output control settings from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct OutputControls {
    pub json: bool,
    pub compact: bool,
    pub fields: Option<String>,
}

impl OutputControls {
    /// Emit data according to output controls.
    pub fn emit<T: Serialize>(&self, data: &T) -> String {
        let value = serde_json::to_value(data).unwrap_or(json!(null));

        let filtered = match self.fields {
            Some(ref fields) => filter_fields(&value, fields),
            None => value,
        };

        if self.compact {
            serde_json::to_string(&filtered).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string_pretty(&filtered).unwrap_or_else(|_| "{}".to_string())
        }
    }

    /// Print data to stdout according to output controls.
    pub fn print<T: Serialize>(&self, data: &T) {
        println!("{}", self.emit(data));
    }
}

/// Filter JSON value to only include specified fields.
///
/// Applies to each object of an array, and to the `contacts` array of a
/// wrapper object so `--fields name` works on `show` output too.
fn filter_fields(value: &Value, fields: &str) -> Value {
    let field_list: Vec<&str> = fields.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()).collect();

    match value {
        Value::Array(arr) => Value::Array(arr.iter().map(|v| filter_fields(v, fields)).collect()),
        Value::Object(map) => {
            let mut filtered = serde_json::Map::new();
            for field in &field_list {
                if let Some(v) = map.get(*field) {
                    filtered.insert(field.to_string(), v.clone());
                }
            }
            if filtered.is_empty() {
                if let Some(contacts) = map.get("contacts").filter(|v| v.is_array()) {
                    let mut kept = map.clone();
                    kept.insert("contacts".to_string(), filter_fields(contacts, fields));
                    return Value::Object(kept);
                }
            }
            Value::Object(filtered)
        }
        _ => value.clone(),
    }
}

/// Format error as JSON.
pub fn format_error(error: &str) -> String {
    serde_json::to_string(&json!({
        "error": error,
        "success": false
    }))
    .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_output() {
        let out = OutputControls {
            json: true,
            compact: true,
            fields: None,
        };
        assert_eq!(out.emit(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_field_filter_on_array() {
        let out = OutputControls {
            json: true,
            compact: true,
            fields: Some("name".to_string()),
        };
        let data = json!([{"name": "Ada", "phone": "555"}]);
        assert_eq!(out.emit(&data), r#"[{"name":"Ada"}]"#);
    }

    #[test]
    fn test_field_filter_reaches_contacts() {
        let out = OutputControls {
            json: true,
            compact: true,
            fields: Some("phone".to_string()),
        };
        let data = json!({"list": "bbq", "contacts": [{"name": "Ada", "phone": "555"}]});
        assert_eq!(out.emit(&data), r#"{"contacts":[{"phone":"555"}],"list":"bbq"}"#);
    }

    #[test]
    fn test_format_error() {
        let v: Value = serde_json::from_str(&format_error("boom")).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["error"], "boom");
    }
}
