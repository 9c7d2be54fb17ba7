//! Deterministic structural rendering for diagnostics.
//!
//! Maps render with sorted keys, two-space indentation and trailing commas:
//!
//! ```text
//! Object {
//!   "project": 7,
//!   "user": Object {
//!     "id": 5,
//!   },
//! }
//! ```

use serde_json::{Map, Value};

use crate::diagnostics::render_number;

const INDENT: &str = "  ";

/// Renders any value.
///
/// # Examples
///
/// ```
/// use contract_guard_core::pretty;
/// use serde_json::json;
///
/// assert_eq!(pretty(&json!({"user": 5, "aardvark": 9})), "Object {\n  \"aardvark\": 9,\n  \"user\": 5,\n}");
/// assert_eq!(pretty(&json!([])), "Array []");
/// assert_eq!(pretty(&json!("a\"b")), "\"a\\\"b\"");
/// ```
pub fn pretty(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

/// Renders a record the same way [`pretty`] renders a map value.
pub fn pretty_record(record: &Map<String, Value>) -> String {
    let mut out = String::new();
    write_map(&mut out, record, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Value::Number(number) => out.push_str(&render_number(number)),
        Value::String(text) => write_quoted(out, text),
        Value::Array(items) => write_array(out, items, depth),
        Value::Object(map) => write_map(out, map, depth),
    }
}

fn write_array(out: &mut String, items: &[Value], depth: usize) {
    if items.is_empty() {
        out.push_str("Array []");
        return;
    }

    out.push_str("Array [\n");
    for item in items {
        push_indent(out, depth + 1);
        write_value(out, item, depth + 1);
        out.push_str(",\n");
    }
    push_indent(out, depth);
    out.push(']');
}

fn write_map(out: &mut String, map: &Map<String, Value>, depth: usize) {
    if map.is_empty() {
        out.push_str("Object {}");
        return;
    }

    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    out.push_str("Object {\n");
    for key in keys {
        push_indent(out, depth + 1);
        write_quoted(out, key);
        out.push_str(": ");
        write_value(out, &map[key.as_str()], depth + 1);
        out.push_str(",\n");
    }
    push_indent(out, depth);
    out.push('}');
}

fn write_quoted(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
