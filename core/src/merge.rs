//! Scope validation and merging.
//!
//! A scope is a record of identity fields (`user`, `project`, ...) that must
//! stay consistent along a call chain. [`merge_scope`] checks a candidate
//! record against the authoritative scope and, when every overlapping field
//! agrees, overlays the scope onto the candidate.
//!
//! # Example
//!
//! ```
//! use contract_guard_core::*;
//! use serde_json::json;
//!
//! let scope = json!({"user": 1, "project": 2});
//! let actual = json!({"aardvark": {"id": 9}, "user": {"id": 1}});
//!
//! let merged = merge_scope(scope.as_object().unwrap(), actual.as_object().unwrap()).unwrap();
//! assert_eq!(
//!     serde_json::Value::Object(merged),
//!     json!({"aardvark": {"id": 9}, "user": 1, "project": 2})
//! );
//! ```

use serde_json::{Map, Number, Value};

use crate::ValidationFailure;
use crate::diagnostics::{format_scope_violation, raise_aggregated};
use crate::pretty::pretty_record;

/// Field name to value record.
pub type ScopeRecord = Map<String, Value>;

static NULL: Value = Value::Null;

/// Returns the value compared during scope merging.
///
/// Maps compare by their `id` field (`null` when they have none); every
/// other value compares as itself.
///
/// # Examples
///
/// ```
/// use contract_guard_core::comparable_value_of;
/// use serde_json::json;
///
/// assert_eq!(comparable_value_of(&json!({"id": 9, "name": "x"})), &json!(9));
/// assert_eq!(comparable_value_of(&json!(9)), &json!(9));
/// assert_eq!(comparable_value_of(&json!({"name": "x"})), &json!(null));
/// ```
pub fn comparable_value_of(value: &Value) -> &Value {
    match value {
        Value::Object(map) => map.get("id").unwrap_or(&NULL),
        other => other,
    }
}

/// Equality on comparable values. Numbers compare numerically, so `1`
/// equals `1.0`.
fn comparables_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(lhs), Value::Number(rhs)) => numbers_equal(lhs, rhs),
        _ => expected == actual,
    }
}

/// Integers compare exactly; floats only enter when one side is a float.
fn numbers_equal(lhs: &Number, rhs: &Number) -> bool {
    if lhs.is_f64() || rhs.is_f64() {
        return lhs.as_f64() == rhs.as_f64();
    }
    match (lhs.as_i64(), rhs.as_i64()) {
        (Some(lhs), Some(rhs)) => lhs == rhs,
        (None, None) => lhs.as_u64() == rhs.as_u64(),
        // only one side exceeds i64::MAX
        _ => false,
    }
}

/// Validates `actual` against `expected` and merges them.
///
/// Keys of `expected` that are absent from `actual` are compatible; keys only
/// in `actual` pass through. The merged record keeps `actual`'s key order,
/// appends keys found only in `expected`, and holds `expected`'s raw value
/// for every key of `expected`.
///
/// # Errors
///
/// Returns one message per mismatching key, in `expected` key order. Each
/// message embeds the pretty-printed `actual` record.
pub fn merge_scope(
    expected: &ScopeRecord,
    actual: &ScopeRecord,
) -> Result<ScopeRecord, ValidationFailure> {
    let mut rendered: Option<String> = None;
    let mut messages = Vec::new();

    for (key, expected_value) in expected {
        let Some(actual_value) = actual.get(key) else {
            continue;
        };

        let expected_cmp = comparable_value_of(expected_value);
        let actual_cmp = comparable_value_of(actual_value);
        if !comparables_equal(expected_cmp, actual_cmp) {
            let rendered = rendered.get_or_insert_with(|| pretty_record(actual));
            messages.push(format_scope_violation(
                rendered,
                key,
                expected_cmp,
                actual_cmp,
            ));
        }
    }

    raise_aggregated(messages)?;

    let mut merged = actual.clone();
    for (key, value) in expected {
        merged.insert(key.clone(), value.clone());
    }
    Ok(merged)
}
