//! Violation messages and the aggregated validation error.
//!
//! Both the argument validator and the scope merger collect every violation
//! for one operation before failing. [`raise_aggregated`] turns the collected
//! messages into a single [`ValidationFailure`], or `Ok(())` when there are
//! none.

use serde_json::{Number, Value};
use thiserror::Error;

use crate::TypeSpec;

/// Aggregated validation error.
///
/// Carries one message per failing check, in the order the checks ran. The
/// `Display` form joins the messages with newlines.
///
/// # Examples
///
/// ```
/// use contract_guard_core::ValidationFailure;
///
/// let failure = ValidationFailure::from_messages(["first", "second"]);
/// assert_eq!(failure.messages(), ["first", "second"]);
/// assert_eq!(failure.to_string(), "first\nsecond");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join("\n"))]
pub struct ValidationFailure {
    messages: Vec<String>,
}

impl ValidationFailure {
    pub fn from_messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the violation messages in order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Fails with every collected message at once, or succeeds when there are none.
pub fn raise_aggregated(messages: Vec<String>) -> Result<(), ValidationFailure> {
    if messages.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure { messages })
    }
}

/// Renders a value literally: `null`, `true`, `1`, raw string text, and
/// compact JSON for maps and arrays. Floats with no fractional part render
/// without one (`5.0` as `5`).
///
/// # Examples
///
/// ```
/// use contract_guard_core::render_literal;
/// use serde_json::json;
///
/// assert_eq!(render_literal(&json!(null)), "null");
/// assert_eq!(render_literal(&json!(1)), "1");
/// assert_eq!(render_literal(&json!(5.0)), "5");
/// assert_eq!(render_literal(&json!("FOO")), "FOO");
/// assert_eq!(render_literal(&json!({"id": 9})), r#"{"id":9}"#);
/// ```
pub fn render_literal(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => render_number(number),
        other => other.to_string(),
    }
}

pub(crate) fn render_number(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() => float.to_string(),
        _ => number.to_string(),
    }
}

/// Message for an argument whose value matches none of its declared types.
pub fn format_arg_violation(
    display_name: &str,
    arg_name: &str,
    types: &TypeSpec,
    actual: &Value,
) -> String {
    format!(
        "Function {display_name}, Requires {arg_name} as one of {types}, but got {}",
        render_literal(actual)
    )
}

/// Message for a call step that supplies more arguments than remain.
pub fn format_excess_arguments(display_name: &str, remaining: usize, supplied: usize) -> String {
    format!("Function {display_name}, Requires at most {remaining} arguments, but got {supplied}")
}

/// Message for a scope field whose comparable values disagree.
///
/// `rendered_actual` is the pretty-printed candidate record, repeated on every
/// line so each message stands alone.
pub fn format_scope_violation(
    rendered_actual: &str,
    field: &str,
    expected: &Value,
    actual: &Value,
) -> String {
    format!(
        "{rendered_actual}, Requires {field} to equal {}, but got {}",
        render_literal(expected),
        render_literal(actual)
    )
}
