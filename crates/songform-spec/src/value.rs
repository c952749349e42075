//! Form value maps.

use std::collections::BTreeMap;

use serde_json::Value;

/// Current form input, keyed by parameter id.
///
/// Owned by the caller; resolvers only ever borrow it.
pub type ValueMap = BTreeMap<String, Value>;

/// Returns true for values a user would consider "nothing entered":
/// null, an empty or whitespace-only string, or an empty list.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Truthiness as the web form treats it: null, false, zero and the empty
/// string are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
