//! Lenient field readers for editor-authored JSON records.
//!
//! Shape records come from a visual editor and hand-written garment files,
//! so numbers may arrive as strings and optional lists may be absent or a
//! single value. Unreadable fields fall back to defaults instead of failing.

use knitkit_core::units::parse_inches;
use serde_json::{Map, Value};
use tracing::warn;

/// Read a dimension in inches; missing or unreadable values are zero
pub(crate) fn inches(obj: &Map<String, Value>, key: &str) -> f64 {
    match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_inches(s).unwrap_or_else(|err| {
            warn!(field = key, %err, "unreadable dimension, using 0");
            0.0
        }),
        _ => 0.0,
    }
}

/// Read a positive multiplier, or `None` when absent or unusable
pub(crate) fn positive_number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match obj.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Read a list of notes; a lone string becomes a one-element list
pub(crate) fn text_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(text).collect(),
        Some(other) => text(other).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Read an optional label, stringifying non-string scalars
pub(crate) fn label(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(text)
}

pub(crate) fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        _ => false,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
