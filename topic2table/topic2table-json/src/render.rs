//! Render normalized values as JSON.

use serde_json::{Map, Number, Value as JsonValue};
use topic2table_core::{Value, bytes_to_text};

/// Convert a [`Value`] to JSON.
///
/// Bytes are written in the `\u%04x` text form, since JSON has no binary type.
/// Non-finite floats become `null`.
pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I8(v) => JsonValue::from(*v),
        Value::I16(v) => JsonValue::from(*v),
        Value::I32(v) => JsonValue::from(*v),
        Value::I64(v) => JsonValue::from(*v),
        Value::F32(v) => float_to_json(f64::from(*v)),
        Value::F64(v) => float_to_json(*v),
        Value::String(s) => JsonValue::String(s.to_string()),
        Value::Bytes(b) => JsonValue::String(bytes_to_text(b)),
        Value::Struct(s) => JsonValue::Object(
            s.iter()
                .map(|(name, v)| (name.to_string(), value_to_json(v)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
        Value::Map(entries) => JsonValue::Object(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), value_to_json(v)))
                .collect::<Map<_, _>>(),
        ),
    }
}

fn float_to_json(v: f64) -> JsonValue {
    Number::from_f64(v).map_or(JsonValue::Null, JsonValue::Number)
}
