//! Convert a [`JsonNode`] tree into the canonical [`Value`].

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use topic2table_core::{NormalizeError, StructValue, Value};

use crate::{infer::infer_object_fields, node::JsonNode};

/// Text that stands for an explicit null wherever it appears.
const NULL_TEXT: &str = "null";

/// Normalize a JSON node of any shape.
///
/// Objects become [`Value::Struct`] with the schema inferred from the same
/// object; the text `"null"` becomes [`Value::Null`]. Big integers saturate at
/// the `int64` bounds.
pub fn normalize_json(node: &JsonNode) -> Result<Value, NormalizeError> {
    let value = match node {
        JsonNode::Missing | JsonNode::Null => Value::Null,
        JsonNode::Text(s) if s == NULL_TEXT => Value::Null,
        JsonNode::Text(s) => Value::string(s),
        JsonNode::Binary(encoded) => BASE64
            .decode(encoded)
            .map(Value::bytes)
            .map_err(|e| NormalizeError::Binary {
                source: Box::new(e),
            })?,
        JsonNode::Bool(b) => Value::Bool(*b),
        JsonNode::Short(v) => Value::I16(*v),
        JsonNode::Int(v) => Value::I32(*v),
        JsonNode::Long(v) => Value::I64(*v),
        JsonNode::BigInteger(digits) => Value::I64(saturate_i64(digits)),
        JsonNode::Float(v) => Value::F32(*v),
        JsonNode::Double(v) => Value::F64(*v),
        JsonNode::Array(items) => Value::Array(
            items
                .iter()
                .map(normalize_json)
                .collect::<Result<_, _>>()?,
        ),
        JsonNode::Object(members) => Value::Struct(normalize_object(members)?),
    };
    Ok(value)
}

/// Normalize a top-level JSON object into a struct.
pub fn normalize_json_record(node: &JsonNode) -> Result<StructValue, NormalizeError> {
    match node {
        JsonNode::Object(members) => normalize_object(members),
        other => Err(NormalizeError::NotARecord {
            found: format!("json {}", other.kind_name()),
        }),
    }
}

/// Integers wider than 64 bits clamp to the nearest `int64` bound.
fn saturate_i64(digits: &str) -> i64 {
    digits.parse().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn normalize_object(members: &[(String, JsonNode)]) -> Result<StructValue, NormalizeError> {
    let schema = infer_object_fields(members)?;
    StructValue::from_schema(schema, |name, _| {
        members
            .iter()
            .find(|(k, _)| k == name)
            .map_or(Ok(Value::Null), |(_, member)| normalize_json(member))
    })
}
