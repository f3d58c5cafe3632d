//! Schema inference over JSON trees.

use topic2table_core::{FieldDefs, InferenceError, Schema};

use crate::node::JsonNode;

/// Infer the [`Schema`] of a JSON node.
///
/// Explicit nulls and empty documents infer [`Schema::String`], at the top
/// level as well as nested. Arrays infer their element from the first item
/// only; an empty array is `array<string>`.
pub fn infer_json_schema(node: &JsonNode) -> Result<Schema, InferenceError> {
    let schema = match node {
        JsonNode::Missing | JsonNode::Null => Schema::String,
        JsonNode::Object(members) => Schema::Struct(infer_object_fields(members)?),
        JsonNode::Array(items) => match items.first() {
            None => Schema::array(Schema::String),
            Some(first) => Schema::array(infer_json_schema(first)?),
        },
        JsonNode::Text(_) => Schema::String,
        JsonNode::Short(_) => Schema::I16,
        JsonNode::Int(_) => Schema::I32,
        JsonNode::Long(_) | JsonNode::BigInteger(_) => Schema::I64,
        JsonNode::Float(_) => Schema::F32,
        JsonNode::Double(_) => Schema::F64,
        JsonNode::Bool(_) => Schema::Bool,
        JsonNode::Binary(_) => Schema::Bytes,
    };
    Ok(schema)
}

pub(crate) fn infer_object_fields(
    members: &[(String, JsonNode)],
) -> Result<FieldDefs, InferenceError> {
    let mut fields = FieldDefs::with_capacity(members.len());
    for (name, member) in members {
        fields.push(name.as_str(), infer_json_schema(member)?);
    }
    Ok(fields)
}
