//! JSON tree that remembers how each number was read.

use serde_json::Value as JsonValue;

/// A JSON document node.
///
/// Numbers carry the kind they were written as rather than only their
/// magnitude. Literals with a fraction or exponent are [`JsonNode::Double`].
/// Integer literals that fit 32 bits are [`JsonNode::Int`], other 64-bit ones
/// are [`JsonNode::Long`], and anything wider is a [`JsonNode::BigInteger`]
/// holding its decimal digits.
/// [`JsonNode::Short`], [`JsonNode::Float`] and [`JsonNode::Binary`] never come
/// out of the text parser but may appear in programmatically built trees.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNode {
    /// An empty document.
    Missing,
    Null,
    Bool(bool),
    Short(i16),
    Int(i32),
    Long(i64),
    BigInteger(String),
    Float(f32),
    Double(f64),
    Text(String),
    /// Base64 encoded binary payload.
    Binary(String),
    Array(Vec<JsonNode>),
    Object(Vec<(String, JsonNode)>),
}

impl JsonNode {
    /// Parse a JSON document. Whitespace-only input yields [`JsonNode::Missing`].
    pub fn parse(input: &[u8]) -> Result<Self, serde_json::Error> {
        if input.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::Missing);
        }
        serde_json::from_slice::<JsonValue>(input).map(Self::from)
    }

    pub fn is_container(&self) -> bool {
        matches!(self, JsonNode::Array(_) | JsonNode::Object(_))
    }

    /// Member of an object node.
    pub fn get(&self, key: &str) -> Option<&JsonNode> {
        match self {
            JsonNode::Object(members) => members.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            JsonNode::Missing => "missing",
            JsonNode::Null => "null",
            JsonNode::Bool(_) => "boolean",
            JsonNode::Short(_) => "short",
            JsonNode::Int(_) => "int",
            JsonNode::Long(_) => "long",
            JsonNode::BigInteger(_) => "big-integer",
            JsonNode::Float(_) => "float",
            JsonNode::Double(_) => "double",
            JsonNode::Text(_) => "textual",
            JsonNode::Binary(_) => "binary",
            JsonNode::Array(_) => "array",
            JsonNode::Object(_) => "object",
        }
    }
}

impl From<JsonValue> for JsonNode {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => JsonNode::Null,
            JsonValue::Bool(b) => JsonNode::Bool(b),
            JsonValue::Number(n) => {
                if is_fraction_literal(n.as_str()) {
                    n.as_f64().map_or(JsonNode::Null, JsonNode::Double)
                } else if let Some(i) = n.as_i64() {
                    i32::try_from(i).map_or(JsonNode::Long(i), JsonNode::Int)
                } else {
                    JsonNode::BigInteger(n.as_str().to_string())
                }
            }
            JsonValue::String(s) => JsonNode::Text(s),
            JsonValue::Array(items) => JsonNode::Array(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(members) => JsonNode::Object(
                members
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

fn is_fraction_literal(literal: &str) -> bool {
    literal.contains(['.', 'e', 'E'])
}
