//! Structured-text fallbacks for payloads, keys and header values.

use topic2table_core::{NormalizeError, Value};

use crate::{node::JsonNode, normalize::normalize_json};

/// Error returned by the JSON readers.
#[derive(Debug, thiserror::Error)]
pub enum JsonReadError {
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed, but to a scalar rather than an object or array.
    /// The parsed node is kept so callers can still use the bare scalar.
    #[error("JSON document is a bare {}, not an object or array", .node.kind_name())]
    NotContainer { node: JsonNode },

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Read a JSON object or array and normalize it.
pub fn read_json_container(input: &[u8]) -> Result<Value, JsonReadError> {
    let node = JsonNode::parse(input)?;
    if !node.is_container() {
        return Err(JsonReadError::NotContainer { node });
    }
    Ok(normalize_json(&node)?)
}

/// Read a JSON document of any shape from text.
///
/// Containers are normalized as in [`read_json_container`]; a document that is
/// a bare scalar (`42`, `true`, `"abc"`, `null`) yields that scalar.
pub fn read_json_value(text: &str) -> Result<Value, JsonReadError> {
    match read_json_container(text.as_bytes()) {
        Err(JsonReadError::NotContainer { node }) => Ok(normalize_json(&node)?),
        other => other,
    }
}
