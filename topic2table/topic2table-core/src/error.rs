//! Error types for the core layer.

/// Error returned by [`FieldDecoder`](crate::FieldDecoder) implementations.
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    /// Schema data (e.g., an Avro schema definition) could not be parsed.
    #[error("failed to parse schema '{schema_name}': {source}")]
    SchemaParse {
        schema_name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Input bytes or text could not be decoded.
    #[error("{decoder} decoder failed: {source}")]
    Decode {
        decoder: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Input decoded, but into a shape the decoder does not accept.
    #[error("{decoder} decoder expected {expected}, found {found}")]
    UnexpectedShape {
        decoder: String,
        expected: &'static str,
        found: String,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Error returned by the byte⇄text codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Text does not start with the `\u` byte marker.
    #[error("doesn't look like a byte array: {text}")]
    InvalidFormat { text: String },

    /// A unit after the marker is not four hex digits denoting one byte.
    #[error("could not convert unit '{unit}' at position {position} to a byte")]
    Conversion { unit: String, position: usize },
}

/// Schema inference hit a runtime shape outside the type model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error("could not infer schema of ({type_name}) {detail}")]
    Unsupported { type_name: String, detail: String },
}

impl InferenceError {
    pub fn unsupported(type_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
            detail: detail.into(),
        }
    }
}

/// Error produced while normalizing a decoded value into a [`Value`](crate::Value).
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// A binary node carried a payload that could not be decoded.
    #[error("malformed binary node: {source}")]
    Binary {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The top-level value is not a structured record.
    #[error("expected a record at the top level, found {found}")]
    NotARecord { found: String },
}

/// Error returned when a [`Value`](crate::Value) does not match the requested variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("type mismatch: expected {expected}, found {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: &'static str,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: &'static str) -> Self {
        Self {
            expected: expected.into(),
            actual,
        }
    }
}

/// A destination column type name could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid column type '{input}': {detail}")]
pub struct ColumnTypeParseError {
    pub input: String,
    pub detail: String,
}
