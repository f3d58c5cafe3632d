//! Decoder traits used to register pluggable field decoders.

use std::sync::Arc;

use crate::{
    column_type::{ColumnKind, ColumnType},
    error::DecoderError,
    value::Value,
};

/// Decoder installed at one field path of a topic.
///
/// Payloads arrive as bytes; keys and header values arrive as text. Binary
/// decoders usually read text through [`text_to_bytes`](crate::text_to_bytes)
/// and textual decoders usually read bytes as UTF-8.
pub trait FieldDecoder: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Decode a raw payload into a [`Value`].
    fn decode_bytes(&self, data: &[u8]) -> Result<Value, DecoderError>;

    /// Decode a textual fragment (key or header value) into a [`Value`].
    fn decode_text(&self, text: &str) -> Result<Value, DecoderError>;
}

/// Factory that builds field decoders for destination columns of one kind.
///
/// Implementations are registered in a decoder catalog and dispatched based on
/// [`ColumnKind`].
pub trait ColumnDecoderFactory: Send + Sync {
    /// Returns the column kind this factory handles.
    fn column_kind(&self) -> ColumnKind;

    /// Build a decoder for a column of the given exact type.
    fn build_field_decoder(
        &self,
        column_type: &ColumnType,
    ) -> Result<Arc<dyn FieldDecoder>, DecoderError>;
}
