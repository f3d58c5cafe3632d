use std::sync::Arc;

use topic2table_core::{
    ColumnDecoderFactory, ColumnKind, ColumnType, DecoderError, FieldDecoder, Value,
};

use crate::reader::{JsonReadError, read_json_container};

/// Decodes JSON objects and arrays, for collection and user-defined columns.
#[derive(Debug, Clone, Default)]
pub struct JsonContainerDecoder;

impl JsonContainerDecoder {
    const NAME: &'static str = "json";

    pub fn new() -> Self {
        Self
    }

    fn read(&self, input: &[u8]) -> Result<Value, DecoderError> {
        read_json_container(input).map_err(|e| match e {
            JsonReadError::NotContainer { node } => DecoderError::UnexpectedShape {
                decoder: Self::NAME.to_string(),
                expected: "an object or array",
                found: node.kind_name().to_string(),
            },
            JsonReadError::Normalize(e) => DecoderError::Normalize(e),
            JsonReadError::Parse(e) => DecoderError::Decode {
                decoder: Self::NAME.to_string(),
                source: Box::new(e),
            },
        })
    }
}

impl FieldDecoder for JsonContainerDecoder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn decode_bytes(&self, data: &[u8]) -> Result<Value, DecoderError> {
        self.read(data)
    }

    fn decode_text(&self, text: &str) -> Result<Value, DecoderError> {
        self.read(text.as_bytes())
    }
}

/// Builds [`JsonContainerDecoder`]s for one column kind.
#[derive(Debug, Clone, Copy)]
pub struct JsonContainerDecoderFactory {
    kind: ColumnKind,
}

impl JsonContainerDecoderFactory {
    /// Column kinds whose values arrive as JSON documents.
    pub const KINDS: [ColumnKind; 5] = [
        ColumnKind::List,
        ColumnKind::Set,
        ColumnKind::Map,
        ColumnKind::Tuple,
        ColumnKind::Udt,
    ];

    pub fn new(kind: ColumnKind) -> Self {
        Self { kind }
    }
}

impl ColumnDecoderFactory for JsonContainerDecoderFactory {
    fn column_kind(&self) -> ColumnKind {
        self.kind
    }

    fn build_field_decoder(
        &self,
        _column_type: &ColumnType,
    ) -> Result<Arc<dyn FieldDecoder>, DecoderError> {
        Ok(Arc::new(JsonContainerDecoder::new()))
    }
}
