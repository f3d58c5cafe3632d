//! Field decoders for scalar destination columns.

use std::{str::FromStr, sync::Arc};

use topic2table_core::{
    ColumnDecoderFactory, ColumnKind, ColumnType, DecoderError, FieldDecoder, Value, text_to_bytes,
};

/// Scalar value produced by a [`ScalarDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Text,
    Bytes,
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bytes => "bytes",
            Self::Bool => "boolean",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::F32 => "float32",
            Self::F64 => "float64",
        }
    }
}

/// Decodes a whole field as one scalar.
///
/// Bytes decoders take payloads as-is and read text through
/// [`text_to_bytes`]. All other kinds read payloads as UTF-8 and parse the
/// trimmed text; text decoders keep it untrimmed.
#[derive(Debug, Clone, Copy)]
pub struct ScalarDecoder {
    kind: ScalarKind,
}

impl ScalarDecoder {
    pub fn new(kind: ScalarKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    fn parse<T>(&self, text: &str, wrap: fn(T) -> Value) -> Result<Value, DecoderError>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        text.trim()
            .parse::<T>()
            .map(wrap)
            .map_err(|e| self.decode_error(e))
    }

    fn decode_error(&self, source: impl std::error::Error + Send + Sync + 'static) -> DecoderError {
        DecoderError::Decode {
            decoder: self.kind.as_str().to_string(),
            source: Box::new(source),
        }
    }
}

impl FieldDecoder for ScalarDecoder {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn decode_bytes(&self, data: &[u8]) -> Result<Value, DecoderError> {
        if self.kind == ScalarKind::Bytes {
            return Ok(Value::bytes(data));
        }
        let text = std::str::from_utf8(data).map_err(|e| self.decode_error(e))?;
        self.decode_text(text)
    }

    fn decode_text(&self, text: &str) -> Result<Value, DecoderError> {
        match self.kind {
            ScalarKind::Text => Ok(Value::string(text)),
            ScalarKind::Bytes => Ok(Value::bytes(text_to_bytes(text)?)),
            ScalarKind::Bool => self.parse(text, Value::Bool),
            ScalarKind::I8 => self.parse(text, Value::I8),
            ScalarKind::I16 => self.parse(text, Value::I16),
            ScalarKind::I32 => self.parse(text, Value::I32),
            ScalarKind::I64 => self.parse(text, Value::I64),
            ScalarKind::F32 => self.parse(text, Value::F32),
            ScalarKind::F64 => self.parse(text, Value::F64),
        }
    }
}

/// Builds [`ScalarDecoder`]s for one scalar column kind.
#[derive(Debug, Clone, Copy)]
pub struct ScalarDecoderFactory {
    column_kind: ColumnKind,
    scalar: ScalarKind,
}

impl ScalarDecoderFactory {
    /// Scalar column kinds that have a decoder, and what they decode to.
    pub const COLUMNS: [(ColumnKind, ScalarKind); 12] = [
        (ColumnKind::Ascii, ScalarKind::Text),
        (ColumnKind::Text, ScalarKind::Text),
        (ColumnKind::Varchar, ScalarKind::Text),
        (ColumnKind::Blob, ScalarKind::Bytes),
        (ColumnKind::Boolean, ScalarKind::Bool),
        (ColumnKind::Tinyint, ScalarKind::I8),
        (ColumnKind::Smallint, ScalarKind::I16),
        (ColumnKind::Int, ScalarKind::I32),
        (ColumnKind::Bigint, ScalarKind::I64),
        (ColumnKind::Counter, ScalarKind::I64),
        (ColumnKind::Float, ScalarKind::F32),
        (ColumnKind::Double, ScalarKind::F64),
    ];

    pub fn new(column_kind: ColumnKind, scalar: ScalarKind) -> Self {
        Self {
            column_kind,
            scalar,
        }
    }
}

impl ColumnDecoderFactory for ScalarDecoderFactory {
    fn column_kind(&self) -> ColumnKind {
        self.column_kind
    }

    fn build_field_decoder(
        &self,
        _column_type: &ColumnType,
    ) -> Result<Arc<dyn FieldDecoder>, DecoderError> {
        Ok(Arc::new(ScalarDecoder::new(self.scalar)))
    }
}
