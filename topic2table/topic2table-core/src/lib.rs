//! Encoding-agnostic core types and decoder contracts for `topic2table`.
//!
//! This crate provides the canonical intermediate representations
//! ([`Value`] / [`Schema`]), the byte⇄text codec, the destination column type
//! model and the [`FieldDecoder`] / [`ColumnDecoderFactory`] traits that the
//! encoding crates implement.

mod column_type;
mod decoder;
mod error;
mod field_path;
mod message;
mod schema;
mod text_bytes;
mod value;

pub use column_type::{ColumnKind, ColumnType};
pub use decoder::{ColumnDecoderFactory, FieldDecoder};
pub use error::{
    CodecError, ColumnTypeParseError, DecoderError, InferenceError, NormalizeError, ValueTypeError,
};
pub use field_path::FieldPath;
pub use message::{Header, InboundMessage, Message, NormalizedRecord, short_topic_name};
pub use schema::{FieldDef, FieldDefs, MAP_KEY_SCHEMA, Schema, format_schema};
pub use text_bytes::{BYTE_MARKER, bytes_to_text, text_to_bytes};
pub use value::{StructValue, Value};
