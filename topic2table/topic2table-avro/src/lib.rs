//! Avro [`FieldDecoder`](topic2table_core::FieldDecoder) implementation for the
//! topic2table pipeline.
//!
//! This crate provides [`AvroDecoder`], which decodes raw Avro datums written
//! with a known schema, and [`read_embedded_avro`] for object container payloads
//! that carry their writer schema. Both converge on [`normalize_avro`], which is
//! also exported for direct use alongside [`infer_avro_schema`].

mod container;
mod decoder;
mod normalize;

pub use apache_avro::Schema as AvroSchema;
pub use apache_avro::types::Value as AvroValue;
pub use container::{AVRO_CONTAINER_MAGIC, may_contain_avro_schema, read_embedded_avro};
pub use decoder::AvroDecoder;
pub use normalize::{infer_avro_schema, normalize_avro, normalize_avro_record};
