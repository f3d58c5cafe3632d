use apache_avro::{Schema as AvroSchema, from_avro_datum};
use topic2table_core::{DecoderError, FieldDecoder, Value, text_to_bytes};

use crate::normalize::normalize_avro;

/// Decodes bare Avro datums written with a single known schema.
///
/// Text input is first turned back into bytes with
/// [`text_to_bytes`](topic2table_core::text_to_bytes).
#[derive(Debug, Clone)]
pub struct AvroDecoder {
    schema_name: String,
    schema: AvroSchema,
}

impl AvroDecoder {
    const NAME: &'static str = "avro";

    pub fn new(schema_name: impl Into<String>, schema: AvroSchema) -> Self {
        Self {
            schema_name: schema_name.into(),
            schema,
        }
    }

    /// Parse an Avro schema definition given as JSON text.
    pub fn from_schema_json(
        schema_name: impl Into<String>,
        definition: &str,
    ) -> Result<Self, DecoderError> {
        let schema_name = schema_name.into();
        let schema = AvroSchema::parse_str(definition).map_err(|e| DecoderError::SchemaParse {
            schema_name: schema_name.clone(),
            source: Box::new(e),
        })?;
        Ok(Self::new(schema_name, schema))
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn schema(&self) -> &AvroSchema {
        &self.schema
    }
}

impl FieldDecoder for AvroDecoder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn decode_bytes(&self, data: &[u8]) -> Result<Value, DecoderError> {
        let mut reader = data;
        let datum =
            from_avro_datum(&self.schema, &mut reader, None).map_err(|e| DecoderError::Decode {
                decoder: format!("{} ({})", Self::NAME, self.schema_name),
                source: Box::new(e),
            })?;
        Ok(normalize_avro(&datum)?)
    }

    fn decode_text(&self, text: &str) -> Result<Value, DecoderError> {
        self.decode_bytes(&text_to_bytes(text)?)
    }
}
