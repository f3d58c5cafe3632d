//! Payloads that embed their own writer schema.

use apache_avro::Reader;
use topic2table_core::{DecoderError, Value};

use crate::normalize::normalize_avro;

/// Leading bytes of an Avro object container file.
pub const AVRO_CONTAINER_MAGIC: [u8; 4] = [b'O', b'b', b'j', 1];

const DECODER: &str = "avro container";

/// Whether the payload looks like an Avro object container.
pub fn may_contain_avro_schema(payload: &[u8]) -> bool {
    payload.starts_with(&AVRO_CONTAINER_MAGIC)
}

/// Decode the first datum of an Avro object container with its embedded schema.
///
/// Any further datums in the container are ignored.
pub fn read_embedded_avro(payload: &[u8]) -> Result<Value, DecoderError> {
    let decode_error = |e: apache_avro::Error| DecoderError::Decode {
        decoder: DECODER.to_string(),
        source: Box::new(e),
    };

    let mut reader = Reader::new(payload).map_err(decode_error)?;
    let datum = reader
        .next()
        .ok_or_else(|| DecoderError::UnexpectedShape {
            decoder: DECODER.to_string(),
            expected: "at least one datum",
            found: "an empty container".to_string(),
        })?
        .map_err(decode_error)?;
    Ok(normalize_avro(&datum)?)
}
