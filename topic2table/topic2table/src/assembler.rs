//! Per-message decoding of payload, key and headers.

use std::sync::Arc;

use topic2table_core::{
    FieldDecoder, FieldPath, Header, InboundMessage, NormalizedRecord, Value, short_topic_name,
};
#[cfg(feature = "avro")]
use topic2table_avro::{may_contain_avro_schema, read_embedded_avro};
use topic2table_json::{read_json_container, read_json_value};
use tracing::{debug, warn};

use crate::registry::DecoderRegistry;

/// Step of the decoding chain that produced a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStrategy {
    /// The decoder installed for the field path.
    Registered,
    /// The Avro schema embedded in the payload.
    EmbeddedSchema,
    /// Generic JSON.
    Json,
    /// The input kept as text.
    RawText,
}

/// Decodes messages against one registry snapshot.
///
/// Decoding never fails: each field walks the chain registered decoder,
/// embedded schema (payloads only), JSON, raw text, and the first step that
/// succeeds wins.
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    registry: Arc<DecoderRegistry>,
}

impl RecordAssembler {
    pub fn new(registry: Arc<DecoderRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    /// Decode a message, or return `None` when it carries nothing: no value, no
    /// key (or both null) and no headers.
    ///
    /// An empty payload is still a value and goes through the decoding chain.
    pub fn assemble<M: InboundMessage>(&self, message: M) -> Option<NormalizedRecord<M>> {
        let topic = message.topic();

        let value = message
            .payload()
            .map(|payload| self.read_payload(topic, payload).0);
        let key = message
            .key()
            .map(|key| self.read_text(topic, &FieldPath::Key, key).0);
        let headers: Vec<Header> = message
            .properties()
            .map(|(name, text)| {
                let value = match text {
                    Some(text) => {
                        self.read_text(topic, &FieldPath::Header(name.to_string()), text)
                            .0
                    }
                    None => Value::Null,
                };
                Header::new(name, value)
            })
            .collect();

        let carries_nothing = |v: &Option<Value>| v.as_ref().is_none_or(Value::is_null);
        if carries_nothing(&value) && carries_nothing(&key) && headers.is_empty() {
            debug!(topic = short_topic_name(topic), "message carries no data, skipped");
            return None;
        }

        Some(NormalizedRecord {
            message,
            headers,
            key,
            value,
        })
    }

    /// Decode a raw payload of `topic`.
    pub fn read_payload(&self, topic: &str, payload: &[u8]) -> (Value, ReadStrategy) {
        if let Some(decoder) = self.registry.decoder(topic, &FieldPath::Value) {
            match decoder.decode_bytes(payload) {
                Ok(value) => return (value, ReadStrategy::Registered),
                Err(e) => report_registered_failure(topic, &FieldPath::Value, decoder, &e),
            }
        }

        #[cfg(feature = "avro")]
        if may_contain_avro_schema(payload) {
            match read_embedded_avro(payload) {
                Ok(value) => return (value, ReadStrategy::EmbeddedSchema),
                Err(e) => debug!(topic, error = %e, "embedded avro schema read failed"),
            }
        }

        match read_json_container(payload) {
            Ok(value) => (value, ReadStrategy::Json),
            Err(e) => {
                debug!(topic, error = %e, "payload is not json, kept as text");
                (
                    Value::string(String::from_utf8_lossy(payload)),
                    ReadStrategy::RawText,
                )
            }
        }
    }

    /// Decode the key or a header value of `topic`.
    pub fn read_text(&self, topic: &str, path: &FieldPath, text: &str) -> (Value, ReadStrategy) {
        if let Some(decoder) = self.registry.decoder(topic, path) {
            match decoder.decode_text(text) {
                Ok(value) => return (value, ReadStrategy::Registered),
                Err(e) => report_registered_failure(topic, path, decoder, &e),
            }
        }

        match read_json_value(text) {
            Ok(value) => (value, ReadStrategy::Json),
            Err(e) => {
                debug!(topic, path = %path, error = %e, "not json, kept as text");
                (Value::string(text), ReadStrategy::RawText)
            }
        }
    }
}

fn report_registered_failure(
    topic: &str,
    path: &FieldPath,
    decoder: &Arc<dyn FieldDecoder>,
    error: &dyn std::error::Error,
) {
    warn!(
        topic,
        path = %path,
        decoder = decoder.name(),
        error = %error,
        "registered decoder failed, falling back"
    );
}
