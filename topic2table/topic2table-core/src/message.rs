//! Inbound message contract and the normalized record handed downstream.

use std::collections::BTreeMap;

use crate::value::Value;

/// Message as delivered by the host messaging runtime.
pub trait InboundMessage {
    /// Topic the message was read from, short or fully qualified.
    fn topic(&self) -> &str;

    /// Raw payload, if any.
    fn payload(&self) -> Option<&[u8]>;

    /// Message key, if any.
    fn key(&self) -> Option<&str>;

    /// Message properties; a property may be present with no value.
    fn properties(&self) -> impl Iterator<Item = (&str, Option<&str>)>;
}

/// Strip the `persistent://tenant/namespace/` prefix from a topic name.
pub fn short_topic_name(topic: &str) -> &str {
    topic.rsplit('/').next().unwrap_or(topic)
}

/// Owned [`InboundMessage`] implementation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub topic: String,
    pub key: Option<String>,
    pub payload: Option<Vec<u8>>,
    pub properties: BTreeMap<String, Option<String>>,
}

impl Message {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        self.properties
            .insert(name.into(), value.map(str::to_string));
        self
    }
}

impl InboundMessage for Message {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn properties(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }
}

/// A decoded message property.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub name: String,
    pub value: Value,
}

impl Header {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Decoded message handed to the downstream record processor.
#[derive(Debug, Clone)]
pub struct NormalizedRecord<M> {
    /// The inbound message handle.
    pub message: M,
    pub headers: Vec<Header>,
    pub key: Option<Value>,
    pub value: Option<Value>,
}

impl<M> NormalizedRecord<M> {
    pub fn header(&self, name: &str) -> Option<&Value> {
        self.headers
            .iter()
            .find(|h| h.name == name)
            .map(|h| &h.value)
    }
}
