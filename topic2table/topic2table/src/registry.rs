//! Per-topic, per-field-path decoder table.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    sync::Arc,
};

use arc_swap::ArcSwap;
use topic2table_core::{FieldDecoder, FieldPath, short_topic_name};

/// Decoders installed for one topic.
#[derive(Clone, Default)]
pub struct TopicDecoders {
    value: Option<Arc<dyn FieldDecoder>>,
    key: Option<Arc<dyn FieldDecoder>>,
    headers: HashMap<String, Arc<dyn FieldDecoder>>,
}

impl TopicDecoders {
    pub fn get(&self, path: &FieldPath) -> Option<&Arc<dyn FieldDecoder>> {
        match path {
            FieldPath::Value => self.value.as_ref(),
            FieldPath::Key => self.key.as_ref(),
            FieldPath::Header(name) => self.headers.get(name),
        }
    }

    pub fn value(&self) -> Option<&Arc<dyn FieldDecoder>> {
        self.value.as_ref()
    }

    pub fn key(&self) -> Option<&Arc<dyn FieldDecoder>> {
        self.key.as_ref()
    }

    pub fn header(&self, name: &str) -> Option<&Arc<dyn FieldDecoder>> {
        self.headers.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.key.is_none() && self.headers.is_empty()
    }

    /// Install a decoder, returning the one it replaces.
    fn insert(
        &mut self,
        path: FieldPath,
        decoder: Arc<dyn FieldDecoder>,
    ) -> Option<Arc<dyn FieldDecoder>> {
        match path {
            FieldPath::Value => self.value.replace(decoder),
            FieldPath::Key => self.key.replace(decoder),
            FieldPath::Header(name) => self.headers.insert(name, decoder),
        }
    }
}

impl fmt::Debug for TopicDecoders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<_, _> = self
            .headers
            .iter()
            .map(|(name, decoder)| (name.as_str(), decoder.name()))
            .collect();
        f.debug_struct("TopicDecoders")
            .field("value", &self.value.as_ref().map(|d| d.name()))
            .field("key", &self.key.as_ref().map(|d| d.name()))
            .field("headers", &headers)
            .finish()
    }
}

/// Immutable decoder table keyed by short topic name.
///
/// Built once with [`DecoderRegistryBuilder`]; later changes produce a new
/// registry and are published through [`SharedRegistry`].
#[derive(Debug, Clone, Default)]
pub struct DecoderRegistry {
    topics: HashMap<String, TopicDecoders>,
}

/// Builder for [`DecoderRegistry`].
#[derive(Debug, Default)]
pub struct DecoderRegistryBuilder {
    topics: HashMap<String, TopicDecoders>,
}

impl DecoderRegistry {
    pub fn builder() -> DecoderRegistryBuilder {
        DecoderRegistryBuilder::default()
    }

    /// Decoders of a topic, given by short or fully qualified name.
    pub fn topic(&self, topic: &str) -> Option<&TopicDecoders> {
        self.topics.get(short_topic_name(topic))
    }

    /// Decoder installed at `path` of `topic`.
    pub fn decoder(&self, topic: &str, path: &FieldPath) -> Option<&Arc<dyn FieldDecoder>> {
        self.topic(topic).and_then(|decoders| decoders.get(path))
    }

    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.topics.values().all(TopicDecoders::is_empty)
    }

    /// Copy of this registry with the whole-payload decoder of `topic` replaced,
    /// or removed when `decoder` is `None`.
    pub fn with_value_decoder(&self, topic: &str, decoder: Option<Arc<dyn FieldDecoder>>) -> Self {
        let mut next = self.clone();
        let topic = short_topic_name(topic);
        match decoder {
            Some(decoder) => {
                next.topics
                    .entry(topic.to_string())
                    .or_default()
                    .insert(FieldPath::Value, decoder);
            }
            None => {
                if let Some(decoders) = next.topics.get_mut(topic) {
                    decoders.value = None;
                }
            }
        }
        next
    }
}

impl DecoderRegistryBuilder {
    /// Install a decoder at `path` of `topic`, replacing any earlier one.
    pub fn install(
        &mut self,
        topic: &str,
        path: FieldPath,
        decoder: Arc<dyn FieldDecoder>,
    ) -> Option<Arc<dyn FieldDecoder>> {
        self.topics
            .entry(short_topic_name(topic).to_string())
            .or_default()
            .insert(path, decoder)
    }

    pub fn with_decoder(
        mut self,
        topic: &str,
        path: FieldPath,
        decoder: Arc<dyn FieldDecoder>,
    ) -> Self {
        self.install(topic, path, decoder);
        self
    }

    /// Freeze the table.
    pub fn freeze(self) -> DecoderRegistry {
        DecoderRegistry {
            topics: self.topics,
        }
    }
}

/// Atomically swappable [`DecoderRegistry`] snapshot.
///
/// Readers load the current snapshot without locking; updates build a modified
/// copy and swap it in.
#[derive(Debug)]
pub struct SharedRegistry {
    current: ArcSwap<DecoderRegistry>,
}

impl SharedRegistry {
    pub fn new(registry: DecoderRegistry) -> Self {
        Self {
            current: ArcSwap::new(Arc::new(registry)),
        }
    }

    pub fn snapshot(&self) -> Arc<DecoderRegistry> {
        self.current.load_full()
    }

    /// Publish a snapshot whose whole-payload decoder for `topic` is `decoder`,
    /// or that has none when `decoder` is `None`.
    pub fn set_value_decoder(&self, topic: &str, decoder: Option<Arc<dyn FieldDecoder>>) {
        self.current
            .rcu(|current| current.with_value_decoder(topic, decoder.clone()));
    }
}

impl From<DecoderRegistry> for SharedRegistry {
    fn from(registry: DecoderRegistry) -> Self {
        Self::new(registry)
    }
}
