//! Wiring of configuration, store metadata and decoders into a message sink.

use std::sync::Arc;

#[cfg(feature = "avro")]
use topic2table_avro::{AvroDecoder, AvroSchema};
#[cfg(feature = "avro")]
use topic2table_core::FieldDecoder;
use topic2table_core::{FieldPath, NormalizedRecord, short_topic_name};
use tracing::{debug, info};
#[cfg(feature = "avro")]
use tracing::warn;

use crate::{
    assembler::RecordAssembler,
    catalog::DecoderCatalog,
    config::ConnectorConfig,
    error::ConnectorError,
    metadata::TableMetadata,
    processor::RecordProcessor,
    registry::{DecoderRegistry, SharedRegistry},
    schema_registry::SchemaRegistry,
};

/// Build the decoder table for every configured topic.
///
/// Each mapping whose source addresses a whole field (`value.__self`,
/// `key.__self`, `header.<name>`) gets the catalog decoder for its destination
/// column type. Column types without a decoder are skipped; metadata failures
/// and unknown columns abort.
pub fn build_registry(
    config: &ConnectorConfig,
    catalog: &DecoderCatalog,
    metadata: &dyn TableMetadata,
) -> Result<DecoderRegistry, ConnectorError> {
    let mut builder = DecoderRegistry::builder();

    for (topic, topic_config) in &config.topics {
        let topic = short_topic_name(topic);
        info!(topic, "detecting field decoders");

        for table in &topic_config.tables {
            for (column, source) in &table.mapping {
                let Some(path) = FieldPath::from_mapping_source(source) else {
                    continue;
                };

                let column_type = metadata
                    .column_type(&table.keyspace, &table.table, column)
                    .map_err(|source| ConnectorError::Metadata {
                        keyspace: table.keyspace.clone(),
                        table: table.table.clone(),
                        column: column.clone(),
                        source,
                    })?
                    .ok_or_else(|| ConnectorError::UnknownColumn {
                        topic: topic.to_string(),
                        keyspace: table.keyspace.clone(),
                        table: table.table.clone(),
                        column: column.clone(),
                    })?;

                let decoder = catalog.decoder_for(&column_type).map_err(|source| {
                    ConnectorError::DecoderSetup {
                        topic: topic.to_string(),
                        column_type: column_type.clone(),
                        source,
                    }
                })?;

                match decoder {
                    Some(decoder) => {
                        info!(
                            topic,
                            path = %path,
                            column_type = %column_type,
                            decoder = decoder.name(),
                            "chosen field decoder"
                        );
                        builder.install(topic, path, decoder);
                    }
                    None => debug!(
                        topic,
                        path = %path,
                        column_type = %column_type,
                        "no decoder for column type"
                    ),
                }
            }
        }
    }

    Ok(builder.freeze())
}

/// Topic to table sink front end.
///
/// Decodes each written message with a [`RecordAssembler`] over the current
/// registry snapshot and hands emitted records to the processor.
pub struct Connector<P> {
    config: ConnectorConfig,
    registry: SharedRegistry,
    processor: P,
    closed: bool,
}

impl<P: RecordProcessor> Connector<P> {
    /// Build the decoder registry and, unless the configuration is standalone,
    /// override whole-payload decoders with schemas from `schema_registry`.
    pub fn open(
        config: ConnectorConfig,
        catalog: &DecoderCatalog,
        metadata: &dyn TableMetadata,
        schema_registry: Option<&dyn SchemaRegistry>,
        processor: P,
    ) -> Result<Self, ConnectorError> {
        let registry = SharedRegistry::new(build_registry(&config, catalog, metadata)?);
        let connector = Self {
            config,
            registry,
            processor,
            closed: false,
        };

        #[cfg(feature = "avro")]
        if let Some(schema_registry) = schema_registry.filter(|_| !connector.config.standalone) {
            for topic in connector.config.topics.keys() {
                connector.apply_registered_schema(topic, schema_registry);
            }
        }
        #[cfg(not(feature = "avro"))]
        let _ = schema_registry;

        Ok(connector)
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Current registry snapshot.
    pub fn registry(&self) -> Arc<DecoderRegistry> {
        self.registry.snapshot()
    }

    /// Assembler over the current registry snapshot.
    pub fn assembler(&self) -> RecordAssembler {
        RecordAssembler::new(self.registry.snapshot())
    }

    /// Decode one message and forward the record, if any.
    ///
    /// Returns whether a record was emitted.
    pub fn write(&mut self, message: P::Message) -> Result<bool, ConnectorError> {
        self.ensure_open()?;
        match self.assembler().assemble(message) {
            Some(record) => {
                self.forward(vec![record])?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Forward records assembled elsewhere, e.g. on worker threads.
    pub fn submit(
        &mut self,
        records: Vec<NormalizedRecord<P::Message>>,
    ) -> Result<(), ConnectorError> {
        self.ensure_open()?;
        if records.is_empty() {
            return Ok(());
        }
        self.forward(records)
    }

    /// Close the processor. Further writes fail with [`ConnectorError::Closed`].
    pub fn close(&mut self) -> Result<(), ConnectorError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        info!("closing connector");
        self.processor.close().map_err(ConnectorError::Processor)
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn into_processor(self) -> P {
        self.processor
    }

    fn forward(&mut self, records: Vec<NormalizedRecord<P::Message>>) -> Result<(), ConnectorError> {
        self.processor
            .process(records)
            .map_err(ConnectorError::Processor)
    }

    fn ensure_open(&self) -> Result<(), ConnectorError> {
        if self.closed {
            Err(ConnectorError::Closed)
        } else {
            Ok(())
        }
    }
}

#[cfg(feature = "avro")]
impl<P> Connector<P> {
    /// Replace the whole-payload decoder of `topic` with an Avro decoder for
    /// `schema`, or remove it when `schema` is `None`.
    pub fn set_value_schema(&self, topic: &str, schema: Option<AvroSchema>) {
        let topic = short_topic_name(topic);
        let decoder = schema.map(|schema| {
            info!(topic, "chosen value decoder avro");
            Arc::new(AvroDecoder::new(topic, schema)) as Arc<dyn FieldDecoder>
        });
        if decoder.is_none() {
            info!(topic, "value decoder removed");
        }
        self.registry.set_value_decoder(topic, decoder);
    }

    fn apply_registered_schema(&self, topic: &str, schema_registry: &dyn SchemaRegistry) {
        let topic = short_topic_name(topic);
        let registered =
            match schema_registry.lookup(&self.config.tenant, &self.config.namespace, topic) {
                Ok(Some(registered)) => registered,
                Ok(None) => {
                    debug!(topic, "no schema registered");
                    return;
                }
                Err(e) => {
                    warn!(topic, error = %e, "schema registry lookup failed");
                    return;
                }
            };

        match AvroDecoder::from_schema_json(&registered.name, &registered.definition) {
            Ok(decoder) => {
                info!(
                    topic,
                    schema = %registered.name,
                    "chosen value decoder avro from schema registry"
                );
                self.registry
                    .set_value_decoder(topic, Some(Arc::new(decoder)));
            }
            Err(e) => warn!(topic, error = %e, "registered schema ignored"),
        }
    }
}
