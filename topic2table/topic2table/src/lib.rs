//! Topic to table normalization engine.
//!
//! Routes each inbound message field to a decoder chosen from the destination
//! column type, falls back through embedded schemas, JSON and raw text, and
//! emits at most one [`NormalizedRecord`] per message.
//!
//! ```no_run
//! use topic2table::{
//!     CollectingProcessor, Connector, ConnectorConfig, DecoderCatalog, StaticTableMetadata,
//!     core::Message,
//! };
//!
//! let catalog = DecoderCatalog::builder().with_default_factories().build();
//! let mut connector = Connector::open(
//!     ConnectorConfig::default(),
//!     &catalog,
//!     &StaticTableMetadata::new(),
//!     None,
//!     CollectingProcessor::<Message>::new(),
//! )
//! .unwrap();
//! connector
//!     .write(Message::new("sensors").with_payload(br#"{"id": 1}"#.to_vec()))
//!     .unwrap();
//! ```

mod assembler;
mod catalog;
mod config;
mod connector;
mod decoders;
mod error;
mod metadata;
mod processor;
mod registry;
mod schema_registry;

pub use assembler::{ReadStrategy, RecordAssembler};
pub use catalog::{DecoderCatalog, DecoderCatalogBuilder};
pub use config::{ConnectorConfig, TableConfig, TopicConfig};
pub use connector::{Connector, build_registry};
pub use decoders::{ScalarDecoder, ScalarDecoderFactory, ScalarKind};
pub use error::{BoxError, ConnectorError};
pub use metadata::{StaticTableMetadata, TableMetadata};
pub use processor::{CollectingProcessor, RecordProcessor};
pub use registry::{DecoderRegistry, DecoderRegistryBuilder, SharedRegistry, TopicDecoders};
pub use schema_registry::{InMemorySchemaRegistry, RegisteredSchema, SchemaRegistry};
#[cfg(feature = "avro")]
pub use topic2table_avro as avro;
pub use topic2table_core as core;
pub use topic2table_core::NormalizedRecord;
pub use topic2table_json as json;
