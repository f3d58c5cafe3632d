#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use topic2table::{
    BoxError, ConnectorConfig, DecoderCatalog, StaticTableMetadata, TableConfig, TableMetadata,
    core::{ColumnType, DecoderError, FieldDecoder, Value},
};

pub const SENSOR_SCHEMA: &str = r#"
{
  "type": "record",
  "name": "Reading",
  "fields": [
    {"name": "sensor", "type": "string"},
    {"name": "level", "type": "long"}
  ]
}
"#;

pub fn default_catalog() -> DecoderCatalog {
    DecoderCatalog::builder().with_default_factories().build()
}

pub fn column(name: &str) -> ColumnType {
    name.parse().unwrap()
}

/// `sensors` topic mapped to `ks.readings`.
pub fn sensors_config() -> ConnectorConfig {
    ConnectorConfig::default().with_table(
        "persistent://public/default/sensors",
        TableConfig::new("ks", "readings")
            .with_mapping("level", "value.__self")
            .with_mapping("id", "key.__self")
            .with_mapping("origin", "header.origin")
            .with_mapping("sensor", "value.sensor"),
    )
}

pub fn sensors_metadata() -> StaticTableMetadata {
    StaticTableMetadata::new()
        .with_column("ks", "readings", "level", column("int"))
        .with_column("ks", "readings", "id", column("text"))
        .with_column("ks", "readings", "origin", column("blob"))
}

/// Metadata whose store is unreachable.
pub struct UnreachableMetadata;

impl TableMetadata for UnreachableMetadata {
    fn column_type(
        &self,
        _keyspace: &str,
        _table: &str,
        _column: &str,
    ) -> Result<Option<ColumnType>, BoxError> {
        Err("store unreachable".into())
    }
}

/// Decoder that counts calls and always yields the same value.
#[derive(Default)]
pub struct CountingDecoder {
    pub calls: AtomicUsize,
}

impl CountingDecoder {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FieldDecoder for CountingDecoder {
    fn name(&self) -> &str {
        "counting"
    }

    fn decode_bytes(&self, _data: &[u8]) -> Result<Value, DecoderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::string("counted"))
    }

    fn decode_text(&self, _text: &str) -> Result<Value, DecoderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::string("counted"))
    }
}
