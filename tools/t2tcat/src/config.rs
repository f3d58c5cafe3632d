//! Configuration file of the `normalize` command.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use topic2table::{
    ConnectorConfig, InMemorySchemaRegistry, RegisteredSchema, StaticTableMetadata,
    core::ColumnType,
};

/// Connector configuration plus the store and registry contents the connector
/// would otherwise query.
///
/// ```json
/// {
///   "topics": { "sensors": { "tables": [ ... ] } },
///   "columns": { "ks.readings.level": "int", "ks.readings.tags": "list<text>" },
///   "schemas": { "sensors": { "name": "Reading", "definition": { "type": "record", ... } } }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CliConfig {
    #[serde(flatten)]
    pub connector: ConnectorConfig,
    /// `keyspace.table.column` to column type name.
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
    /// Topic to registered Avro schema.
    #[serde(default)]
    pub schemas: BTreeMap<String, SchemaEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SchemaEntry {
    pub name: String,
    /// Avro schema, either inline JSON or a JSON string.
    pub definition: serde_json::Value,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn table_metadata(&self) -> Result<StaticTableMetadata> {
        let mut metadata = StaticTableMetadata::new();
        for (qualified, type_name) in &self.columns {
            let mut parts = qualified.splitn(3, '.');
            let (Some(keyspace), Some(table), Some(column)) =
                (parts.next(), parts.next(), parts.next())
            else {
                bail!("column '{qualified}' is not of the form keyspace.table.column");
            };
            let column_type = type_name
                .parse::<ColumnType>()
                .with_context(|| format!("column '{qualified}'"))?;
            metadata.insert(keyspace, table, column, column_type);
        }
        Ok(metadata)
    }

    pub fn schema_registry(&self) -> InMemorySchemaRegistry {
        let mut registry = InMemorySchemaRegistry::new();
        for (topic, entry) in &self.schemas {
            let definition = match &entry.definition {
                serde_json::Value::String(text) => text.clone(),
                inline => inline.to_string(),
            };
            registry.insert(
                &self.connector.tenant,
                &self.connector.namespace,
                topic,
                RegisteredSchema::new(&entry.name, definition),
            );
        }
        registry
    }
}
