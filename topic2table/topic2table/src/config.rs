//! Connector configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Topic to table mapping configuration.
///
/// ```json
/// {
///   "tenant": "public",
///   "namespace": "default",
///   "topics": {
///     "sensors": {
///       "tables": [
///         {
///           "keyspace": "ks",
///           "table": "readings",
///           "mapping": { "payload": "value.__self", "id": "key.__self" }
///         }
///       ]
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    #[serde(default = "default_tenant")]
    pub tenant: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Skip schema registry lookups.
    #[serde(default)]
    pub standalone: bool,
    /// Topic name (short or fully qualified) to its table mappings.
    #[serde(default)]
    pub topics: BTreeMap<String, TopicConfig>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            tenant: default_tenant(),
            namespace: default_namespace(),
            standalone: false,
            topics: BTreeMap::new(),
        }
    }
}

impl ConnectorConfig {
    /// Add a table mapping for a topic.
    pub fn with_table(mut self, topic: impl Into<String>, table: TableConfig) -> Self {
        self.topics
            .entry(topic.into())
            .or_default()
            .tables
            .push(table);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicConfig {
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

/// Destination table of a topic and its column mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub keyspace: String,
    pub table: String,
    /// Column name to mapping source descriptor (`value.__self`, `key.__self`,
    /// `header.<name>`, or a sub-field such as `value.name`).
    #[serde(default)]
    pub mapping: BTreeMap<String, String>,
}

impl TableConfig {
    pub fn new(keyspace: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            keyspace: keyspace.into(),
            table: table.into(),
            mapping: BTreeMap::new(),
        }
    }

    pub fn with_mapping(mut self, column: impl Into<String>, source: impl Into<String>) -> Self {
        self.mapping.insert(column.into(), source.into());
        self
    }
}

fn default_tenant() -> String {
    "public".to_string()
}

fn default_namespace() -> String {
    "default".to_string()
}
