//! Error types for the connector.

use topic2table_core::{ColumnType, DecoderError};

/// Boxed error returned by external collaborators (store metadata, schema
/// registry, record processor).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced by [`Connector`](crate::Connector).
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// The store metadata could not be queried for a mapped column.
    #[error("failed to read metadata of column {keyspace}.{table}.{column}: {source}")]
    Metadata {
        keyspace: String,
        table: String,
        column: String,
        #[source]
        source: BoxError,
    },

    /// A table mapping names a column the store does not know.
    #[error("column {keyspace}.{table}.{column} mapped for topic '{topic}' does not exist")]
    UnknownColumn {
        topic: String,
        keyspace: String,
        table: String,
        column: String,
    },

    /// A catalog factory refused to build a decoder for a mapped column.
    #[error("failed to build {column_type} decoder for topic '{topic}': {source}")]
    DecoderSetup {
        topic: String,
        column_type: ColumnType,
        #[source]
        source: DecoderError,
    },

    /// An error returned by the downstream [`RecordProcessor`](crate::RecordProcessor).
    #[error("record processor failed: {0}")]
    Processor(#[source] BoxError),

    /// The connector was used after [`Connector::close`](crate::Connector::close).
    #[error("connector is closed")]
    Closed,
}
