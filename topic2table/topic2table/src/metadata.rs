use std::collections::HashMap;

use topic2table_core::ColumnType;

use crate::error::BoxError;

/// Store metadata: exact destination column types.
pub trait TableMetadata {
    /// Type of `keyspace.table.column`, or `None` if the column does not exist.
    fn column_type(
        &self,
        keyspace: &str,
        table: &str,
        column: &str,
    ) -> Result<Option<ColumnType>, BoxError>;
}

/// [`TableMetadata`] backed by a fixed set of column types.
#[derive(Debug, Clone, Default)]
pub struct StaticTableMetadata {
    columns: HashMap<(String, String, String), ColumnType>,
}

impl StaticTableMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        keyspace: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
        column_type: ColumnType,
    ) {
        self.columns
            .insert((keyspace.into(), table.into(), column.into()), column_type);
    }

    pub fn with_column(
        mut self,
        keyspace: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
        column_type: ColumnType,
    ) -> Self {
        self.insert(keyspace, table, column, column_type);
        self
    }
}

impl TableMetadata for StaticTableMetadata {
    fn column_type(
        &self,
        keyspace: &str,
        table: &str,
        column: &str,
    ) -> Result<Option<ColumnType>, BoxError> {
        let key = (keyspace.to_string(), table.to_string(), column.to_string());
        Ok(self.columns.get(&key).cloned())
    }
}
