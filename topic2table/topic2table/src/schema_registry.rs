use std::collections::HashMap;

use crate::error::BoxError;

/// Writer schema registered for a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredSchema {
    pub name: String,
    /// Avro schema definition (JSON text).
    pub definition: String,
}

impl RegisteredSchema {
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
        }
    }
}

/// Lookup of topic writer schemas.
pub trait SchemaRegistry {
    /// Schema registered for `tenant/namespace/topic`, if any.
    fn lookup(
        &self,
        tenant: &str,
        namespace: &str,
        topic: &str,
    ) -> Result<Option<RegisteredSchema>, BoxError>;
}

/// [`SchemaRegistry`] holding schemas in memory, keyed by `tenant/namespace/topic`.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchemaRegistry {
    schemas: HashMap<String, RegisteredSchema>,
}

impl InMemorySchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tenant: &str, namespace: &str, topic: &str, schema: RegisteredSchema) {
        self.schemas
            .insert(schema_path(tenant, namespace, topic), schema);
    }

    pub fn with_schema(
        mut self,
        tenant: &str,
        namespace: &str,
        topic: &str,
        schema: RegisteredSchema,
    ) -> Self {
        self.insert(tenant, namespace, topic, schema);
        self
    }
}

impl SchemaRegistry for InMemorySchemaRegistry {
    fn lookup(
        &self,
        tenant: &str,
        namespace: &str,
        topic: &str,
    ) -> Result<Option<RegisteredSchema>, BoxError> {
        Ok(self
            .schemas
            .get(&schema_path(tenant, namespace, topic))
            .cloned())
    }
}

fn schema_path(tenant: &str, namespace: &str, topic: &str) -> String {
    format!("{tenant}/{namespace}/{topic}")
}
