//! Column-kind keyed catalog of decoder factories.

use std::{collections::HashMap, fmt, sync::Arc};

use topic2table_core::{ColumnDecoderFactory, ColumnKind, ColumnType, DecoderError, FieldDecoder};
use topic2table_json::JsonContainerDecoderFactory;

use crate::decoders::ScalarDecoderFactory;

/// Maps destination column kinds to the factories that build their decoders.
#[derive(Clone, Default)]
pub struct DecoderCatalog {
    factories: HashMap<ColumnKind, Arc<dyn ColumnDecoderFactory>>,
}

/// Builder for configuring [`DecoderCatalog`].
#[derive(Default)]
pub struct DecoderCatalogBuilder {
    factories: Vec<Arc<dyn ColumnDecoderFactory>>,
}

impl DecoderCatalog {
    pub fn builder() -> DecoderCatalogBuilder {
        DecoderCatalogBuilder::default()
    }

    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any factory for the same column kind.
    pub fn register_factory(&mut self, factory: Box<dyn ColumnDecoderFactory>) {
        self.register_shared_factory(Arc::from(factory));
    }

    pub fn register_shared_factory(&mut self, factory: Arc<dyn ColumnDecoderFactory>) {
        self.factories.insert(factory.column_kind(), factory);
    }

    pub fn contains(&self, kind: ColumnKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Build the decoder for a column of the given type.
    ///
    /// Returns `Ok(None)` when no factory handles the column kind.
    pub fn decoder_for(
        &self,
        column_type: &ColumnType,
    ) -> Result<Option<Arc<dyn FieldDecoder>>, DecoderError> {
        self.factories
            .get(&column_type.kind())
            .map(|factory| factory.build_field_decoder(column_type))
            .transpose()
    }
}

impl fmt::Debug for DecoderCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.factories.keys().collect();
        kinds.sort();
        f.debug_struct("DecoderCatalog")
            .field("kinds", &kinds)
            .finish()
    }
}

impl DecoderCatalogBuilder {
    pub fn with_factory(mut self, factory: Box<dyn ColumnDecoderFactory>) -> Self {
        self.factories.push(Arc::from(factory));
        self
    }

    /// Register the built-in scalar and JSON container factories.
    pub fn with_default_factories(self) -> Self {
        let s = ScalarDecoderFactory::COLUMNS
            .into_iter()
            .fold(self, |s, (column, scalar)| {
                s.with_factory(Box::new(ScalarDecoderFactory::new(column, scalar)))
            });
        JsonContainerDecoderFactory::KINDS
            .into_iter()
            .fold(s, |s, kind| {
                s.with_factory(Box::new(JsonContainerDecoderFactory::new(kind)))
            })
    }

    pub fn build(self) -> DecoderCatalog {
        let mut catalog = DecoderCatalog::new();
        for factory in self.factories {
            catalog.register_shared_factory(factory);
        }
        catalog
    }
}
