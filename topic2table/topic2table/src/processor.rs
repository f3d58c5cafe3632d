use topic2table_core::{InboundMessage, NormalizedRecord};

use crate::error::BoxError;

/// Downstream consumer of normalized records (the table writer).
pub trait RecordProcessor {
    type Message: InboundMessage;

    fn process(&mut self, records: Vec<NormalizedRecord<Self::Message>>) -> Result<(), BoxError>;

    /// Release resources. Called once by [`Connector::close`](crate::Connector::close).
    fn close(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
}

/// [`RecordProcessor`] that keeps every record in memory.
#[derive(Debug, Clone)]
pub struct CollectingProcessor<M> {
    records: Vec<NormalizedRecord<M>>,
    closed: bool,
}

impl<M> Default for CollectingProcessor<M> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            closed: false,
        }
    }
}

impl<M> CollectingProcessor<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[NormalizedRecord<M>] {
        &self.records
    }

    pub fn into_records(self) -> Vec<NormalizedRecord<M>> {
        self.records
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<M: InboundMessage> RecordProcessor for CollectingProcessor<M> {
    type Message = M;

    fn process(&mut self, records: Vec<NormalizedRecord<M>>) -> Result<(), BoxError> {
        self.records.extend(records);
        Ok(())
    }

    fn close(&mut self) -> Result<(), BoxError> {
        self.closed = true;
        Ok(())
    }
}
