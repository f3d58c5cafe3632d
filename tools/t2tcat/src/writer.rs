use std::{
    fs,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Result;
use serde_json::{Map, Value as JsonValue, json};
use topic2table::{
    BoxError, NormalizedRecord, RecordProcessor,
    core::{InboundMessage, Message, Value},
    json::value_to_json,
};

use crate::format::OutputFormat;

pub trait RecordWriter {
    fn write_record(&mut self, record: &NormalizedRecord<Message>) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(fs::File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

pub fn create_writer(format: OutputFormat, output: Option<&Path>) -> Result<Box<dyn RecordWriter>> {
    let dest = open_output(output)?;
    Ok(match format {
        OutputFormat::Jsonl => Box::new(JsonlWriter { dest }),
        OutputFormat::Text => Box::new(TextWriter { dest }),
    })
}

// --- JSON Lines ---

pub struct JsonlWriter {
    dest: Box<dyn Write>,
}

impl RecordWriter for JsonlWriter {
    fn write_record(&mut self, record: &NormalizedRecord<Message>) -> Result<()> {
        let headers: Map<String, JsonValue> = record
            .headers
            .iter()
            .map(|header| (header.name.clone(), value_to_json(&header.value)))
            .collect();
        let line = json!({
            "topic": record.message.topic(),
            "key": record.key.as_ref().map(value_to_json),
            "value": record.value.as_ref().map(value_to_json),
            "headers": headers,
        });
        serde_json::to_writer(&mut self.dest, &line)?;
        self.dest.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.dest.flush()?;
        Ok(())
    }
}

// --- Text ---

pub struct TextWriter {
    dest: Box<dyn Write>,
}

impl RecordWriter for TextWriter {
    fn write_record(&mut self, record: &NormalizedRecord<Message>) -> Result<()> {
        let show = |value: &Option<Value>| {
            value
                .as_ref()
                .map_or_else(|| "-".to_string(), Value::to_string)
        };
        writeln!(
            self.dest,
            "[{}] key={} value={}",
            record.message.topic(),
            show(&record.key),
            show(&record.value)
        )?;
        for header in &record.headers {
            writeln!(self.dest, "    {}: {}", header.name, header.value)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.dest.flush()?;
        Ok(())
    }
}

/// Connector processor that prints every record.
pub struct WriterProcessor {
    writer: Box<dyn RecordWriter>,
    written: u64,
}

impl WriterProcessor {
    pub fn new(writer: Box<dyn RecordWriter>) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

impl RecordProcessor for WriterProcessor {
    type Message = Message;

    fn process(&mut self, records: Vec<NormalizedRecord<Message>>) -> Result<(), BoxError> {
        for record in &records {
            self.writer.write_record(record)?;
            self.written += 1;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), BoxError> {
        Ok(self.writer.finish()?)
    }
}
