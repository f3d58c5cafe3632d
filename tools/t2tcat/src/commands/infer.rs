use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use topic2table::{
    avro::{may_contain_avro_schema, read_embedded_avro},
    core::{Schema, format_schema},
    json::{JsonNode, infer_json_schema},
};

use crate::format::SchemaStyle;

#[derive(Args)]
pub struct InferArgs {
    /// Path to a JSON document or an Avro object container
    input: PathBuf,

    /// Schema rendering
    #[arg(short, long, value_enum, default_value_t = SchemaStyle::Tree)]
    style: SchemaStyle,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl InferArgs {
    pub fn run(self) -> Result<()> {
        let data = fs::read(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let schema = infer_schema(&data)?;

        let text = match self.style {
            SchemaStyle::Tree => format_schema(&schema)?,
            SchemaStyle::Compact => schema.to_string(),
        };

        match self.output {
            Some(path) => fs::write(path, format!("{text}\n"))?,
            None => println!("{text}"),
        }
        Ok(())
    }
}

fn infer_schema(data: &[u8]) -> Result<Schema> {
    if may_contain_avro_schema(data) {
        return Ok(read_embedded_avro(data)?.schema());
    }
    let node = JsonNode::parse(data).context("input is neither an Avro container nor JSON")?;
    Ok(infer_json_schema(&node)?)
}
