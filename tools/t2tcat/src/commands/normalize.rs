use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use memmap2::Mmap;
use rayon::prelude::*;
use topic2table::{Connector, DecoderCatalog, core::Message};
use tracing::info;

use crate::{
    config::CliConfig,
    format::OutputFormat,
    input::parse_messages,
    writer::{WriterProcessor, create_writer},
};

/// Messages assembled per parallel batch.
const CHUNK_SIZE: usize = 1024;

#[derive(Args)]
pub struct NormalizeArgs {
    /// Path to the recorded messages (JSON lines)
    input: PathBuf,

    /// Connector configuration (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Jsonl)]
    format: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Assemble records on a thread pool
    #[arg(long)]
    parallel: bool,

    /// Hide the progress bar
    #[arg(long)]
    quiet: bool,
}

impl NormalizeArgs {
    pub fn run(self) -> Result<()> {
        let config = CliConfig::load(&self.config)?;
        let metadata = config.table_metadata()?;
        let schema_registry = config.schema_registry();
        let catalog = DecoderCatalog::builder().with_default_factories().build();

        let writer = create_writer(self.format, self.output.as_deref())?;
        let mut connector = Connector::open(
            config.connector,
            &catalog,
            &metadata,
            Some(&schema_registry),
            WriterProcessor::new(writer),
        )?;

        let file = fs::File::open(&self.input)
            .with_context(|| format!("failed to open {}", self.input.display()))?;
        let mmap = unsafe { Mmap::map(&file) }?;
        let messages = parse_messages(&mmap)?;

        let pb = if self.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(messages.len() as u64)
        };
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, ETA: {eta})",
            )?
            .progress_chars("=>-"),
        );

        let total = messages.len();
        if self.parallel {
            let assembler = connector.assembler();
            for chunk in messages.chunks(CHUNK_SIZE) {
                let records: Vec<_> = chunk
                    .par_iter()
                    .cloned()
                    .filter_map(|message: Message| assembler.assemble(message))
                    .collect();
                connector.submit(records)?;
                pb.inc(chunk.len() as u64);
            }
        } else {
            for message in messages {
                connector.write(message)?;
                pb.inc(1);
            }
        }

        connector.close()?;
        pb.finish_and_clear();
        info!(
            messages = total,
            records = connector.processor().written(),
            "normalization finished"
        );
        Ok(())
    }
}
