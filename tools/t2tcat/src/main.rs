mod commands;
mod config;
mod format;
mod input;
mod writer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{infer::InferArgs, normalize::NormalizeArgs};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "t2tcat", about = "Normalize topic messages into table records")]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode recorded messages (JSONL) with a connector configuration
    Normalize(NormalizeArgs),
    /// Print the schema inferred from a JSON document or Avro container
    Infer(InferArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Normalize(args) => args.run(),
        Commands::Infer(args) => args.run(),
    }
}
