use clap::ValueEnum;

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One JSON object per record
    Jsonl,
    /// Human-readable values
    Text,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum SchemaStyle {
    /// Indented tree
    Tree,
    /// Single line
    Compact,
}
