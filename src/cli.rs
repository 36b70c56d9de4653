use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum MetadataBackend {
    Jsonl,
    Csv,
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CliOptions {
    /// Root directory of the unpacked data export
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for extracted records
    #[arg(short, long, default_value = "./output")]
    pub output: PathBuf,

    /// Optional path to config file (YAML)
    #[arg(long)]
    pub config_path: Option<PathBuf>,

    /// Metadata backend
    #[arg(long, value_enum, default_value_t = MetadataBackend::Jsonl)]
    pub metadata_backend: MetadataBackend,

    /// Limit extraction to these document ids (comma-separated list)
    #[arg(long, value_delimiter = ',')]
    pub documents: Option<Vec<String>>,

    /// Parse and count records without writing output files
    #[arg(long)]
    pub dry_run: bool,
}

pub fn parse() -> CliOptions {
    CliOptions::parse()
}
