pub mod batch;
pub mod normalize;
pub mod schema;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "duorev")]
#[command(
    author,
    version,
    about = "Normalize dual-backend code review output into structured per-file findings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file (defaults are used if it does not exist)
    #[arg(short, long, global = true, default_value = "duorev.yaml", env = "DUOREV_CONFIG")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize one review payload and print the result
    Normalize(NormalizeArgs),

    /// Normalize every saved payload in a directory and write reports
    Batch(BatchArgs),

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Html,
}

#[derive(Parser, Clone)]
pub struct NormalizeArgs {
    /// Payload file (`-` for stdin). Without it the configured fetch command is
    /// run, or stdin is read.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Shell command that prints the payload (overrides config)
    #[arg(long, conflicts_with = "input")]
    pub command: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only normalize files matching these globs (comma-separated, overrides config)
    #[arg(long, value_delimiter = ',')]
    pub include: Option<Vec<String>>,

    /// Skip files matching these globs (comma-separated, overrides config)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,
}

#[derive(Parser, Clone)]
pub struct BatchArgs {
    /// Directory holding saved `*.json` payloads
    #[arg(value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Override output directory
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Override max parallel payloads
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Only pick payload files matching these globs (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub glob: Option<Vec<String>>,

    /// Exit 1 if any payload has an invalid shape or cannot be read (CI mode)
    #[arg(long)]
    pub fail_on_invalid: bool,
}
