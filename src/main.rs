use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("duorev=debug")
    } else {
        EnvFilter::new("duorev=warn")
    };

    // stdout carries the normalized output, logs go to stderr
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Normalize(args) => cli::normalize::execute(args, &cli.config).await,
        Commands::Batch(args) => cli::batch::execute(args, &cli.config).await,
        Commands::Schema => cli::schema::execute(),
    }
}
