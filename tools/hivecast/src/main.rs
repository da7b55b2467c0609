mod commands;
mod json;
mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{convert::ConvertArgs, schema::SchemaArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "hivecast",
    about = "Dry-run the Hive streaming row adapter over JSON-lines records"
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert records into table rows, one JSON array per line
    Convert(ConvertArgs),
    /// Print the inferred record schema and the resolved column positions
    Schema(SchemaArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert(args) => args.run(),
        Commands::Schema(args) => args.run(),
    }
}
