//! # snapgen
//!
//! Generates FHIR StructureDefinition snapshots from differentials.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod io;
mod logging;

use commands::{ResourceTypeCommand, SnapshotCommand};
use logging::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "snapgen")]
#[command(about = "Generate snapshots for differential FHIR StructureDefinitions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge differentials onto their base definitions and write snapshots
    Snapshot(SnapshotCommand),
    /// Print the resource type a baseDefinition URL resolves to
    ResourceType(ResourceTypeCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.log_format)?;

    match cli.command {
        Commands::Snapshot(cmd) => cmd.execute(),
        Commands::ResourceType(cmd) => cmd.execute(),
    }
}
