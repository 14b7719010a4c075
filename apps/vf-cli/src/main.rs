//! # vf-cli
//!
//! Command-line interface for the Voltframe lifecycle and review core.
//!
//! Lets an operator poke at the rule tables and diff engine without a
//! running service:
//! - `vf status list/info/next/validate/path/progress` — inspect and check
//!   the component lifecycle
//! - `vf diff <a.json> <b.json>` — compute and group a document diff
//! - `vf po next` — inspect the purchase-order status graph

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Voltframe CLI — inspect component lifecycles and document diffs.
#[derive(Parser)]
#[command(name = "vf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and validate the component lifecycle.
    Status {
        #[command(subcommand)]
        command: commands::status::StatusCommands,
    },
    /// Compute the structural diff between two JSON documents.
    Diff(commands::diff::DiffArgs),
    /// Inspect the purchase-order status graph.
    Po {
        #[command(subcommand)]
        command: commands::po::PoCommands,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Status { command } => commands::status::execute(command),
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Po { command } => commands::po::execute(command),
    }
}
