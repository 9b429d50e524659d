mod cli;
mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::commands::{build, search, stats};

fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match cli.command {
        Command::Build(cmd) => build::run(cmd, format),
        Command::Search(cmd) => search::run(cmd, format),
        Command::Stats(cmd) => stats::run(cmd, format),
    }
}
