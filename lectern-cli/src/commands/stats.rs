use anyhow::Result;

use crate::cli::StatsCommand;
use crate::context;
use crate::output::{self, OutputFormat};

/// Execute a stats command.
pub fn run(cmd: StatsCommand, format: OutputFormat) -> Result<()> {
    let index = context::open_index(&cmd.index)?;
    output::print_stats(&index, format)
}
