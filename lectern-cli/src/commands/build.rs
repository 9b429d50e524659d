use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use lectern::{AnalyzerConfig, ArtifactFormat, Corpus, IndexBuilder, IndexBuilderConfig};

use crate::cli::BuildCommand;
use crate::context;
use crate::output::{self, OutputFormat};

/// Execute a build command.
pub fn run(cmd: BuildCommand, format: OutputFormat) -> Result<()> {
    let config = resolve_config(&cmd)?;

    let corpus = Corpus::load(&cmd.corpus)
        .with_context(|| format!("Failed to load corpus from {}", cmd.corpus.display()))?;
    tracing::info!(documents = corpus.len(), "corpus loaded");

    let builder = IndexBuilder::new(config).context("Invalid builder configuration")?;
    let (index, stats) = builder.build_with_stats(&corpus)?;

    if cmd.js {
        let file = File::create(&cmd.output)
            .with_context(|| format!("Failed to create {}", cmd.output.display()))?;
        index.write_to(BufWriter::new(file), ArtifactFormat::Js)?;
    } else {
        index
            .write_to_path(&cmd.output)
            .with_context(|| format!("Failed to write index to {}", cmd.output.display()))?;
    }

    output::print_build_stats(&stats, &cmd.output, format)
}

/// Config file first, then command-line overrides.
fn resolve_config(cmd: &BuildCommand) -> Result<IndexBuilderConfig> {
    let mut config = match &cmd.config {
        Some(path) => context::load_config(path)?,
        None => IndexBuilderConfig::default(),
    };
    if cmd.english {
        config.analyzer = AnalyzerConfig::english();
    }
    if cmd.require_non_empty {
        config.require_non_empty = true;
    }
    Ok(config)
}
