use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Lectern - static search index CLI
#[derive(Parser)]
#[command(name = "lectern", version, about)]
pub struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a search index from a corpus.
    Build(BuildCommand),
    /// Execute a search query against an index.
    Search(SearchCommand),
    /// Show index statistics.
    Stats(StatsCommand),
}

// --- Build ---

#[derive(Parser)]
pub struct BuildCommand {
    /// Corpus source: a directory, a `.json` file or a `.csv` file.
    #[arg(long)]
    pub corpus: PathBuf,

    /// Output artifact path. A `.js` extension writes `Search.setIndex(...)`.
    #[arg(long, env = "LECTERN_INDEX", default_value = "searchindex.json")]
    pub output: PathBuf,

    /// Builder configuration TOML file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Use the English analyzer (stopwords and stemming).
    #[arg(long)]
    pub english: bool,

    /// Force the `Search.setIndex(...)` wrapper regardless of extension.
    #[arg(long)]
    pub js: bool,

    /// Fail on an empty corpus.
    #[arg(long)]
    pub require_non_empty: bool,
}

// --- Search ---

#[derive(Parser)]
pub struct SearchCommand {
    /// Search query. Prefix a word with `-` to exclude it.
    pub query: String,

    /// Path to the index artifact.
    #[arg(long, env = "LECTERN_INDEX", default_value = "searchindex.json")]
    pub index: PathBuf,

    /// Match documents containing any term instead of all terms.
    #[arg(long)]
    pub any: bool,

    /// Order by number of matched terms instead of document id.
    #[arg(long)]
    pub ranked: bool,

    /// Maximum number of results.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Number of results to skip.
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
}

// --- Stats ---

#[derive(Parser)]
pub struct StatsCommand {
    /// Path to the index artifact.
    #[arg(long, env = "LECTERN_INDEX", default_value = "searchindex.json")]
    pub index: PathBuf,
}
