use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use lectern::{IndexBuilderConfig, SearchIndex, Searcher};

/// Read a builder configuration TOML file.
pub fn load_config(path: &Path) -> Result<IndexBuilderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&content)
}

/// Parse a builder configuration. Every key is optional.
pub fn parse_config(content: &str) -> Result<IndexBuilderConfig> {
    toml::from_str(content).context("Failed to parse config TOML")
}

/// Open and validate an index artifact.
pub fn open_index(path: &Path) -> Result<SearchIndex> {
    SearchIndex::read_from_path(path)
        .with_context(|| format!("Failed to open index {}", path.display()))
}

/// Open an index artifact and bind a searcher to it.
pub fn open_searcher(path: &Path) -> Result<Searcher> {
    let index = open_index(path)?;
    Ok(Searcher::new(Arc::new(index))?)
}
