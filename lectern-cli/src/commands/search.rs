use anyhow::Result;
use lectern::{QueryMode, ResultOrder, SearchRequest};

use crate::cli::SearchCommand;
use crate::context;
use crate::output::{self, OutputFormat};

/// Execute a search command.
pub fn run(cmd: SearchCommand, format: OutputFormat) -> Result<()> {
    let searcher = context::open_searcher(&cmd.index)?;

    let mut builder = SearchRequest::builder(cmd.query.as_str())
        .mode(if cmd.any { QueryMode::Any } else { QueryMode::All })
        .order(if cmd.ranked {
            ResultOrder::Score
        } else {
            ResultOrder::DocumentId
        })
        .offset(cmd.offset)
        .exclusions(true);
    if let Some(limit) = cmd.limit {
        builder = builder.limit(limit);
    }
    let request = builder.build();

    let hits = searcher.search(&request);
    tracing::debug!(query = %request.query, hits = hits.len(), "search finished");
    output::print_search_results(&hits, format)
}
