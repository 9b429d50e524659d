//! Query engine over a built [`SearchIndex`].
//!
//! # Module Structure
//!
//! - `query`: query text → term clauses
//! - `searcher`: clause evaluation, ordering and pagination

pub mod query;
pub mod searcher;

use crate::error::Result;
use crate::index::SearchIndex;

// Re-exports
pub use query::{Occur, Query, QueryMode, QueryParser, TermClause};
pub use searcher::{ResultOrder, SearchHit, SearchRequest, SearchRequestBuilder, Searcher};

/// Ids of the documents containing every query term, in ascending id order.
///
/// `-` is an ordinary delimiter here; exclusions are only available through
/// [`SearchRequest::exclusions`].
///
/// Indexes from the builder or the codec are fully validated when they are
/// created, so only [`SearchIndex::check_shape`] runs per call. A violation
/// is reported as [`LecternError::MalformedIndex`](crate::LecternError::MalformedIndex).
/// For repeated queries prefer a [`Searcher`], which also keeps its parser.
pub fn query(index: &SearchIndex, text: &str) -> Result<Vec<String>> {
    query_with_mode(index, text, QueryMode::All)
}

/// Like [`query`], with an explicit combination mode.
pub fn query_with_mode(index: &SearchIndex, text: &str, mode: QueryMode) -> Result<Vec<String>> {
    index.check_shape()?;
    let parsed = QueryParser::for_index(index).parse(text, mode);
    let hits = searcher::execute(index, &parsed, ResultOrder::DocumentId, 0, None);
    Ok(hits.into_iter().map(|hit| hit.id).collect())
}
