//! # Lectern
//!
//! A term-based static search index for documentation sites.
//!
//! ## Features
//!
//! - Configurable analysis pipeline (word tokenizer, lowercasing, optional
//!   English stopwords and stemming)
//! - Deterministic index artifacts, as JSON or a `Search.setIndex(...)` script;
//!   a `searchindex.js` written by Sphinx can be read back
//! - Intersection and union queries, with opt-in `-word` exclusions
//! - Corpus loading from JSON, CSV or a directory of sources and notebooks
//!
//! ```
//! use lectern::{Document, QueryMode};
//!
//! let docs = vec![
//!     Document::new("a", "the cat sat"),
//!     Document::new("b", "the dog sat"),
//! ];
//! let index = lectern::build(&docs)?;
//!
//! assert_eq!(lectern::query(&index, "sat")?, vec!["a", "b"]);
//! assert!(lectern::query(&index, "cat dog")?.is_empty());
//! assert_eq!(lectern::query_with_mode(&index, "cat dog", QueryMode::Any)?, vec!["a", "b"]);
//! # Ok::<(), lectern::LecternError>(())
//! ```

pub mod analysis;
pub mod corpus;
mod data;
mod error;
pub mod index;
pub mod search;

// Re-exports for the public API
pub use analysis::{Analyzer, AnalyzerConfig, PipelineAnalyzer};
pub use corpus::Corpus;
pub use data::Document;
pub use error::{LecternError, Result};
pub use index::builder::BuildStats;
pub use index::{ArtifactFormat, IndexBuilder, IndexBuilderConfig, IndexHandle, SearchIndex};
pub use search::{
    QueryMode, ResultOrder, SearchHit, SearchRequest, SearchRequestBuilder, Searcher, query,
    query_with_mode,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build an index over `documents` with the default configuration.
pub fn build(documents: &[Document]) -> Result<SearchIndex> {
    IndexBuilder::new(IndexBuilderConfig::default())?.build(documents)
}
