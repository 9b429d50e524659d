//! Text analysis for index building and query parsing.
//!
//! Both sides of the index must agree on how text becomes terms, so the
//! analyzer is described by a serializable [`AnalyzerConfig`] that is stored
//! inside every built index and used again by the searcher.
//!
//! # Architecture
//!
//! ```text
//! Text → (NFKC) → Tokenizer → Token Stream → Token Filters → Terms
//! ```
//!
//! # Examples
//!
//! ```
//! use lectern::analysis::{Analyzer, AnalyzerConfig, PipelineAnalyzer};
//!
//! let analyzer = PipelineAnalyzer::from_config(AnalyzerConfig::default());
//! let terms = analyzer.terms("Beta priors, Gamma-Gamma!");
//! assert_eq!(terms, vec!["beta", "priors", "gamma", "gamma"]);
//! ```

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-exports
pub use analyzer::{Analyzer, AnalyzerConfig, Language, PipelineAnalyzer};
pub use token::Token;
pub use token_filter::Filter as TokenFilter;
pub use tokenizer::{Tokenizer, TokenizerKind};
