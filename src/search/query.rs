//! Free-text query parsing.
//!
//! Query text is run through the index analyzer, so it splits into terms by
//! exactly the rule the documents were indexed with. Depending on the
//! [`QueryMode`] the terms are all required (intersection) or any of them
//! suffices (union).
//!
//! With exclusions enabled, a whitespace-separated word prefixed with `-`
//! removes the documents matching its terms instead. Exclusions are off by
//! default, in which case `-` is an ordinary delimiter.

use serde::{Deserialize, Serialize};

use crate::analysis::{Analyzer, AnalyzerConfig, PipelineAnalyzer};
use crate::index::SearchIndex;

/// How multiple query terms combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Documents containing every term (intersection).
    #[default]
    All,
    /// Documents containing at least one term (union).
    Any,
}

/// Occurrence requirement of a term clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    /// The term must match.
    Must,
    /// The term should match; at least one `Should` clause must.
    Should,
    /// Documents matching the term are excluded.
    MustNot,
}

/// A single analyzed term with its occurrence requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermClause {
    pub term: String,
    pub occur: Occur,
}

/// A parsed query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    clauses: Vec<TermClause>,
}

impl Query {
    pub fn new() -> Self {
        Query {
            clauses: Vec::new(),
        }
    }

    /// Add a clause unless the same term is already present with the same
    /// occurrence.
    pub fn add_clause(&mut self, term: impl Into<String>, occur: Occur) {
        let term = term.into();
        if !self
            .clauses
            .iter()
            .any(|c| c.occur == occur && c.term == term)
        {
            self.clauses.push(TermClause { term, occur });
        }
    }

    pub fn clauses(&self) -> &[TermClause] {
        &self.clauses
    }

    /// Terms with the given occurrence, in query order.
    pub fn terms(&self, occur: Occur) -> Vec<&str> {
        self.clauses
            .iter()
            .filter(|c| c.occur == occur)
            .map(|c| c.term.as_str())
            .collect()
    }

    /// Whether the query contains at least one `Must` or `Should` clause.
    pub fn has_positive_clause(&self) -> bool {
        self.clauses.iter().any(|c| c.occur != Occur::MustNot)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Parses query text with a fixed analyzer.
#[derive(Debug)]
pub struct QueryParser {
    analyzer: PipelineAnalyzer,
    exclusions: bool,
}

impl QueryParser {
    pub fn new(config: AnalyzerConfig) -> Self {
        QueryParser {
            analyzer: PipelineAnalyzer::from_config(config),
            exclusions: false,
        }
    }

    /// Treat `-word` as an exclusion in [`parse`](Self::parse).
    pub fn with_exclusions(mut self, exclusions: bool) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Parser using the analyzer the index was built with.
    pub fn for_index(index: &SearchIndex) -> Self {
        Self::new(index.analyzer().clone())
    }

    pub fn analyzer(&self) -> &PipelineAnalyzer {
        &self.analyzer
    }

    /// Parse query text.
    pub fn parse(&self, text: &str, mode: QueryMode) -> Query {
        self.parse_with(text, mode, self.exclusions)
    }

    /// Parse query text, choosing per call whether `-word` excludes.
    pub fn parse_with(&self, text: &str, mode: QueryMode, exclusions: bool) -> Query {
        let positive = match mode {
            QueryMode::All => Occur::Must,
            QueryMode::Any => Occur::Should,
        };

        let mut query = Query::new();
        if !exclusions {
            for term in self.analyzer.terms(text) {
                query.add_clause(term, positive);
            }
            return query;
        }

        for word in text.split_whitespace() {
            let (word, occur) = match word.strip_prefix('-') {
                Some(rest) if !rest.is_empty() => (rest, Occur::MustNot),
                _ => (word, positive),
            };
            for term in self.analyzer.terms(word) {
                query.add_clause(term, occur);
            }
        }
        query
    }
}
