//! Query execution against a [`SearchIndex`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::{PostingList, SearchIndex};
use crate::search::query::{Occur, Query, QueryMode, QueryParser};

/// Result ordering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOrder {
    /// Ascending document id.
    #[default]
    DocumentId,
    /// Number of matched query terms, descending; ties by ascending id.
    Score,
}

/// A search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text query.
    pub query: String,

    /// How positive terms combine.
    pub mode: QueryMode,

    /// Ordering of hits.
    pub order: ResultOrder,

    /// Maximum number of hits to return. `None` returns all.
    pub limit: Option<usize>,

    /// Number of hits to skip before returning (for pagination).
    pub offset: usize,

    /// Treat `-word` in the query as an exclusion.
    pub exclusions: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        SearchRequest {
            query: query.into(),
            mode: QueryMode::default(),
            order: ResultOrder::default(),
            limit: None,
            offset: 0,
            exclusions: false,
        }
    }

    pub fn builder(query: impl Into<String>) -> SearchRequestBuilder {
        SearchRequestBuilder {
            request: SearchRequest::new(query),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchRequestBuilder {
    request: SearchRequest,
}

impl SearchRequestBuilder {
    pub fn mode(mut self, mode: QueryMode) -> Self {
        self.request.mode = mode;
        self
    }

    pub fn order(mut self, order: ResultOrder) -> Self {
        self.request.order = order;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.request.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.request.offset = offset;
        self
    }

    pub fn exclusions(mut self, exclusions: bool) -> Self {
        self.request.exclusions = exclusions;
        self
    }

    pub fn build(self) -> SearchRequest {
        self.request
    }
}

/// A matching document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Document id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Source file name, if known.
    pub filename: Option<String>,
    /// Number of distinct query terms the document matched.
    pub score: usize,
}

/// Executes queries against a shared, immutable index.
///
/// `Searcher` is cheap to create from an `Arc<SearchIndex>`; many searchers
/// may read the same index concurrently.
#[derive(Debug)]
pub struct Searcher {
    index: Arc<SearchIndex>,
    parser: QueryParser,
}

impl Searcher {
    /// Create a searcher. The index is validated first.
    pub fn new(index: Arc<SearchIndex>) -> Result<Self> {
        index.validate()?;
        let parser = QueryParser::for_index(&index);
        Ok(Searcher { index, parser })
    }

    pub fn index(&self) -> &Arc<SearchIndex> {
        &self.index
    }

    /// Parse query text with the index analyzer.
    pub fn parse(&self, text: &str, mode: QueryMode) -> Query {
        self.parser.parse(text, mode)
    }

    /// Execute a request.
    pub fn search(&self, request: &SearchRequest) -> Vec<SearchHit> {
        let query = self
            .parser
            .parse_with(&request.query, request.mode, request.exclusions);
        let hits = execute(&self.index, &query, request.order, request.offset, request.limit);
        log::debug!(
            "query '{}' ({:?}): {} clauses, {} hits",
            request.query,
            request.mode,
            query.clauses().len(),
            hits.len()
        );
        hits
    }

    /// Intersection query returning ids in ascending order.
    pub fn search_ids(&self, text: &str) -> Vec<String> {
        self.search(&SearchRequest::new(text))
            .into_iter()
            .map(|hit| hit.id)
            .collect()
    }

    /// Documents indexed under an exact, already normalized term.
    pub fn lookup_term(&self, term: &str) -> Vec<String> {
        self.index
            .matching(term)
            .iter()
            .filter_map(|ordinal| self.index.document(ordinal))
            .map(|doc| doc.id.to_string())
            .collect()
    }
}

/// Evaluate a parsed query.
pub(crate) fn execute(
    index: &SearchIndex,
    query: &Query,
    order: ResultOrder,
    offset: usize,
    limit: Option<usize>,
) -> Vec<SearchHit> {
    let must = query.terms(Occur::Must);
    let should = query.terms(Occur::Should);
    if must.is_empty() && should.is_empty() {
        return Vec::new();
    }

    // ordinal -> number of matched positive terms
    let mut scores: BTreeMap<u32, usize> = BTreeMap::new();

    if must.is_empty() {
        for term in &should {
            for ordinal in index.matching(term).iter() {
                *scores.entry(ordinal).or_insert(0) += 1;
            }
        }
    } else {
        let mut candidates: Option<PostingList> = None;
        for term in &must {
            let postings = index.matching(term);
            let next = match candidates {
                None => postings,
                Some(acc) => acc.intersect(&postings),
            };
            if next.is_empty() {
                return Vec::new();
            }
            candidates = Some(next);
        }
        for ordinal in candidates.unwrap_or_default().iter() {
            scores.insert(ordinal, must.len());
        }
        for term in &should {
            for ordinal in index.matching(term).iter() {
                if let Some(score) = scores.get_mut(&ordinal) {
                    *score += 1;
                }
            }
        }
    }

    let excluded = query
        .terms(Occur::MustNot)
        .into_iter()
        .fold(PostingList::new(), |acc, term| acc.union(&index.matching(term)));
    scores.retain(|ordinal, _| !excluded.contains(*ordinal));

    // Ordinal order is document id order.
    let mut ranked: Vec<(u32, usize)> = scores.into_iter().collect();
    if order == ResultOrder::Score {
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    }

    ranked
        .into_iter()
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX))
        .filter_map(|(ordinal, score)| {
            index.document(ordinal).map(|doc| SearchHit {
                id: doc.id.to_string(),
                title: doc.title.to_string(),
                filename: doc.filename.map(str::to_string),
                score,
            })
        })
        .collect()
}
