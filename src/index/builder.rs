//! Index builder: turns a corpus into a [`SearchIndex`].

use std::collections::BTreeMap;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::analysis::{Analyzer, AnalyzerConfig, PipelineAnalyzer};
use crate::data::Document;
use crate::error::{LecternError, Result};
use crate::index::posting::PostingList;
use crate::index::{FORMAT_VERSION, SearchIndex};

/// Index builder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexBuilderConfig {
    /// Analysis rule applied to document text (and later to queries).
    pub analyzer: AnalyzerConfig,

    /// Whether to index explicit document titles into `titleterms`.
    pub index_titles: bool,

    /// Reject an empty corpus with [`LecternError::EmptyCorpus`].
    pub require_non_empty: bool,
}

impl Default for IndexBuilderConfig {
    fn default() -> Self {
        IndexBuilderConfig {
            analyzer: AnalyzerConfig::default(),
            index_titles: true,
            require_non_empty: false,
        }
    }
}

/// Statistics about a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Number of documents indexed.
    pub docs_indexed: usize,
    /// Number of documents without any body term.
    pub empty_docs: usize,
    /// Total body tokens seen, including repeats.
    pub tokens_seen: usize,
    /// Number of unique body terms.
    pub unique_terms: usize,
    /// Number of unique title terms.
    pub unique_title_terms: usize,
}

/// Builds a [`SearchIndex`] from a fixed corpus.
///
/// The builder holds no state between builds; calling [`build`](Self::build)
/// twice on the same corpus yields identical indexes.
#[derive(Debug)]
pub struct IndexBuilder {
    config: IndexBuilderConfig,
    analyzer: PipelineAnalyzer,
}

impl IndexBuilder {
    /// Create a builder, validating the analyzer configuration.
    pub fn new(config: IndexBuilderConfig) -> Result<Self> {
        config.analyzer.validate()?;
        let analyzer = PipelineAnalyzer::from_config(config.analyzer.clone());
        Ok(IndexBuilder { config, analyzer })
    }

    /// Builder with an explicit analyzer configuration and default options.
    pub fn with_analyzer(analyzer: AnalyzerConfig) -> Result<Self> {
        Self::new(IndexBuilderConfig {
            analyzer,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &IndexBuilderConfig {
        &self.config
    }

    /// Build the index.
    pub fn build(&self, documents: &[Document]) -> Result<SearchIndex> {
        self.build_with_stats(documents).map(|(index, _)| index)
    }

    /// Build the index and report build statistics.
    pub fn build_with_stats(&self, documents: &[Document]) -> Result<(SearchIndex, BuildStats)> {
        if documents.is_empty() {
            if self.config.require_non_empty {
                return Err(LecternError::EmptyCorpus);
            }
            log::info!("building index over an empty corpus");
            return Ok((
                SearchIndex::empty(self.config.analyzer.clone()),
                BuildStats::default(),
            ));
        }

        check_unique_ids(documents)?;
        if u32::try_from(documents.len()).is_err() {
            return Err(LecternError::invalid_argument(format!(
                "corpus of {} documents exceeds the ordinal range",
                documents.len()
            )));
        }

        // Ordinals follow id order so the artifact does not depend on input order.
        let mut sorted: Vec<&Document> = documents.iter().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));

        let mut stats = BuildStats::default();
        let mut terms: AHashMap<String, PostingList> = AHashMap::new();
        let mut titleterms: AHashMap<String, PostingList> = AHashMap::new();

        for (ordinal, doc) in sorted.iter().enumerate() {
            let ordinal = ordinal as u32;

            let tokens = self.analyzer.analyze(&doc.text);
            if tokens.is_empty() {
                stats.empty_docs += 1;
            }
            stats.tokens_seen += tokens.len();
            log::debug!("document '{}': {} tokens", doc.id, tokens.len());

            for token in tokens {
                terms.entry(token.text).or_default().push(ordinal);
            }

            // Untitled documents display their id, which is not document text.
            if self.config.index_titles && !doc.title.is_empty() {
                for term in self.analyzer.terms(&doc.title) {
                    titleterms.entry(term).or_default().push(ordinal);
                }
            }
        }

        stats.docs_indexed = sorted.len();
        stats.unique_terms = terms.len();
        stats.unique_title_terms = titleterms.len();

        let index = SearchIndex {
            docnames: sorted.iter().map(|d| d.id.clone()).collect(),
            filenames: sorted.iter().map(|d| d.filename.clone()).collect(),
            titles: sorted.iter().map(|d| d.display_title().to_string()).collect(),
            terms: terms.into_iter().collect::<BTreeMap<_, _>>(),
            titleterms: titleterms.into_iter().collect::<BTreeMap<_, _>>(),
            objects: BTreeMap::new(),
            objnames: BTreeMap::new(),
            objtypes: BTreeMap::new(),
            envversion: None,
            analyzer: self.config.analyzer.clone(),
            format: FORMAT_VERSION,
        };

        log::info!(
            "indexed {} documents: {} terms, {} title terms",
            stats.docs_indexed,
            stats.unique_terms,
            stats.unique_title_terms
        );

        Ok((index, stats))
    }
}

fn check_unique_ids(documents: &[Document]) -> Result<()> {
    let mut seen = AHashSet::with_capacity(documents.len());
    for doc in documents {
        if doc.id.is_empty() {
            return Err(LecternError::invalid_argument("document id must not be empty"));
        }
        if !seen.insert(doc.id.as_str()) {
            return Err(LecternError::DuplicateDocumentId(doc.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Document> {
        vec![
            Document::new("b", "the dog sat"),
            Document::new("a", "the cat sat"),
        ]
    }

    #[test]
    fn test_build_assigns_ordinals_by_id() {
        let builder = IndexBuilder::new(IndexBuilderConfig::default()).unwrap();
        let index = builder.build(&corpus()).unwrap();

        assert_eq!(index.docnames(), &["a".to_string(), "b".to_string()]);
        assert_eq!(index.postings("cat").unwrap().as_slice(), &[0]);
        assert_eq!(index.postings("dog").unwrap().as_slice(), &[1]);
        assert_eq!(index.postings("sat").unwrap().as_slice(), &[0, 1]);
        assert!(index.validate().is_ok());
    }

    #[test]
    fn test_repeated_terms_recorded_once() {
        let builder = IndexBuilder::new(IndexBuilderConfig::default()).unwrap();
        let index = builder
            .build(&[Document::new("a", "gamma gamma GAMMA")])
            .unwrap();
        assert_eq!(index.postings("gamma").unwrap().as_slice(), &[0]);
    }

    #[test]
    fn test_title_terms() {
        let builder = IndexBuilder::new(IndexBuilderConfig::default()).unwrap();
        let docs = vec![Document::new("Unit3-Alarm", "burglary earthquake").with_title("Alarm")];
        let index = builder.build(&docs).unwrap();

        assert_eq!(index.title_postings("alarm").unwrap().as_slice(), &[0]);
        assert!(index.postings("alarm").is_none());
        assert_eq!(index.document(0).unwrap().title, "Alarm");
    }

    #[test]
    fn test_untitled_documents_index_no_title_terms() {
        let builder = IndexBuilder::new(IndexBuilderConfig::default()).unwrap();
        let docs = vec![
            Document::new("a", "the cat sat"),
            Document::new("b", "the dog sat"),
        ];
        let index = builder.build(&docs).unwrap();

        assert_eq!(index.title_term_count(), 0);
        assert!(index.matching("a").is_empty());
        assert!(index.matching("b").is_empty());
        // The id is still shown as the display title.
        assert_eq!(index.document(0).unwrap().title, "a");
    }

    #[test]
    fn test_title_terms_disabled() {
        let builder = IndexBuilder::new(IndexBuilderConfig {
            index_titles: false,
            ..Default::default()
        })
        .unwrap();
        let docs = vec![Document::new("a", "x").with_title("Alarm")];
        let index = builder.build(&docs).unwrap();
        assert_eq!(index.title_term_count(), 0);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let builder = IndexBuilder::new(IndexBuilderConfig::default()).unwrap();
        let docs = vec![Document::new("a", "x"), Document::new("a", "y")];
        let err = builder.build(&docs).unwrap_err();
        assert!(matches!(err, LecternError::DuplicateDocumentId(ref id) if id == "a"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let builder = IndexBuilder::new(IndexBuilderConfig::default()).unwrap();
        let err = builder.build(&[Document::new("", "x")]).unwrap_err();
        assert!(matches!(err, LecternError::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_corpus_policy() {
        let lenient = IndexBuilder::new(IndexBuilderConfig::default()).unwrap();
        let index = lenient.build(&[]).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.term_count(), 0);

        let strict = IndexBuilder::new(IndexBuilderConfig {
            require_non_empty: true,
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(strict.build(&[]), Err(LecternError::EmptyCorpus)));
    }

    #[test]
    fn test_empty_text_contributes_no_terms() {
        let builder = IndexBuilder::new(IndexBuilderConfig {
            index_titles: false,
            ..Default::default()
        })
        .unwrap();
        let (index, stats) = builder
            .build_with_stats(&[Document::new("empty", ""), Document::new("full", "beta")])
            .unwrap();
        assert_eq!(index.doc_count(), 2);
        assert_eq!(index.term_count(), 1);
        assert_eq!(stats.empty_docs, 1);
        assert_eq!(stats.tokens_seen, 1);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let builder = IndexBuilder::new(IndexBuilderConfig::default()).unwrap();
        let mut reversed = corpus();
        reversed.reverse();
        assert_eq!(builder.build(&corpus()).unwrap(), builder.build(&reversed).unwrap());
    }

    #[test]
    fn test_invalid_analyzer_config_rejected() {
        let config = IndexBuilderConfig {
            analyzer: AnalyzerConfig {
                min_token_length: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            IndexBuilder::new(config),
            Err(LecternError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_english_analyzer_is_recorded() {
        let builder = IndexBuilder::with_analyzer(AnalyzerConfig::english()).unwrap();
        let index = builder
            .build(&[Document::new("Unit1", "The statistics of regression")])
            .unwrap();
        assert_eq!(index.analyzer(), &AnalyzerConfig::english());
        assert!(index.postings("statist").is_some());
        assert!(index.postings("the").is_none());
    }
}
