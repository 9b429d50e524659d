//! The static term index.
//!
//! A [`SearchIndex`] is built once from a corpus by the [`IndexBuilder`] and is
//! immutable afterwards. Documents are identified inside the index by their
//! *ordinal*, the position of the document id in the sorted `docnames` list.
//!
//! # Module Structure
//!
//! - `builder`: corpus → index
//! - `codec`: index ↔ JSON / `Search.setIndex(...)` artifact
//! - `handle`: rebuild-and-swap publication to concurrent readers
//! - `posting`: posting lists

pub mod builder;
pub mod codec;
pub mod handle;
pub mod posting;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzerConfig;
use crate::error::{LecternError, Result};

pub use builder::{IndexBuilder, IndexBuilderConfig};
pub use codec::ArtifactFormat;
pub use handle::IndexHandle;
pub use posting::PostingList;

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// A document as seen through the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedDocument<'a> {
    pub ordinal: u32,
    pub id: &'a str,
    pub title: &'a str,
    pub filename: Option<&'a str>,
}

/// Mapping from terms to the documents containing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    /// Document ids, sorted ascending. Index into this list = ordinal.
    pub(crate) docnames: Vec<String>,

    /// Source file names, parallel to `docnames`.
    pub(crate) filenames: Vec<Option<String>>,

    /// Display titles, parallel to `docnames`.
    pub(crate) titles: Vec<String>,

    /// Body terms.
    pub(crate) terms: BTreeMap<String, PostingList>,

    /// Title terms.
    pub(crate) titleterms: BTreeMap<String, PostingList>,

    /// Object inventory sections a Sphinx front-end expects. Always empty
    /// for built indexes; carried through when reading a Sphinx artifact.
    #[serde(default)]
    pub(crate) objects: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub(crate) objnames: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub(crate) objtypes: BTreeMap<String, serde_json::Value>,

    /// Sphinx environment version, present only in artifacts Sphinx wrote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) envversion: Option<serde_json::Value>,

    /// Analyzer the index was built with. Artifacts without one use the
    /// default analyzer.
    #[serde(default)]
    pub(crate) analyzer: AnalyzerConfig,

    /// Artifact format version.
    #[serde(default = "current_format")]
    pub(crate) format: u32,
}

fn current_format() -> u32 {
    FORMAT_VERSION
}

impl SearchIndex {
    /// An index over no documents.
    pub fn empty(analyzer: AnalyzerConfig) -> Self {
        SearchIndex {
            docnames: Vec::new(),
            filenames: Vec::new(),
            titles: Vec::new(),
            terms: BTreeMap::new(),
            titleterms: BTreeMap::new(),
            objects: BTreeMap::new(),
            objnames: BTreeMap::new(),
            objtypes: BTreeMap::new(),
            envversion: None,
            analyzer,
            format: FORMAT_VERSION,
        }
    }

    pub fn doc_count(&self) -> usize {
        self.docnames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docnames.is_empty()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn title_term_count(&self) -> usize {
        self.titleterms.len()
    }

    pub fn analyzer(&self) -> &AnalyzerConfig {
        &self.analyzer
    }

    pub fn format(&self) -> u32 {
        self.format
    }

    /// Document ids in ordinal order.
    pub fn docnames(&self) -> &[String] {
        &self.docnames
    }

    /// Look up a document by ordinal.
    pub fn document(&self, ordinal: u32) -> Option<IndexedDocument<'_>> {
        let i = ordinal as usize;
        let id = self.docnames.get(i)?;
        Some(IndexedDocument {
            ordinal,
            id: id.as_str(),
            title: self.titles.get(i).map(String::as_str).unwrap_or(id.as_str()),
            filename: self.filenames.get(i).and_then(|f| f.as_deref()),
        })
    }

    /// Ordinal of a document id, if indexed.
    pub fn ordinal_of(&self, id: &str) -> Option<u32> {
        self.docnames
            .binary_search_by(|probe| probe.as_str().cmp(id))
            .ok()
            .map(|i| i as u32)
    }

    /// Body postings of a term.
    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    /// Title postings of a term.
    pub fn title_postings(&self, term: &str) -> Option<&PostingList> {
        self.titleterms.get(term)
    }

    /// Documents containing the term in their body or title.
    ///
    /// Unknown terms yield an empty list.
    pub fn matching(&self, term: &str) -> PostingList {
        match (self.terms.get(term), self.titleterms.get(term)) {
            (Some(body), Some(title)) => body.union(title),
            (Some(body), None) => body.clone(),
            (None, Some(title)) => title.clone(),
            (None, None) => PostingList::new(),
        }
    }

    /// Body terms in ascending order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.terms.iter().map(|(t, p)| (t.as_str(), p))
    }

    /// Title terms in ascending order.
    pub fn title_terms(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.titleterms.iter().map(|(t, p)| (t.as_str(), p))
    }

    /// Check the structural invariants of the index.
    ///
    /// Indexes produced by the builder always pass. Indexes read from an
    /// artifact are validated before use; any violation is reported as
    /// [`LecternError::MalformedIndex`].
    pub fn validate(&self) -> Result<()> {
        self.check_shape()?;

        let doc_count = self.docnames.len();
        if let Some(empty) = self.docnames.iter().position(|id| id.is_empty()) {
            return Err(LecternError::malformed_index(format!(
                "document id at ordinal {empty} is empty"
            )));
        }
        for pair in self.docnames.windows(2) {
            if pair[0] >= pair[1] {
                return Err(LecternError::malformed_index(format!(
                    "docnames not strictly ascending at '{}'",
                    pair[1]
                )));
            }
        }

        validate_postings("terms", &self.terms, doc_count)?;
        validate_postings("titleterms", &self.titleterms, doc_count)?;

        Ok(())
    }

    /// The constant-time part of [`validate`](Self::validate): format
    /// version, analyzer and the lengths of the per-document lists.
    pub fn check_shape(&self) -> Result<()> {
        if self.format != FORMAT_VERSION {
            return Err(LecternError::malformed_index(format!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                self.format
            )));
        }

        self.analyzer
            .validate()
            .map_err(|e| LecternError::malformed_index(format!("analyzer: {e}")))?;

        let doc_count = self.docnames.len();
        if self.titles.len() != doc_count || self.filenames.len() != doc_count {
            return Err(LecternError::malformed_index(format!(
                "{doc_count} docnames but {} titles and {} filenames",
                self.titles.len(),
                self.filenames.len()
            )));
        }
        if u32::try_from(doc_count).is_err() {
            return Err(LecternError::malformed_index(format!(
                "{doc_count} documents exceed the ordinal range"
            )));
        }
        Ok(())
    }
}

fn validate_postings(
    section: &str,
    map: &BTreeMap<String, PostingList>,
    doc_count: usize,
) -> Result<()> {
    for (term, postings) in map {
        if term.is_empty() || term.chars().any(char::is_whitespace) {
            return Err(LecternError::malformed_index(format!(
                "{section}: '{term}' is not a valid term"
            )));
        }
        if postings.is_empty() {
            return Err(LecternError::malformed_index(format!(
                "{section}: term '{term}' has no postings"
            )));
        }
        if !postings.is_strictly_increasing() {
            return Err(LecternError::malformed_index(format!(
                "{section}: postings of '{term}' are not strictly ascending"
            )));
        }
        if let Some(bad) = postings.iter().find(|&o| o as usize >= doc_count) {
            return Err(LecternError::malformed_index(format!(
                "{section}: term '{term}' references document {bad} of {doc_count}"
            )));
        }
    }
    Ok(())
}
