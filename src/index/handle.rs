//! Publication of an index to concurrent readers.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::index::SearchIndex;
use crate::search::Searcher;

/// Holds the currently published index.
///
/// Published indexes are never modified. A rebuild produces a new
/// [`SearchIndex`] which replaces the old one through [`publish`](Self::publish);
/// readers holding a snapshot keep using the previous index until they take a
/// new one.
#[derive(Debug)]
pub struct IndexHandle {
    current: RwLock<Arc<SearchIndex>>,
}

impl IndexHandle {
    /// Validate and wrap an index.
    pub fn new(index: SearchIndex) -> Result<Self> {
        index.validate()?;
        Ok(IndexHandle {
            current: RwLock::new(Arc::new(index)),
        })
    }

    /// The currently published index.
    pub fn snapshot(&self) -> Arc<SearchIndex> {
        self.current.read().clone()
    }

    /// Validate and publish a rebuilt index, returning the one it replaces.
    ///
    /// On validation failure the current index stays published.
    pub fn publish(&self, index: SearchIndex) -> Result<Arc<SearchIndex>> {
        index.validate()?;
        let next = Arc::new(index);
        let mut guard = self.current.write();
        let previous = std::mem::replace(&mut *guard, next);
        log::info!(
            "published index with {} documents (replaced {})",
            guard.doc_count(),
            previous.doc_count()
        );
        Ok(previous)
    }

    /// A searcher bound to the current snapshot.
    pub fn searcher(&self) -> Result<Searcher> {
        Searcher::new(self.snapshot())
    }
}
