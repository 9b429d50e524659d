//! Posting lists: the documents a term occurs in.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Strictly increasing list of document ordinals.
///
/// Serialized in the compact form of the static search artifact: a list with
/// a single entry is written as a bare integer, any other list as an array.
/// Both forms are accepted when reading. Ordering is not enforced while
/// deserializing; [`SearchIndex::validate`](super::SearchIndex::validate)
/// checks it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostingList {
    ordinals: Vec<u32>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList {
            ordinals: Vec::new(),
        }
    }

    /// Wrap ordinals as-is, without sorting or deduplicating.
    pub fn from_raw(ordinals: Vec<u32>) -> Self {
        PostingList { ordinals }
    }

    /// Append an ordinal.
    ///
    /// Ordinals must be pushed in non-decreasing order; repeating the last
    /// ordinal is a no-op, so a document is recorded once per term.
    pub fn push(&mut self, ordinal: u32) {
        match self.ordinals.last() {
            Some(&last) if last == ordinal => {}
            Some(&last) => {
                debug_assert!(last < ordinal, "ordinals pushed out of order");
                self.ordinals.push(ordinal);
            }
            None => self.ordinals.push(ordinal),
        }
    }

    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.ordinals
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ordinals.iter().copied()
    }

    pub fn contains(&self, ordinal: u32) -> bool {
        self.ordinals.binary_search(&ordinal).is_ok()
    }

    /// Check the strictly-increasing invariant.
    pub fn is_strictly_increasing(&self) -> bool {
        self.ordinals.windows(2).all(|w| w[0] < w[1])
    }

    /// Ordinals present in both lists.
    pub fn intersect(&self, other: &PostingList) -> PostingList {
        let (a, b) = (&self.ordinals, &other.ordinals);
        let mut out = Vec::with_capacity(a.len().min(b.len()));
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        PostingList { ordinals: out }
    }

    /// Ordinals present in either list.
    pub fn union(&self, other: &PostingList) -> PostingList {
        let (a, b) = (&self.ordinals, &other.ordinals);
        let mut out = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => {
                    out.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    out.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        PostingList { ordinals: out }
    }
}

impl FromIterator<u32> for PostingList {
    /// Collect ordinals, sorting and deduplicating them.
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut ordinals: Vec<u32> = iter.into_iter().collect();
        ordinals.sort_unstable();
        ordinals.dedup();
        PostingList { ordinals }
    }
}

impl Serialize for PostingList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.ordinals.as_slice() {
            [single] => serializer.serialize_u32(*single),
            many => many.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PostingRepr {
    One(u32),
    Many(Vec<u32>),
}

impl<'de> Deserialize<'de> for PostingList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ordinals = match PostingRepr::deserialize(deserializer)? {
            PostingRepr::One(ordinal) => vec![ordinal],
            PostingRepr::Many(ordinals) => ordinals,
        };
        Ok(PostingList { ordinals })
    }
}
