//! Posting lookup: the inverted-index side of a search.
//!
//! The ranking core only ever asks an index one question: which documents
//! match this term, and with what score. [`TermIndex`] captures that single
//! operation. Any `Fn(&str) -> Vec<Posting>` is a `TermIndex`, and
//! [`InMemoryIndex`] is a ready-made implementation backed by a hash map that
//! can be loaded from a JSON-lines postings file:
//!
//! ```jsonl
//! {"term": "run", "postings": [["d1", 2.0]]}
//! {"term": "sprint", "postings": [["d1", 1.0], ["d2", 3.0]]}
//! ```
//!
//! Scores come from the index as-is; nothing here computes relevance.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynrankError};

/// A (document id, score) pair returned by a term lookup.
///
/// Deserializes from either `["d1", 2.0]` or `{"doc_id": "d1", "score": 2.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// Identifier of the matching document.
    pub doc_id: String,
    /// Non-negative score supplied by the index.
    pub score: f64,
}

impl Posting {
    /// Create a new posting.
    pub fn new<S: Into<String>>(doc_id: S, score: f64) -> Self {
        Posting {
            doc_id: doc_id.into(),
            score,
        }
    }
}

impl<S: Into<String>> From<(S, f64)> for Posting {
    fn from((doc_id, score): (S, f64)) -> Self {
        Posting::new(doc_id, score)
    }
}

/// Read-only posting lookup.
///
/// Unknown terms return an empty list, never an error. Implementations must
/// be safe to call from several searches at once.
pub trait TermIndex: Send + Sync {
    /// Postings of `term`, in no particular order.
    fn lookup(&self, term: &str) -> Vec<Posting>;
}

impl<F> TermIndex for F
where
    F: Fn(&str) -> Vec<Posting> + Send + Sync,
{
    fn lookup(&self, term: &str) -> Vec<Posting> {
        self(term)
    }
}

/// A single line of a postings source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingRecord {
    /// The indexed term.
    pub term: String,
    /// Its postings.
    pub postings: Vec<Posting>,
}

/// Hash-map backed [`TermIndex`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryIndex {
    postings: AHashMap<String, Vec<Posting>>,
}

impl InMemoryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        InMemoryIndex {
            postings: AHashMap::new(),
        }
    }

    /// Append postings to a term.
    pub fn insert<S, I>(&mut self, term: S, postings: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = Posting>,
    {
        self.postings
            .entry(term.into())
            .or_default()
            .extend(postings);
    }

    /// Build an index from records. Repeated terms accumulate postings.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PostingRecord>,
    {
        let mut index = InMemoryIndex::new();
        for record in records {
            index.insert(record.term, record.postings);
        }
        index
    }

    /// Read a JSON-lines postings source until end of input.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut index = InMemoryIndex::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: PostingRecord = serde_json::from_str(&line).map_err(|e| {
                SynrankError::index(format!(
                    "Malformed postings record on line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if let Some(bad) = record
                .postings
                .iter()
                .find(|p| !p.score.is_finite() || p.score < 0.0)
            {
                return Err(SynrankError::index(format!(
                    "Invalid score {} for document '{}' on line {}",
                    bad.score,
                    bad.doc_id,
                    line_num + 1
                )));
            }

            index.insert(record.term, record.postings);
        }

        Ok(index)
    }

    /// Load a JSON-lines postings file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SynrankError::index(format!(
                "Failed to open postings file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let index = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} postings for {} terms from '{}'",
            index.posting_count(),
            index.len(),
            path.display()
        );

        Ok(index)
    }

    /// Number of indexed terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Check whether the index has no terms.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Total number of postings across all terms.
    pub fn posting_count(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }
}

impl TermIndex for InMemoryIndex {
    fn lookup(&self, term: &str) -> Vec<Posting> {
        self.postings.get(term).cloned().unwrap_or_default()
    }
}
