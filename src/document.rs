//! Documents and the document store collaborator.
//!
//! Ranking never reads document content; only the full-documents output
//! formatter hydrates ranked ids through a [`DocumentStore`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynrankError};

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier, as used in postings.
    pub doc_id: String,
    /// Document content.
    pub text: String,
}

impl Document {
    /// Create a new document.
    pub fn new<S: Into<String>, T: Into<String>>(doc_id: S, text: T) -> Self {
        Document {
            doc_id: doc_id.into(),
            text: text.into(),
        }
    }
}

/// Lookup of documents by id.
pub trait DocumentStore: Send + Sync {
    /// Fetch a document. Unknown ids are a [`SynrankError::NotFound`].
    fn get_by_doc_id(&self, doc_id: &str) -> Result<Document>;
}

/// Hash-map backed [`DocumentStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: AHashMap<String, Document>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        InMemoryDocumentStore {
            documents: AHashMap::new(),
        }
    }

    /// Add a document, replacing any document with the same id.
    pub fn add(&mut self, document: Document) -> Option<Document> {
        self.documents.insert(document.doc_id.clone(), document)
    }

    /// Read JSON-lines documents (`{"doc_id": ..., "text": ...}`) until end of input.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut store = InMemoryDocumentStore::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let document: Document = serde_json::from_str(&line).map_err(|e| {
                SynrankError::storage(format!(
                    "Malformed document on line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            store.add(document);
        }

        Ok(store)
    }

    /// Load a JSON-lines document file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SynrankError::storage(format!(
                "Failed to open document file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let store = Self::from_reader(BufReader::new(file))?;
        info!("Loaded {} documents from '{}'", store.len(), path.display());

        Ok(store)
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl FromIterator<Document> for InMemoryDocumentStore {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        let mut store = InMemoryDocumentStore::new();
        for document in iter {
            store.add(document);
        }
        store
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get_by_doc_id(&self, doc_id: &str) -> Result<Document> {
        self.documents
            .get(doc_id)
            .cloned()
            .ok_or_else(|| SynrankError::not_found(format!("document '{doc_id}'")))
    }
}
