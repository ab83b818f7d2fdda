//! Output formatters for ranked results.
//!
//! An [`OutputFormatter`] renders a ranked id list. It is picked when the
//! query processor is built; ranking does not depend on which one is used.
//!
//! - [`FullDocumentsFormatter`] hydrates each id from the document store and
//!   renders `"(id) text"` blocks
//! - [`DocIdsOnlyFormatter`] returns the ranked ids unchanged
//! - [`Formatter`] picks one of the two at runtime
//!
//! # Examples
//!
//! ```
//! use synrank::document::{Document, InMemoryDocumentStore};
//! use synrank::output::{FullDocumentsFormatter, OutputFormatter};
//!
//! let store: InMemoryDocumentStore = vec![Document::new("d1", "Runners sprint.")]
//!     .into_iter()
//!     .collect();
//! let out = FullDocumentsFormatter::new()
//!     .format_out(&["d1".to_string()], &store)
//!     .unwrap();
//!
//! assert_eq!(out, "(d1) Runners sprint.\n\n");
//! ```

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::document::DocumentStore;
use crate::error::{Result, SynrankError};

/// Strategy for rendering a ranked id list.
pub trait OutputFormatter: Send + Sync {
    /// What this formatter produces.
    type Output;

    /// Render the ranked ids, best first.
    fn format_out(
        &self,
        results: &[String],
        document_store: &dyn DocumentStore,
    ) -> Result<Self::Output>;

    /// Get the name of this formatter.
    fn name(&self) -> &'static str;
}

/// Renders each ranked document as `"(doc_id) text"` followed by a blank line.
///
/// Fails with [`SynrankError::NotFound`] if a ranked id is missing from the
/// document store.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullDocumentsFormatter;

impl FullDocumentsFormatter {
    /// Create a new full-documents formatter.
    pub fn new() -> Self {
        FullDocumentsFormatter
    }
}

impl OutputFormatter for FullDocumentsFormatter {
    type Output = String;

    fn format_out(&self, results: &[String], document_store: &dyn DocumentStore) -> Result<String> {
        let mut output = String::new();
        for doc_id in results {
            let doc = document_store.get_by_doc_id(doc_id)?;
            write!(output, "({}) {}\n\n", doc.doc_id, doc.text)
                .map_err(|e| SynrankError::other(format!("Failed to render '{doc_id}': {e}")))?;
        }
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "full"
    }
}

/// Passes the ranked ids through unchanged. Never touches the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocIdsOnlyFormatter;

impl DocIdsOnlyFormatter {
    /// Create a new ids-only formatter.
    pub fn new() -> Self {
        DocIdsOnlyFormatter
    }
}

impl OutputFormatter for DocIdsOnlyFormatter {
    type Output = Vec<String>;

    fn format_out(
        &self,
        results: &[String],
        _document_store: &dyn DocumentStore,
    ) -> Result<Vec<String>> {
        Ok(results.to_vec())
    }

    fn name(&self) -> &'static str {
        "ids"
    }
}

/// Output of a [`Formatter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormattedOutput {
    /// Rendered document text.
    Text(String),
    /// Raw ranked ids.
    Ids(Vec<String>),
}

/// Formatter chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formatter {
    /// See [`FullDocumentsFormatter`].
    #[default]
    Full,
    /// See [`DocIdsOnlyFormatter`].
    Ids,
}

impl OutputFormatter for Formatter {
    type Output = FormattedOutput;

    fn format_out(
        &self,
        results: &[String],
        document_store: &dyn DocumentStore,
    ) -> Result<FormattedOutput> {
        match self {
            Formatter::Full => FullDocumentsFormatter
                .format_out(results, document_store)
                .map(FormattedOutput::Text),
            Formatter::Ids => DocIdsOnlyFormatter
                .format_out(results, document_store)
                .map(FormattedOutput::Ids),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Formatter::Full => FullDocumentsFormatter.name(),
            Formatter::Ids => DocIdsOnlyFormatter.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, InMemoryDocumentStore};

    fn store() -> InMemoryDocumentStore {
        vec![
            Document::new("d1", "Runners sprint at dawn."),
            Document::new("d2", "A slow jog."),
        ]
        .into_iter()
        .collect()
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_documents_formatter() {
        let out = FullDocumentsFormatter::new()
            .format_out(&ids(&["d2", "d1"]), &store())
            .unwrap();

        assert_eq!(out, "(d2) A slow jog.\n\n(d1) Runners sprint at dawn.\n\n");
    }

    #[test]
    fn test_full_documents_formatter_missing_id() {
        let err = FullDocumentsFormatter::new()
            .format_out(&ids(&["d1", "d9"]), &store())
            .unwrap_err();

        assert!(matches!(err, SynrankError::NotFound(_)));
    }

    #[test]
    fn test_ids_formatter_ignores_store() {
        let out = DocIdsOnlyFormatter::new()
            .format_out(&ids(&["d9", "d1"]), &InMemoryDocumentStore::new())
            .unwrap();

        assert_eq!(out, ids(&["d9", "d1"]));
    }

    #[test]
    fn test_empty_results() {
        let out = FullDocumentsFormatter::new().format_out(&[], &store()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_runtime_formatter() {
        let out = Formatter::Ids.format_out(&ids(&["d1"]), &store()).unwrap();
        assert_eq!(out, FormattedOutput::Ids(ids(&["d1"])));

        let out = Formatter::Full.format_out(&ids(&["d2"]), &store()).unwrap();
        assert_eq!(out, FormattedOutput::Text("(d2) A slow jog.\n\n".to_string()));
        assert_eq!(Formatter::Full.name(), "full");
    }
}
