//! # Synrank
//!
//! Thesaurus-expanded lexical query processing for Rust.
//!
//! A free-text query is tokenized, every term is expanded with its synonyms
//! from a thesaurus, the postings of every expanded term are fetched from an
//! inverted index and summed per document, and the top-K documents are
//! rendered by an output formatter.
//!
//! ## Modules
//!
//! - [`analysis`] - Tokenizers, token filters and analyzers for query text
//! - [`thesaurus`] - Term to synonym-list mapping and its JSON-lines loader
//! - [`expansion`] - Query expansion
//! - [`index`] - Posting lookup trait and an in-memory index
//! - [`document`] - Document store trait and an in-memory store
//! - [`scoring`] - Score aggregation and top-K ranking
//! - [`output`] - Output formatters
//! - [`query_process`] - The search entry point
//! - [`config`] - Query processing configuration
//! - [`cli`] - Command line interface

pub mod analysis;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod expansion;
pub mod index;
pub mod output;
pub mod query_process;
pub mod scoring;
pub mod thesaurus;

pub mod prelude {
    pub use crate::config::SearchConfig;
    pub use crate::document::{Document, DocumentStore, InMemoryDocumentStore};
    pub use crate::error::{Result, SynrankError};
    pub use crate::expansion::{ExpandedQuery, QueryExpander};
    pub use crate::index::{InMemoryIndex, Posting, TermIndex};
    pub use crate::output::{DocIdsOnlyFormatter, FullDocumentsFormatter, OutputFormatter};
    pub use crate::query_process::QueryProcessor;
    pub use crate::scoring::{AggregatedScores, ScoredDoc};
    pub use crate::thesaurus::Thesaurus;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
