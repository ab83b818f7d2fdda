//! The search entry point.
//!
//! [`QueryProcessor`] wires the pieces together: the query is expanded with
//! the thesaurus, the expansion is scored against the index, the scores are
//! ranked, and the ranked ids are handed to the output formatter.
//!
//! The thesaurus is passed to every call rather than owned, so one processor
//! can serve several thesauri and one thesaurus can be shared by many
//! processors.
//!
//! # Examples
//!
//! ```
//! use synrank::document::InMemoryDocumentStore;
//! use synrank::index::{InMemoryIndex, Posting};
//! use synrank::output::DocIdsOnlyFormatter;
//! use synrank::query_process::QueryProcessor;
//! use synrank::thesaurus::{Thesaurus, ThesaurusRecord};
//!
//! let thesaurus = Thesaurus::from_records(vec![ThesaurusRecord::new(
//!     "run",
//!     vec!["sprint".to_string()],
//! )]);
//!
//! let mut index = InMemoryIndex::new();
//! index.insert("run", vec![Posting::new("d1", 1.0)]);
//! index.insert("sprint", vec![Posting::new("d2", 4.0)]);
//!
//! let processor = QueryProcessor::new(InMemoryDocumentStore::new(), index)
//!     .with_formatter(DocIdsOnlyFormatter::new());
//!
//! let ids = processor.search("Run", &thesaurus, 10).unwrap();
//! assert_eq!(ids, vec!["d2", "d1"]);
//! ```

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

use crate::analysis::analyzer::Analyzer;
use crate::config::SearchConfig;
use crate::document::DocumentStore;
use crate::error::Result;
use crate::expansion::{ExpandedQuery, QueryExpander};
use crate::index::TermIndex;
use crate::output::{FullDocumentsFormatter, OutputFormatter};
use crate::scoring::aggregator::{AggregatedScores, ScoreAggregator};
use crate::scoring::ranker::{ScoredDoc, rank_scored};
use crate::thesaurus::Thesaurus;

/// Thesaurus-expanded query processor over an index and a document store.
pub struct QueryProcessor<I, S, F = FullDocumentsFormatter> {
    document_store: S,
    index: I,
    output_formatter: F,
    expander: QueryExpander,
    aggregator: ScoreAggregator,
    config: SearchConfig,
}

impl<I, S> QueryProcessor<I, S, FullDocumentsFormatter>
where
    I: TermIndex,
    S: DocumentStore,
{
    /// Create a processor with the default configuration and the
    /// full-documents formatter.
    pub fn new(document_store: S, index: I) -> Self {
        let config = SearchConfig::default();
        QueryProcessor {
            document_store,
            index,
            output_formatter: FullDocumentsFormatter::new(),
            expander: QueryExpander::new(Arc::new(config.build_analyzer())),
            aggregator: ScoreAggregator::new().with_parallel(config.parallel),
            config,
        }
    }
}

impl<I, S, F> QueryProcessor<I, S, F>
where
    I: TermIndex,
    S: DocumentStore,
    F: OutputFormatter,
{
    /// Replace the output formatter.
    pub fn with_formatter<G: OutputFormatter>(self, output_formatter: G) -> QueryProcessor<I, S, G> {
        QueryProcessor {
            document_store: self.document_store,
            index: self.index,
            output_formatter,
            expander: self.expander,
            aggregator: self.aggregator,
            config: self.config,
        }
    }

    /// Apply a configuration, rebuilding the query analyzer from it.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.expander = QueryExpander::new(Arc::new(config.build_analyzer()));
        self.aggregator = ScoreAggregator::new().with_parallel(config.parallel);
        self.config = config;
        self
    }

    /// Tokenize queries with a custom analyzer instead of the configured one.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.expander = QueryExpander::new(analyzer);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Get the index.
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Get the document store.
    pub fn document_store(&self) -> &S {
        &self.document_store
    }

    /// Get the output formatter.
    pub fn output_formatter(&self) -> &F {
        &self.output_formatter
    }

    /// Expand a query with synonyms from the thesaurus.
    pub fn expand_query(&self, query: &str, thesaurus: &Thesaurus) -> Result<ExpandedQuery> {
        self.expander.expand(query, thesaurus)
    }

    /// Aggregated scores of every document the expanded query matches.
    pub fn score(&self, query: &str, thesaurus: &Thesaurus) -> Result<AggregatedScores> {
        let expanded = self.expand_query(query, thesaurus)?;
        Ok(self.aggregator.aggregate(&expanded, &self.index))
    }

    /// The top `k` documents with their scores, best first.
    pub fn ranked(&self, query: &str, thesaurus: &Thesaurus, k: usize) -> Result<Vec<ScoredDoc>> {
        let start = Instant::now();
        let scores = self.score(query, thesaurus)?;
        let ranked = rank_scored(&scores, k);

        debug!(
            "Query {:?}: {} scored documents, kept {} (k = {}) in {:?}",
            query,
            scores.len(),
            ranked.len(),
            k,
            start.elapsed()
        );

        Ok(ranked)
    }

    /// Search and render the top `k` documents with the output formatter.
    pub fn search(&self, query: &str, thesaurus: &Thesaurus, k: usize) -> Result<F::Output> {
        let ids: Vec<String> = self
            .ranked(query, thesaurus, k)?
            .into_iter()
            .map(|doc| doc.doc_id)
            .collect();

        info!(
            "Search {:?} returned {} results via '{}' formatter",
            query,
            ids.len(),
            self.output_formatter.name()
        );

        self.output_formatter
            .format_out(&ids, &self.document_store)
    }

    /// [`search`](Self::search) with the configured default result count.
    pub fn search_default(&self, query: &str, thesaurus: &Thesaurus) -> Result<F::Output> {
        self.search(query, thesaurus, self.config.default_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, InMemoryDocumentStore};
    use crate::error::SynrankError;
    use crate::index::{InMemoryIndex, Posting};
    use crate::output::{DocIdsOnlyFormatter, Formatter, FormattedOutput};
    use crate::thesaurus::ThesaurusRecord;

    fn thesaurus() -> Thesaurus {
        Thesaurus::from_records(vec![ThesaurusRecord::new(
            "run",
            vec!["sprint".to_string(), "jog".to_string()],
        )])
    }

    fn index() -> InMemoryIndex {
        let mut index = InMemoryIndex::new();
        index.insert("run", vec![Posting::new("d1", 2.0)]);
        index.insert(
            "sprint",
            vec![Posting::new("d1", 1.0), Posting::new("d2", 3.0)],
        );
        index
    }

    fn store() -> InMemoryDocumentStore {
        vec![
            Document::new("d1", "She runs every morning."),
            Document::new("d2", "A sprint to the finish."),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_search_full_documents() {
        let processor = QueryProcessor::new(store(), index());
        let out = processor.search("run", &thesaurus(), 2).unwrap();

        assert_eq!(
            out,
            "(d1) She runs every morning.\n\n(d2) A sprint to the finish.\n\n"
        );
    }

    #[test]
    fn test_search_ids() {
        let processor =
            QueryProcessor::new(store(), index()).with_formatter(DocIdsOnlyFormatter::new());

        assert_eq!(processor.search("run", &thesaurus(), 2).unwrap(), vec!["d1", "d2"]);
        assert_eq!(processor.search("run", &thesaurus(), 1).unwrap(), vec!["d1"]);
        assert!(processor.search("run", &thesaurus(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_ranked_scores() {
        let processor = QueryProcessor::new(store(), index());
        let ranked = processor.ranked("run", &thesaurus(), 10).unwrap();

        assert_eq!(
            ranked,
            vec![ScoredDoc::new("d1", 9.0), ScoredDoc::new("d2", 3.0)]
        );
    }

    #[test]
    fn test_missing_document_fails_full_formatter_only() {
        let processor = QueryProcessor::new(InMemoryDocumentStore::new(), index());
        assert!(matches!(
            processor.search("run", &thesaurus(), 2),
            Err(SynrankError::NotFound(_))
        ));

        let processor = processor.with_formatter(Formatter::Ids);
        assert_eq!(
            processor.search("run", &thesaurus(), 2).unwrap(),
            FormattedOutput::Ids(vec!["d1".to_string(), "d2".to_string()])
        );
    }

    #[test]
    fn test_config_stopwords_and_default_k() {
        let config = SearchConfig {
            default_k: 1,
            stopwords: vec!["run".to_string()],
            ..Default::default()
        };
        let processor = QueryProcessor::new(store(), index())
            .with_formatter(DocIdsOnlyFormatter::new())
            .with_config(config);

        assert!(processor.search_default("run", &thesaurus()).unwrap().is_empty());
        assert_eq!(
            processor.search_default("run sprint", &thesaurus()).unwrap(),
            vec!["d2"]
        );
    }

    #[test]
    fn test_expand_query() {
        let processor = QueryProcessor::new(store(), index());
        let expanded = processor.expand_query("RUN", &thesaurus()).unwrap();

        assert_eq!(expanded.get("run").unwrap(), ["run", "sprint", "jog"]);
    }
}
