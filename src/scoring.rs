//! Score aggregation and ranking.
//!
//! - [`aggregator`] - merges the postings of every expanded term into one
//!   per-document score total
//! - [`ranker`] - selects the top-K documents from the aggregated scores

pub mod aggregator;
pub mod ranker;

pub use aggregator::{AggregatedScores, ScoreAggregator, aggregate, combine_entries};
pub use ranker::{ScoredDoc, TopKCollector, rank, rank_scored};
