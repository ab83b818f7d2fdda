//! Top-K selection over aggregated scores.
//!
//! Documents are ordered by score, highest first. Equal scores are broken by
//! document id in ascending byte order so that rankings are reproducible.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::scoring::aggregator::AggregatedScores;

/// A ranked document and its aggregated score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDoc {
    /// Document identifier.
    pub doc_id: String,
    /// Aggregated score.
    pub score: f64,
}

impl ScoredDoc {
    /// Create a new scored document.
    pub fn new<S: Into<String>>(doc_id: S, score: f64) -> Self {
        ScoredDoc {
            doc_id: doc_id.into(),
            score,
        }
    }

    /// Ranking order: higher score first, then lower doc id.
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

/// Heap entry whose `Ord` puts the worst-ranked document on top.
#[derive(Debug)]
struct HeapEntry(ScoredDoc);

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.rank_cmp(&other.0)
    }
}

/// A collector that keeps the best `k` documents seen so far.
#[derive(Debug)]
pub struct TopKCollector {
    /// Maximum number of documents to keep.
    k: usize,
    /// Kept documents; the worst one is at the top of the heap.
    hits: BinaryHeap<HeapEntry>,
    /// Total number of documents offered.
    total_hits: u64,
}

impl TopKCollector {
    /// Create a collector for the top `k` documents.
    pub fn new(k: usize) -> Self {
        TopKCollector {
            k,
            hits: BinaryHeap::with_capacity(k.min(1024)),
            total_hits: 0,
        }
    }

    /// Maximum number of documents kept.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Offer a document to the collector.
    pub fn collect(&mut self, doc_id: &str, score: f64) {
        self.total_hits += 1;

        if self.k == 0 {
            return;
        }

        if self.hits.len() < self.k {
            self.hits.push(HeapEntry(ScoredDoc::new(doc_id, score)));
            return;
        }

        // Replace the worst document if this one ranks ahead of it
        let candidate = ScoredDoc::new(doc_id, score);
        if let Some(worst) = self.hits.peek()
            && candidate.rank_cmp(&worst.0) == Ordering::Less
        {
            self.hits.pop();
            self.hits.push(HeapEntry(candidate));
        }
    }

    /// Score of the worst kept document once the collector is full.
    pub fn threshold(&self) -> Option<f64> {
        if self.hits.len() < self.k {
            None
        } else {
            self.hits.peek().map(|entry| entry.0.score)
        }
    }

    /// Total number of documents offered.
    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    /// Number of documents currently kept.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Check whether nothing is kept.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// The kept documents, best first.
    pub fn into_results(self) -> Vec<ScoredDoc> {
        self.hits
            .into_sorted_vec()
            .into_iter()
            .map(|entry| entry.0)
            .collect()
    }
}

/// Rank documents by aggregated score and keep the first `k`, with scores.
pub fn rank_scored(scores: &AggregatedScores, k: usize) -> Vec<ScoredDoc> {
    let mut collector = TopKCollector::new(k);
    for (doc_id, score) in scores.iter() {
        collector.collect(doc_id, score);
    }
    collector.into_results()
}

/// Rank documents by aggregated score and keep the first `k` ids.
///
/// Returns every scored document when fewer than `k` exist, and nothing
/// when `k` is zero.
pub fn rank(scores: &AggregatedScores, k: usize) -> Vec<String> {
    rank_scored(scores, k)
        .into_iter()
        .map(|doc| doc.doc_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(&str, f64)]) -> AggregatedScores {
        entries.iter().map(|&(d, s)| (d.to_string(), s)).collect()
    }

    #[test]
    fn test_rank_descending() {
        let scores = scores(&[("d1", 1.0), ("d2", 5.0), ("d3", 3.0)]);
        assert_eq!(rank(&scores, 10), vec!["d2", "d3", "d1"]);
    }

    #[test]
    fn test_rank_truncates() {
        let scores = scores(&[("d1", 1.0), ("d2", 5.0), ("d3", 3.0)]);
        assert_eq!(rank(&scores, 2), vec!["d2", "d3"]);
        assert_eq!(rank(&scores, 1), vec!["d2"]);
    }

    #[test]
    fn test_rank_zero_k() {
        let scores = scores(&[("d1", 1.0)]);
        assert!(rank(&scores, 0).is_empty());
    }

    #[test]
    fn test_rank_empty_scores() {
        assert!(rank(&AggregatedScores::new(), 5).is_empty());
    }

    #[test]
    fn test_ties_break_by_doc_id() {
        let scores = scores(&[("d3", 2.0), ("d1", 2.0), ("d2", 2.0), ("d0", 1.0)]);
        assert_eq!(rank(&scores, 4), vec!["d1", "d2", "d3", "d0"]);
        assert_eq!(rank(&scores, 2), vec!["d1", "d2"]);
    }

    #[test]
    fn test_rank_scored_is_non_increasing() {
        let entries: Vec<(String, f64)> = (0..50)
            .map(|i| (format!("doc{i:02}"), ((i * 37) % 11) as f64 * 0.5))
            .collect();
        let scores: AggregatedScores = entries.into_iter().collect();

        let ranked = rank_scored(&scores, 20);
        assert_eq!(ranked.len(), 20);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                assert!(pair[0].doc_id < pair[1].doc_id);
            }
        }
    }

    #[test]
    fn test_collector_threshold() {
        let mut collector = TopKCollector::new(2);
        collector.collect("a", 1.0);
        assert_eq!(collector.threshold(), None);

        collector.collect("b", 3.0);
        assert_eq!(collector.threshold(), Some(1.0));

        collector.collect("c", 2.0);
        assert_eq!(collector.threshold(), Some(2.0));
        assert_eq!(collector.total_hits(), 3);
        assert_eq!(collector.len(), 2);

        let results = collector.into_results();
        assert_eq!(results, vec![ScoredDoc::new("b", 3.0), ScoredDoc::new("c", 2.0)]);
    }

    #[test]
    fn test_collector_keeps_smaller_id_on_tie() {
        let mut collector = TopKCollector::new(1);
        collector.collect("d9", 1.0);
        collector.collect("d1", 1.0);
        collector.collect("d5", 1.0);

        assert_eq!(collector.into_results(), vec![ScoredDoc::new("d1", 1.0)]);
    }
}
