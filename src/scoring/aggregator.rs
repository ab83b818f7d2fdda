//! Multi-list score aggregation over an expanded query.
//!
//! For every query term the aggregator looks up the term's own postings, then
//! walks the term's expansion list (the term itself first, then each synonym).
//! Each synonym's postings are combined with the term's postings and the
//! combined scores are added to the running total.
//!
//! Because the term's postings are recombined with every element of its
//! expansion list, a term's own score is counted once per element of that
//! list. With `run -> [run, sprint, jog]` a document that only matches `run`
//! with score 2.0 ends up with 2.0 * 4: twice from pairing `run` with itself
//! and once each for `sprint` and `jog`. Rankings depend on this weighting, so
//! it is kept as is.
//!
//! # Examples
//!
//! ```
//! use synrank::expansion::expand_terms;
//! use synrank::index::Posting;
//! use synrank::scoring::aggregate;
//! use synrank::thesaurus::{Thesaurus, ThesaurusRecord};
//!
//! let thesaurus = Thesaurus::from_records(vec![ThesaurusRecord::new(
//!     "run",
//!     vec!["sprint".to_string(), "jog".to_string()],
//! )]);
//! let index = |term: &str| -> Vec<Posting> {
//!     match term {
//!         "run" => vec![Posting::new("d1", 2.0)],
//!         "sprint" => vec![Posting::new("d1", 1.0), Posting::new("d2", 3.0)],
//!         _ => Vec::new(),
//!     }
//! };
//!
//! let scores = aggregate(&expand_terms(["run"], &thesaurus), &index);
//! assert_eq!(scores.get("d1"), Some(9.0));
//! assert_eq!(scores.get("d2"), Some(3.0));
//! ```

use ahash::AHashMap;
use log::debug;
use rayon::prelude::*;

use crate::expansion::{ExpandedQuery, TermExpansion};
use crate::index::{Posting, TermIndex};

/// Combine two posting lists, summing the scores of documents that appear
/// more than once.
///
/// Documents keep the position of their first appearance, scanning `entries1`
/// then `entries2`.
pub fn combine_entries(entries1: &[Posting], entries2: &[Posting]) -> Vec<Posting> {
    let mut positions: AHashMap<&str, usize> = AHashMap::new();
    let mut combined: Vec<Posting> = Vec::with_capacity(entries1.len() + entries2.len());

    for posting in entries1.iter().chain(entries2) {
        match positions.get(posting.doc_id.as_str()) {
            Some(&position) => combined[position].score += posting.score,
            None => {
                positions.insert(posting.doc_id.as_str(), combined.len());
                combined.push(posting.clone());
            }
        }
    }

    combined
}

/// Accumulated score per document for a single search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedScores {
    scores: AHashMap<String, f64>,
}

impl AggregatedScores {
    /// Create an empty score table.
    pub fn new() -> Self {
        AggregatedScores {
            scores: AHashMap::new(),
        }
    }

    /// Add `score` to a document's total, starting from zero.
    pub fn add(&mut self, doc_id: &str, score: f64) {
        match self.scores.get_mut(doc_id) {
            Some(total) => *total += score,
            None => {
                self.scores.insert(doc_id.to_string(), score);
            }
        }
    }

    /// Fold another table into this one.
    pub fn merge(&mut self, other: AggregatedScores) {
        for (doc_id, score) in other.scores {
            *self.scores.entry(doc_id).or_insert(0.0) += score;
        }
    }

    /// Total score of a document, if it was scored at all.
    pub fn get(&self, doc_id: &str) -> Option<f64> {
        self.scores.get(doc_id).copied()
    }

    /// Iterate over (document id, score) pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(doc_id, &score)| (doc_id.as_str(), score))
    }

    /// Sum of all document totals.
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    /// Number of scored documents.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Check whether no document was scored.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl FromIterator<(String, f64)> for AggregatedScores {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut scores = AggregatedScores::new();
        for (doc_id, score) in iter {
            scores.add(&doc_id, score);
        }
        scores
    }
}

/// Merges postings across all terms and synonyms of an expanded query.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAggregator {
    parallel: bool,
}

impl ScoreAggregator {
    /// Create a sequential aggregator.
    pub fn new() -> Self {
        ScoreAggregator { parallel: false }
    }

    /// Process query terms on the rayon pool.
    ///
    /// Each term is accumulated into a worker-local table; the tables are then
    /// folded into the result one at a time in query-term order.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether terms are processed in parallel.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Aggregate the scores of every document matched by the expansion.
    pub fn aggregate<I>(&self, expanded: &ExpandedQuery, index: &I) -> AggregatedScores
    where
        I: TermIndex + ?Sized,
    {
        let scores = if self.parallel && expanded.len() > 1 {
            let per_term: Vec<AggregatedScores> = expanded
                .as_slice()
                .par_iter()
                .map(|term| {
                    let mut local = AggregatedScores::new();
                    accumulate_term(term, index, &mut local);
                    local
                })
                .collect();

            let mut scores = AggregatedScores::new();
            for local in per_term {
                scores.merge(local);
            }
            scores
        } else {
            let mut scores = AggregatedScores::new();
            for term in expanded {
                accumulate_term(term, index, &mut scores);
            }
            scores
        };

        debug!(
            "Aggregated {} lookups over {} terms into {} scored documents",
            expanded.lookup_count(),
            expanded.len(),
            scores.len()
        );

        scores
    }
}

/// Aggregate sequentially with a default [`ScoreAggregator`].
pub fn aggregate<I>(expanded: &ExpandedQuery, index: &I) -> AggregatedScores
where
    I: TermIndex + ?Sized,
{
    ScoreAggregator::new().aggregate(expanded, index)
}

fn accumulate_term<I>(term: &TermExpansion, index: &I, scores: &mut AggregatedScores)
where
    I: TermIndex + ?Sized,
{
    let term_entries = index.lookup(term.term());

    for synonym in term.expansion() {
        let synonym_entries = index.lookup(synonym);
        for posting in combine_entries(&term_entries, &synonym_entries) {
            scores.add(&posting.doc_id, posting.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::expansion::expand_terms;
    use crate::index::InMemoryIndex;
    use crate::thesaurus::{Thesaurus, ThesaurusRecord};

    fn postings(entries: &[(&str, f64)]) -> Vec<Posting> {
        entries.iter().map(|&(d, s)| Posting::new(d, s)).collect()
    }

    fn run_fixture() -> (Thesaurus, InMemoryIndex) {
        let thesaurus = Thesaurus::from_records(vec![
            ThesaurusRecord::new("run", vec!["sprint".to_string(), "jog".to_string()]),
            ThesaurusRecord::new("fast", vec!["quick".to_string()]),
        ]);

        let mut index = InMemoryIndex::new();
        index.insert("run", postings(&[("d1", 2.0)]));
        index.insert("sprint", postings(&[("d1", 1.0), ("d2", 3.0)]));
        index.insert("fast", postings(&[("d3", 0.5)]));
        index.insert("quick", postings(&[("d2", 0.25), ("d3", 1.0)]));

        (thesaurus, index)
    }

    #[test]
    fn test_combine_entries_sums_shared_documents() {
        let combined = combine_entries(
            &postings(&[("d1", 2.0), ("d2", 1.0)]),
            &postings(&[("d2", 0.5), ("d3", 4.0)]),
        );

        assert_eq!(combined, postings(&[("d1", 2.0), ("d2", 1.5), ("d3", 4.0)]));
    }

    #[test]
    fn test_combine_entries_preserves_total() {
        let l1 = postings(&[("a", 0.5), ("b", 1.25), ("a", 2.0)]);
        let l2 = postings(&[("b", 0.75), ("c", 3.0)]);
        let combined = combine_entries(&l1, &l2);

        let total: f64 = combined.iter().map(|p| p.score).sum();
        let expected: f64 = l1.iter().chain(&l2).map(|p| p.score).sum();
        assert_eq!(total, expected);
        assert_eq!(combined.len(), 3);
    }

    #[test]
    fn test_combine_entries_empty() {
        assert!(combine_entries(&[], &[]).is_empty());
        assert_eq!(
            combine_entries(&postings(&[("d1", 1.0)]), &[]),
            postings(&[("d1", 1.0)])
        );
    }

    #[test]
    fn test_base_term_counted_per_expansion_entry() {
        let (thesaurus, index) = run_fixture();
        let scores = aggregate(&expand_terms(["run"], &thesaurus), &index);

        // (run, run) = 4.0, (run, sprint) = 3.0, (run, jog) = 2.0
        assert_eq!(scores.get("d1"), Some(9.0));
        assert_eq!(scores.get("d2"), Some(3.0));
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn test_multiple_terms_accumulate() {
        let (thesaurus, index) = run_fixture();
        let scores = aggregate(&expand_terms(["run", "fast"], &thesaurus), &index);

        // fast: (fast, fast) d3 = 1.0; (fast, quick) d3 = 1.5, d2 = 0.25
        assert_eq!(scores.get("d1"), Some(9.0));
        assert_eq!(scores.get("d2"), Some(3.25));
        assert_eq!(scores.get("d3"), Some(2.5));
    }

    #[test]
    fn test_unknown_terms_score_nothing() {
        let (_, index) = run_fixture();
        let scores = aggregate(&expand_terms(["xyz"], &Thesaurus::new()), &index);
        assert!(scores.is_empty());

        let scores = aggregate(&ExpandedQuery::new(), &index);
        assert!(scores.is_empty());
        assert_eq!(scores.total(), 0.0);
    }

    #[test]
    fn test_lookup_count() {
        let (thesaurus, index) = run_fixture();
        let calls = AtomicUsize::new(0);
        let counting = |term: &str| -> Vec<Posting> {
            calls.fetch_add(1, Ordering::SeqCst);
            index.lookup(term)
        };

        aggregate(&expand_terms(["run", "fast"], &thesaurus), &counting);

        // One base lookup per term plus one per expansion entry.
        assert_eq!(calls.load(Ordering::SeqCst), 2 + 5);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (thesaurus, index) = run_fixture();
        let expanded = expand_terms(["run", "fast", "sprint"], &thesaurus);

        let sequential = ScoreAggregator::new().aggregate(&expanded, &index);
        let parallel = ScoreAggregator::new()
            .with_parallel(true)
            .aggregate(&expanded, &index);

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_merge() {
        let mut a: AggregatedScores = vec![("d1".to_string(), 1.0)].into_iter().collect();
        let b: AggregatedScores = vec![("d1".to_string(), 2.0), ("d2".to_string(), 0.5)]
            .into_iter()
            .collect();
        a.merge(b);

        assert_eq!(a.get("d1"), Some(3.0));
        assert_eq!(a.get("d2"), Some(0.5));
        assert_eq!(a.total(), 3.5);
    }
}
