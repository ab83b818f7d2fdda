//! Thesaurus-based query expansion.
//!
//! Every distinct query term is mapped to the list of terms searched in its
//! place: the term itself first, then its thesaurus synonyms in thesaurus
//! order. Repeated query terms collapse into the entry created by their first
//! occurrence.
//!
//! # Examples
//!
//! ```
//! use synrank::expansion::QueryExpander;
//! use synrank::thesaurus::{Thesaurus, ThesaurusRecord};
//!
//! let thesaurus = Thesaurus::from_records(vec![ThesaurusRecord::new(
//!     "run",
//!     vec!["sprint".to_string(), "jog".to_string()],
//! )]);
//!
//! let expanded = QueryExpander::default().expand("run fast run", &thesaurus).unwrap();
//!
//! assert_eq!(expanded.len(), 2);
//! assert_eq!(expanded.get("run").unwrap(), ["run", "sprint", "jog"]);
//! assert_eq!(expanded.get("fast").unwrap(), ["fast"]);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::error::Result;
use crate::thesaurus::Thesaurus;

/// One query term and everything it expands to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermExpansion {
    term: String,
    expansion: Vec<String>,
}

impl TermExpansion {
    /// Expansion of `term`: the term followed by `synonyms`.
    pub fn new<S: Into<String>>(term: S, synonyms: &[String]) -> Self {
        let term = term.into();
        let mut expansion = Vec::with_capacity(synonyms.len() + 1);
        expansion.push(term.clone());
        expansion.extend(synonyms.iter().cloned());
        TermExpansion { term, expansion }
    }

    /// The query term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The term followed by its synonyms. Never empty.
    pub fn expansion(&self) -> &[String] {
        &self.expansion
    }

    /// Synonyms only, without the term itself.
    pub fn synonyms(&self) -> &[String] {
        &self.expansion[1..]
    }
}

/// Per-term expansion of a query, in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpandedQuery {
    terms: Vec<TermExpansion>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl ExpandedQuery {
    /// Create an empty expansion.
    pub fn new() -> Self {
        ExpandedQuery::default()
    }

    /// Add a term unless it is already present. Returns `true` when added.
    pub fn push(&mut self, expansion: TermExpansion) -> bool {
        if self.positions.contains_key(expansion.term()) {
            return false;
        }
        self.positions
            .insert(expansion.term().to_string(), self.terms.len());
        self.terms.push(expansion);
        true
    }

    /// Expansion list of a term, starting with the term itself.
    pub fn get(&self, term: &str) -> Option<&[String]> {
        self.positions
            .get(term)
            .map(|&position| self.terms[position].expansion())
    }

    /// Iterate over the term expansions in query order.
    pub fn iter(&self) -> std::slice::Iter<'_, TermExpansion> {
        self.terms.iter()
    }

    /// The term expansions as a slice, in query order.
    pub fn as_slice(&self) -> &[TermExpansion] {
        &self.terms
    }

    /// The distinct query terms in query order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(TermExpansion::term)
    }

    /// Number of distinct query terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check whether the query produced no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total number of lookups the expansion asks for, the terms included.
    pub fn lookup_count(&self) -> usize {
        self.terms.iter().map(|t| t.expansion.len()).sum()
    }
}

impl<'a> IntoIterator for &'a ExpandedQuery {
    type Item = &'a TermExpansion;
    type IntoIter = std::slice::Iter<'a, TermExpansion>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// Expand already-analyzed terms against a thesaurus.
pub fn expand_terms<I, S>(terms: I, thesaurus: &Thesaurus) -> ExpandedQuery
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut expanded = ExpandedQuery::new();
    for term in terms {
        let term = term.as_ref();
        if expanded.get(term).is_none() {
            expanded.push(TermExpansion::new(term, thesaurus.synonyms(term)));
        }
    }
    expanded
}

/// Turns raw query text into an [`ExpandedQuery`].
#[derive(Clone)]
pub struct QueryExpander {
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for QueryExpander {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryExpander")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl Default for QueryExpander {
    fn default() -> Self {
        Self::new(Arc::new(PipelineAnalyzer::default()))
    }
}

impl QueryExpander {
    /// Create an expander that tokenizes with the given analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        QueryExpander { analyzer }
    }

    /// Get the analyzer used to tokenize queries.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Tokenize `query` and expand every distinct term with its synonyms.
    pub fn expand(&self, query: &str, thesaurus: &Thesaurus) -> Result<ExpandedQuery> {
        let terms = self.analyzer.terms(query)?;
        let expanded = expand_terms(&terms, thesaurus);

        debug!(
            "Expanded {} query terms ({} distinct) into {} lookups",
            terms.len(),
            expanded.len(),
            expanded.lookup_count()
        );

        Ok(expanded)
    }
}
