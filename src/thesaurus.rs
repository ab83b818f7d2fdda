//! Thesaurus mapping terms to their synonyms.
//!
//! The thesaurus is loaded once from a JSON-lines source, one record per line:
//!
//! ```jsonl
//! {"term": "run", "syns": ["sprint", "jog"]}
//! {"term": "fast", "syns": ["quick", "rapid"]}
//! ```
//!
//! Mappings are directional: `run -> [sprint, jog]` says nothing about what
//! `sprint` expands to. When several records name the same term, the last one
//! wins. A single malformed record fails the whole load; there is no partial
//! thesaurus.
//!
//! # Examples
//!
//! ```
//! use synrank::thesaurus::Thesaurus;
//!
//! let source = "{\"term\": \"run\", \"syns\": [\"sprint\", \"jog\"]}\n";
//! let thesaurus = Thesaurus::from_reader(source.as_bytes()).unwrap();
//!
//! assert_eq!(thesaurus.synonyms("run"), ["sprint", "jog"]);
//! assert!(thesaurus.synonyms("walk").is_empty());
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynrankError};

/// A single line of a thesaurus source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThesaurusRecord {
    /// The headword.
    pub term: String,
    /// Its synonyms, in the order they should be searched.
    pub syns: Vec<String>,
}

impl ThesaurusRecord {
    /// Create a new record.
    pub fn new<S: Into<String>>(term: S, syns: Vec<String>) -> Self {
        ThesaurusRecord {
            term: term.into(),
            syns,
        }
    }
}

/// Term to synonym-list mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thesaurus {
    entries: HashMap<String, Vec<String>>,
}

impl Thesaurus {
    /// Create an empty thesaurus.
    pub fn new() -> Self {
        Thesaurus {
            entries: HashMap::new(),
        }
    }

    /// Build a thesaurus from records. Later records replace earlier ones.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ThesaurusRecord>,
    {
        let mut thesaurus = Thesaurus::new();
        for record in records {
            thesaurus.insert(record.term, record.syns);
        }
        thesaurus
    }

    /// Read a JSON-lines thesaurus until end of input.
    ///
    /// Whitespace-only lines are skipped. Any other line that is not a valid
    /// record fails the load with the 1-based line number.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut thesaurus = Thesaurus::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: ThesaurusRecord = serde_json::from_str(&line).map_err(|e| {
                SynrankError::thesaurus(format!(
                    "Malformed thesaurus record on line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if let Some(previous) = thesaurus.insert(record.term.clone(), record.syns) {
                debug!(
                    "Thesaurus term '{}' redefined on line {} (dropped {} synonyms)",
                    record.term,
                    line_num + 1,
                    previous.len()
                );
            }
        }

        Ok(thesaurus)
    }

    /// Load a JSON-lines thesaurus file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SynrankError::thesaurus(format!(
                "Failed to open thesaurus file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let thesaurus = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded thesaurus with {} terms from '{}'",
            thesaurus.len(),
            path.display()
        );

        Ok(thesaurus)
    }

    /// Set the synonyms of a term, returning the previous list if any.
    pub fn insert<S: Into<String>>(&mut self, term: S, syns: Vec<String>) -> Option<Vec<String>> {
        self.entries.insert(term.into(), syns)
    }

    /// Get the synonym list of a term, if the thesaurus knows it.
    pub fn get_synonyms(&self, term: &str) -> Option<&Vec<String>> {
        self.entries.get(term)
    }

    /// Synonyms of a term; empty for unknown terms.
    pub fn synonyms(&self, term: &str) -> &[String] {
        self.entries.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check whether the thesaurus has an entry for a term.
    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    /// Iterate over the headwords (unordered).
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Total number of synonyms across all entries.
    pub fn synonym_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Number of headwords.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the thesaurus is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ThesaurusRecord> for Thesaurus {
    fn from_iter<I: IntoIterator<Item = ThesaurusRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
