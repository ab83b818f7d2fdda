//! Configuration for query processing.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::TokenizerKind;
use crate::error::{Result, SynrankError};

/// Configuration for a [`QueryProcessor`](crate::query_process::QueryProcessor).
///
/// Missing fields in a JSON config file take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of results returned when the caller does not ask for a count.
    pub default_k: usize,
    /// Tokenizer used to split queries into terms.
    pub tokenizer: TokenizerKind,
    /// Lowercase query terms before thesaurus and index lookups.
    pub lowercase: bool,
    /// Query terms dropped before expansion.
    pub stopwords: Vec<String>,
    /// Aggregate query terms on the rayon pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_k: 10,
            tokenizer: TokenizerKind::UnicodeWord,
            lowercase: true,
            stopwords: Vec::new(),
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SynrankError::invalid_config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Reject configurations that cannot produce results.
    pub fn validate(&self) -> Result<()> {
        if let Some(word) = self.stopwords.iter().find(|w| w.trim().is_empty()) {
            return Err(SynrankError::invalid_config(format!(
                "stopwords must not contain blank entries (got {word:?})"
            )));
        }
        Ok(())
    }

    /// Build the query analyzer this configuration describes.
    pub fn build_analyzer(&self) -> PipelineAnalyzer {
        let mut analyzer = PipelineAnalyzer::new(self.tokenizer.build());

        if self.lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }
        if !self.stopwords.is_empty() {
            analyzer = analyzer.add_filter(Arc::new(StopFilter::from_words(
                self.stopwords.iter().cloned(),
            )));
        }

        analyzer
    }
}
