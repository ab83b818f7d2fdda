//! Analyzers turn query text into normalized terms.

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod pipeline;

/// Trait for analyzers that run a full tokenize-and-filter pipeline.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text into a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer.
    fn name(&self) -> &str;

    /// Analyze text and return the surviving term texts in query order.
    ///
    /// Tokens still marked as stopped are skipped.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .analyze(text)?
            .filter(|token| !token.is_stopped())
            .map(|token| token.text)
            .collect())
    }
}
