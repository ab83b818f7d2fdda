//! Tokenizer implementations for query text.
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`unicode_word::UnicodeWordTokenizer`] - Uses Unicode word boundaries
//!
//! # Examples
//!
//! ```
//! use synrank::analysis::tokenizer::Tokenizer;
//! use synrank::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod unicode_word;
pub mod whitespace;

/// Trait for tokenizers that convert text into tokens.
///
/// Requires `Send + Sync` so a tokenizer can be shared by concurrent searches.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Tokenizer selection used by configuration and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Unicode word boundaries (UAX #29), punctuation dropped.
    #[default]
    UnicodeWord,
    /// Plain whitespace splitting.
    Whitespace,
}

impl TokenizerKind {
    /// Build the tokenizer this kind names.
    pub fn build(self) -> Arc<dyn Tokenizer> {
        match self {
            TokenizerKind::UnicodeWord => Arc::new(unicode_word::UnicodeWordTokenizer::new()),
            TokenizerKind::Whitespace => Arc::new(whitespace::WhitespaceTokenizer::new()),
        }
    }
}
