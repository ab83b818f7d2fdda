//! Stop filter implementation.
//!
//! Removes configured stop words from the token stream. Query expansion never
//! sees a removed word, so it contributes neither its own postings nor those
//! of its synonyms.
//!
//! # Examples
//!
//! ```
//! use synrank::analysis::token_filter::Filter;
//! use synrank::analysis::token_filter::stop::StopFilter;
//! use synrank::analysis::token::Token;
//!
//! let filter = StopFilter::from_words(vec!["the"]);
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("quick", 1),
//!     Token::new("brown", 2)
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "quick");
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default English stop words list.
pub const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// A filter that removes stop words from the token stream.
///
/// With `remove_stopped` disabled the words are only marked as stopped and
/// kept in the stream.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: Arc<HashSet<String>>,
    remove_stopped: bool,
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl StopFilter {
    /// Create a stop filter with the default English stop words.
    pub fn new() -> Self {
        Self::from_words(DEFAULT_ENGLISH_STOP_WORDS.iter().copied())
    }

    /// Create a stop filter with a custom word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopFilter {
            stop_words: Arc::new(words.into_iter().map(Into::into).collect()),
            remove_stopped: true,
        }
    }

    /// Keep stop words in the stream, marked as stopped.
    pub fn keep_stopped(mut self) -> Self {
        self.remove_stopped = false;
        self
    }

    /// Check whether a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Number of configured stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check whether the stop word list is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered: Vec<Token> = tokens
            .filter_map(|token| {
                if !self.is_stop_word(&token.text) {
                    Some(token)
                } else if self.remove_stopped {
                    None
                } else {
                    Some(token.stop())
                }
            })
            .collect();

        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
