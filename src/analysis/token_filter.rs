//! Token filters applied after tokenization.
//!
//! - [`lowercase::LowercaseFilter`] - Case folding
//! - [`stop::StopFilter`] - Stop word removal

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod lowercase;
pub mod stop;

/// Trait for filters that transform token streams.
///
/// Filters receive a stream of tokens and produce a new stream, which lets
/// them modify or drop tokens. Requires `Send + Sync` for shared use.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter.
    fn name(&self) -> &'static str;
}
