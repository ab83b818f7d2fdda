//! Query text analysis.
//!
//! Turns raw query text into the ordered list of normalized terms that query
//! expansion works on. The pipeline is a [`tokenizer::Tokenizer`] followed by
//! any number of [`token_filter::Filter`]s, assembled by
//! [`analyzer::pipeline::PipelineAnalyzer`].
//!
//! # Examples
//!
//! ```
//! use synrank::analysis::analyzer::Analyzer;
//! use synrank::analysis::analyzer::pipeline::PipelineAnalyzer;
//!
//! let analyzer = PipelineAnalyzer::standard(&["the"]);
//! let terms = analyzer.terms("Run, the FAST dog").unwrap();
//! assert_eq!(terms, vec!["run", "fast", "dog"]);
//! ```

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
