//! Command line argument parsing for the Synrank CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::output::Formatter;

/// Synrank - thesaurus-expanded lexical search
#[derive(Parser, Debug, Clone)]
#[command(name = "synrank")]
#[command(about = "Thesaurus-expanded lexical search over scored postings")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SynrankArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SynrankArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search the index with a thesaurus-expanded query
    Search(SearchArgs),

    /// Show how a query expands against a thesaurus
    Expand(ExpandArgs),

    /// Load a thesaurus and show its statistics
    Thesaurus(ThesaurusArgs),
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Thesaurus file (JSON lines of {"term", "syns"})
    #[arg(short, long, value_name = "THESAURUS_FILE", env = "SYNRANK_THESAURUS")]
    pub thesaurus: PathBuf,

    /// Postings file (JSON lines of {"term", "postings"})
    #[arg(short, long, value_name = "INDEX_FILE", env = "SYNRANK_INDEX")]
    pub index: PathBuf,

    /// Document file (JSON lines of {"doc_id", "text"}), needed by the full formatter
    #[arg(short, long, value_name = "DOCUMENT_FILE", env = "SYNRANK_DOCUMENTS")]
    pub documents: Option<PathBuf>,

    /// Maximum number of results; zero or negative returns nothing
    #[arg(short = 'k', long = "top-k", allow_negative_numbers = true)]
    pub k: Option<i64>,

    /// How ranked results are rendered
    #[arg(long, default_value = "full")]
    pub formatter: FormatterArg,

    /// Search configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Aggregate query terms in parallel
    #[arg(long)]
    pub parallel: bool,
}

impl SearchArgs {
    /// Result count requested on the command line, with negatives mapped to zero.
    pub fn requested_k(&self) -> Option<usize> {
        self.k.map(|k| usize::try_from(k).unwrap_or(0))
    }
}

/// Arguments for showing a query expansion
#[derive(Parser, Debug, Clone)]
pub struct ExpandArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Thesaurus file (JSON lines of {"term", "syns"})
    #[arg(short, long, value_name = "THESAURUS_FILE", env = "SYNRANK_THESAURUS")]
    pub thesaurus: PathBuf,

    /// Search configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for thesaurus statistics
#[derive(Parser, Debug, Clone)]
pub struct ThesaurusArgs {
    /// Thesaurus file (JSON lines of {"term", "syns"})
    #[arg(value_name = "THESAURUS_FILE")]
    pub path: PathBuf,
}

/// Output formatter choices
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterArg {
    /// "(id) text" blocks hydrated from the document file
    Full,
    /// Ranked document ids only
    Ids,
}

impl From<FormatterArg> for Formatter {
    fn from(arg: FormatterArg) -> Self {
        match arg {
            FormatterArg::Full => Formatter::Full,
            FormatterArg::Ids => Formatter::Ids,
        }
    }
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
