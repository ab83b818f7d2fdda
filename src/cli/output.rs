//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SynrankArgs};
use crate::error::Result;
use crate::expansion::TermExpansion;
use crate::output::FormattedOutput;
use crate::scoring::ranker::ScoredDoc;

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub k: usize,
    pub hits: Vec<ScoredDoc>,
    pub output: FormattedOutput,
    pub duration_ms: u64,
}

/// Result structure for query expansion.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpansionResult {
    pub query: String,
    pub terms: Vec<TermExpansion>,
}

/// Thesaurus statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct ThesaurusStats {
    pub path: String,
    pub terms: usize,
    pub synonyms: usize,
    pub average_synonyms: f64,
    pub load_duration_ms: u64,
}

/// Results that know how to print themselves for humans.
pub trait HumanReadable {
    /// Print this result in human-readable form.
    fn print_human(&self, args: &SynrankArgs);
}

impl HumanReadable for SearchResults {
    fn print_human(&self, args: &SynrankArgs) {
        match &self.output {
            FormattedOutput::Text(text) => print!("{text}"),
            FormattedOutput::Ids(_) => {
                for hit in &self.hits {
                    if args.verbosity() > 1 {
                        println!("{}\t{:.3}", hit.doc_id, hit.score);
                    } else {
                        println!("{}", hit.doc_id);
                    }
                }
            }
        }

        if args.verbosity() > 1 {
            println!();
            println!(
                "{} results (k = {}) in {} ms",
                self.hits.len(),
                self.k,
                self.duration_ms
            );
        }
    }
}

impl HumanReadable for ExpansionResult {
    fn print_human(&self, _args: &SynrankArgs) {
        if self.terms.is_empty() {
            println!("(no terms)");
        }
        for term in &self.terms {
            println!("{} -> {}", term.term(), term.expansion().join(", "));
        }
    }
}

impl HumanReadable for ThesaurusStats {
    fn print_human(&self, _args: &SynrankArgs) {
        println!("path: {}", self.path);
        println!("terms: {}", self.terms);
        println!("synonyms: {}", self.synonyms);
        println!("average_synonyms: {:.2}", self.average_synonyms);
        println!("load_duration_ms: {}", self.load_duration_ms);
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &SynrankArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanReadable>(message: &str, result: &T, args: &SynrankArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    result.print_human(args);
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SynrankArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}
