//! Command implementations for the Synrank CLI.

use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::SearchConfig;
use crate::document::InMemoryDocumentStore;
use crate::error::{Result, SynrankError};
use crate::expansion::QueryExpander;
use crate::index::InMemoryIndex;
use crate::output::{Formatter, OutputFormatter};
use crate::query_process::QueryProcessor;
use crate::thesaurus::Thesaurus;

/// Execute a CLI command.
pub fn execute_command(args: SynrankArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search(search_args.clone(), &args),
        Command::Expand(expand_args) => expand(expand_args.clone(), &args),
        Command::Thesaurus(thesaurus_args) => thesaurus_stats(thesaurus_args.clone(), &args),
    }
}

/// Load the search configuration, or the default when no file is given.
fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    match path {
        Some(path) => {
            debug!("Loading search config from: {}", path.display());
            SearchConfig::load_from_file(path)
        }
        None => Ok(SearchConfig::default()),
    }
}

/// Run a search and print the formatted results.
fn search(args: SearchArgs, cli_args: &SynrankArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if args.parallel {
        config.parallel = true;
    }

    let formatter = Formatter::from(args.formatter);
    let document_store = match (&args.documents, formatter) {
        (Some(path), _) => InMemoryDocumentStore::load_from_file(path)?,
        (None, Formatter::Full) => {
            return Err(SynrankError::invalid_argument(
                "--documents is required by the full formatter (use --formatter ids to skip it)",
            ));
        }
        (None, Formatter::Ids) => InMemoryDocumentStore::new(),
    };

    let thesaurus = Thesaurus::load_from_file(&args.thesaurus)?;
    let index = InMemoryIndex::load_from_file(&args.index)?;

    let k = args.requested_k().unwrap_or(config.default_k);
    let processor = QueryProcessor::new(document_store, index)
        .with_config(config)
        .with_formatter(formatter);

    let start_time = Instant::now();
    let hits = processor.ranked(&args.query, &thesaurus, k)?;
    let ids: Vec<String> = hits.iter().map(|hit| hit.doc_id.clone()).collect();
    let output = processor
        .output_formatter()
        .format_out(&ids, processor.document_store())?;
    let duration = start_time.elapsed();

    info!("Search returned {} of at most {} results", hits.len(), k);

    output_result(
        "Search completed",
        &SearchResults {
            query: args.query,
            k,
            hits,
            output,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Print how a query expands.
fn expand(args: ExpandArgs, cli_args: &SynrankArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let thesaurus = Thesaurus::load_from_file(&args.thesaurus)?;

    let expander = QueryExpander::new(std::sync::Arc::new(config.build_analyzer()));
    let expanded = expander.expand(&args.query, &thesaurus)?;

    output_result(
        "Query expansion",
        &ExpansionResult {
            query: args.query,
            terms: expanded.iter().cloned().collect(),
        },
        cli_args,
    )
}

/// Load a thesaurus and print statistics about it.
fn thesaurus_stats(args: ThesaurusArgs, cli_args: &SynrankArgs) -> Result<()> {
    let start_time = Instant::now();
    let thesaurus = Thesaurus::load_from_file(&args.path)?;
    let duration = start_time.elapsed();

    let terms = thesaurus.len();
    let synonyms = thesaurus.synonym_count();
    let average_synonyms = if terms == 0 {
        0.0
    } else {
        synonyms as f64 / terms as f64
    };

    output_result(
        "Thesaurus statistics",
        &ThesaurusStats {
            path: args.path.to_string_lossy().to_string(),
            terms,
            synonyms,
            average_synonyms,
            load_duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}
