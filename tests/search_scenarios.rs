use std::io::Cursor;

use synrank::document::{Document, InMemoryDocumentStore};
use synrank::error::{Result, SynrankError};
use synrank::expansion::expand_terms;
use synrank::index::{InMemoryIndex, Posting, TermIndex};
use synrank::output::{DocIdsOnlyFormatter, Formatter, FormattedOutput};
use synrank::query_process::QueryProcessor;
use synrank::scoring::{ScoreAggregator, ScoredDoc, aggregate, rank};
use synrank::thesaurus::{Thesaurus, ThesaurusRecord};

fn running_thesaurus() -> Thesaurus {
    Thesaurus::from_records(vec![ThesaurusRecord::new(
        "run",
        vec!["sprint".to_string(), "jog".to_string()],
    )])
}

fn running_index() -> InMemoryIndex {
    let mut index = InMemoryIndex::new();
    index.insert("run", vec![Posting::new("d1", 2.0)]);
    index.insert(
        "sprint",
        vec![Posting::new("d1", 1.0), Posting::new("d2", 3.0)],
    );
    index
}

fn running_documents() -> InMemoryDocumentStore {
    vec![
        Document::new("d1", "Morning run along the river."),
        Document::new("d2", "Hill sprint intervals."),
        Document::new("d3", "Unrelated notes."),
    ]
    .into_iter()
    .collect()
}

#[test]
fn base_term_postings_are_counted_for_every_expansion_entry() -> Result<()> {
    let processor = QueryProcessor::new(running_documents(), running_index());
    let ranked = processor.ranked("run", &running_thesaurus(), 2)?;

    assert_eq!(
        ranked,
        vec![ScoredDoc::new("d1", 9.0), ScoredDoc::new("d2", 3.0)]
    );
    Ok(())
}

#[test]
fn full_documents_formatter_renders_ranked_blocks() -> Result<()> {
    let processor = QueryProcessor::new(running_documents(), running_index());
    let out = processor.search("run", &running_thesaurus(), 2)?;

    assert_eq!(
        out,
        "(d1) Morning run along the river.\n\n(d2) Hill sprint intervals.\n\n"
    );
    Ok(())
}

#[test]
fn doc_ids_formatter_respects_k() -> Result<()> {
    let processor = QueryProcessor::new(running_documents(), running_index())
        .with_formatter(DocIdsOnlyFormatter::new());

    assert_eq!(processor.search("run", &running_thesaurus(), 10)?, vec!["d1", "d2"]);
    assert_eq!(processor.search("run", &running_thesaurus(), 1)?, vec!["d1"]);
    assert!(processor.search("run", &running_thesaurus(), 0)?.is_empty());
    Ok(())
}

#[test]
fn empty_and_unknown_queries_return_nothing() -> Result<()> {
    let processor = QueryProcessor::new(running_documents(), running_index());

    assert_eq!(processor.search("", &running_thesaurus(), 5)?, "");
    assert_eq!(processor.search("   \t ", &running_thesaurus(), 5)?, "");
    assert_eq!(processor.search("swim", &running_thesaurus(), 5)?, "");
    Ok(())
}

#[test]
fn repeated_query_terms_are_scored_once() -> Result<()> {
    let processor = QueryProcessor::new(running_documents(), running_index());

    assert_eq!(
        processor.ranked("run run RUN", &running_thesaurus(), 5)?,
        processor.ranked("run", &running_thesaurus(), 5)?
    );
    Ok(())
}

#[test]
fn term_without_synonyms_uses_its_own_postings_twice() -> Result<()> {
    let processor = QueryProcessor::new(running_documents(), running_index());
    let ranked = processor.ranked("sprint", &running_thesaurus(), 5)?;

    // Expansion of "sprint" is ["sprint"], so its postings are combined with themselves.
    assert_eq!(
        ranked,
        vec![ScoredDoc::new("d2", 6.0), ScoredDoc::new("d1", 2.0)]
    );
    Ok(())
}

#[test]
fn missing_document_fails_only_when_text_is_needed() -> Result<()> {
    let mut index = running_index();
    index.insert("jog", vec![Posting::new("d9", 1.0)]);

    let processor = QueryProcessor::new(running_documents(), index);
    assert!(matches!(
        processor.search("run", &running_thesaurus(), 5),
        Err(SynrankError::NotFound(_))
    ));

    let processor = processor.with_formatter(Formatter::Ids);
    match processor.search("run", &running_thesaurus(), 5)? {
        FormattedOutput::Ids(ids) => assert_eq!(ids.len(), 3),
        other => panic!("Expected ids, got {other:?}"),
    }
    Ok(())
}

#[test]
fn ranking_is_sorted_and_bounded_by_k() {
    let thesaurus = Thesaurus::from_records(vec![
        ThesaurusRecord::new("quick", vec!["fast".to_string(), "rapid".to_string()]),
        ThesaurusRecord::new("dog", vec!["hound".to_string()]),
    ]);

    let mut index = InMemoryIndex::new();
    for (i, term) in ["quick", "fast", "rapid", "dog", "hound"].iter().enumerate() {
        let postings: Vec<Posting> = (0..20)
            .filter(|doc| doc % (i + 2) == 0)
            .map(|doc| Posting::new(format!("doc{doc:02}"), (doc % 7) as f64 + 0.5))
            .collect();
        index.insert(*term, postings);
    }

    let expanded = expand_terms(["quick", "dog"], &thesaurus);
    let scores = aggregate(&expanded, &index);

    for k in [0, 1, 3, 5, scores.len(), scores.len() + 10] {
        let ids = rank(&scores, k);
        assert_eq!(ids.len(), k.min(scores.len()));

        let ranked: Vec<f64> = ids.iter().filter_map(|id| scores.get(id)).collect();
        assert!(ranked.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}

#[test]
fn larger_index_scores_never_decrease() {
    let thesaurus = running_thesaurus();
    let expanded = expand_terms(["run"], &thesaurus);

    let base = aggregate(&expanded, &running_index());

    let mut larger = running_index();
    larger.insert("jog", vec![Posting::new("d1", 0.5), Posting::new("d3", 1.0)]);
    let grown = aggregate(&expanded, &larger);

    for (doc_id, score) in base.iter() {
        assert!(grown.get(doc_id).unwrap_or(0.0) >= score);
    }
    assert!(grown.get("d3").is_some());
}

#[test]
fn parallel_aggregation_matches_sequential() {
    let thesaurus = Thesaurus::from_records(vec![
        ThesaurusRecord::new("run", vec!["sprint".to_string(), "jog".to_string()]),
        ThesaurusRecord::new("river", vec!["stream".to_string()]),
    ]);
    let mut index = running_index();
    index.insert("river", vec![Posting::new("d1", 0.25), Posting::new("d3", 4.0)]);
    index.insert("stream", vec![Posting::new("d3", 1.0)]);

    let expanded = expand_terms(["run", "river"], &thesaurus);
    let sequential = ScoreAggregator::new().aggregate(&expanded, &index);
    let parallel = ScoreAggregator::new()
        .with_parallel(true)
        .aggregate(&expanded, &index);

    assert_eq!(parallel, sequential);
}

#[test]
fn closures_serve_as_term_indexes() {
    let lookup = |term: &str| match term {
        "run" => vec![Posting::new("d1", 2.0)],
        "sprint" => vec![Posting::new("d2", 1.0)],
        _ => Vec::new(),
    };
    assert_eq!(lookup.lookup("run").len(), 1);

    let expanded = expand_terms(["run"], &running_thesaurus());
    let scores = aggregate(&expanded, &lookup);

    assert_eq!(scores.get("d1"), Some(8.0));
    assert_eq!(scores.get("d2"), Some(1.0));
}

#[test]
fn json_lines_sources_drive_a_search() -> Result<()> {
    let thesaurus = Thesaurus::from_reader(Cursor::new(
        "{\"term\": \"run\", \"syns\": [\"sprint\", \"jog\"]}\n\n",
    ))?;
    let index = InMemoryIndex::from_reader(Cursor::new(
        "{\"term\": \"run\", \"postings\": [[\"d1\", 2.0]]}\n\
         {\"term\": \"sprint\", \"postings\": [[\"d1\", 1.0], {\"doc_id\": \"d2\", \"score\": 3.0}]}\n",
    ))?;
    let documents = InMemoryDocumentStore::from_reader(Cursor::new(
        "{\"doc_id\": \"d1\", \"text\": \"first\"}\n{\"doc_id\": \"d2\", \"text\": \"second\"}\n",
    ))?;

    let processor = QueryProcessor::new(documents, index);
    assert_eq!(
        processor.search("Run", &thesaurus, 5)?,
        "(d1) first\n\n(d2) second\n\n"
    );
    Ok(())
}
