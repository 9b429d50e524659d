use std::sync::Arc;

use lectern::analysis::{Analyzer, AnalyzerConfig, PipelineAnalyzer};
use lectern::{
    Document, IndexBuilder, IndexBuilderConfig, LecternError, QueryMode, Result, ResultOrder,
    SearchRequest, Searcher,
};

fn cat_dog() -> Vec<Document> {
    vec![
        Document::new("a", "the cat sat"),
        Document::new("b", "the dog sat"),
    ]
}

fn course() -> Vec<Document> {
    vec![
        Document::new(
            "Unit1-Regression",
            "A simple linear regression with normal priors on the coefficients.",
        )
        .with_title("Regression Models"),
        Document::new(
            "Unit3-Alarm",
            "Burglary, earthquake and the alarm: a classic Bayesian network.",
        )
        .with_title("Alarm"),
        Document::new(
            "Unit4-BetaPriors",
            "Beta priors are conjugate to the binomial likelihood.",
        )
        .with_title("Beta Priors"),
        Document::new(
            "Unit4-GammaGamma",
            "The gamma prior is conjugate for the rate of a gamma likelihood.",
        )
        .with_title("Gamma Gamma"),
        Document::new("Unit5-Empty", ""),
    ]
}

#[test]
fn test_basic_intersection_and_union() -> Result<()> {
    let index = lectern::build(&cat_dog())?;

    assert_eq!(lectern::query(&index, "cat")?, vec!["a"]);
    assert_eq!(lectern::query(&index, "sat")?, vec!["a", "b"]);
    assert!(lectern::query(&index, "cat dog")?.is_empty());
    assert_eq!(
        lectern::query_with_mode(&index, "cat dog", QueryMode::Any)?,
        vec!["a", "b"]
    );
    Ok(())
}

#[test]
fn test_document_ids_are_not_searchable() -> Result<()> {
    let index = lectern::build(&cat_dog())?;
    assert_eq!(index.title_term_count(), 0);

    assert!(lectern::query(&index, "sat a")?.is_empty());
    assert!(lectern::query(&index, "b")?.is_empty());
    assert!(lectern::query_with_mode(&index, "a b fish", QueryMode::Any)?.is_empty());
    Ok(())
}

#[test]
fn test_unknown_words() -> Result<()> {
    let index = lectern::build(&cat_dog())?;

    for text in ["fish", "FISH bird", "cat fish", "sat fish"] {
        assert!(lectern::query(&index, text)?.is_empty(), "'{text}'");
    }
    assert!(lectern::query_with_mode(&index, "fish bird", QueryMode::Any)?.is_empty());
    assert_eq!(
        lectern::query_with_mode(&index, "cat fish", QueryMode::Any)?,
        vec!["a"]
    );
    assert_eq!(
        lectern::query_with_mode(&index, "fish sat", QueryMode::Any)?,
        vec!["a", "b"]
    );
    Ok(())
}

#[test]
fn test_dash_is_a_delimiter_in_plain_queries() -> Result<()> {
    let index = lectern::build(&cat_dog())?;
    assert!(lectern::query(&index, "cat -dog")?.is_empty());
    assert_eq!(lectern::query(&index, "-dog")?, vec!["b"]);
    assert_eq!(
        lectern::query_with_mode(&index, "-cat -dog", QueryMode::Any)?,
        vec!["a", "b"]
    );
    Ok(())
}

#[test]
fn test_empty_corpus_returns_nothing() -> Result<()> {
    let index = lectern::build(&[])?;
    assert!(index.is_empty());
    for text in ["cat", "cat dog", "", "-cat"] {
        assert!(lectern::query(&index, text)?.is_empty());
        assert!(lectern::query_with_mode(&index, text, QueryMode::Any)?.is_empty());
    }
    Ok(())
}

#[test]
fn test_duplicate_ids_fail() {
    let docs = vec![Document::new("a", "x"), Document::new("a", "y")];
    match lectern::build(&docs) {
        Err(LecternError::DuplicateDocumentId(id)) => assert_eq!(id, "a"),
        other => panic!("expected duplicate id error, got {other:?}"),
    }
}

#[test]
fn test_build_is_deterministic() -> Result<()> {
    let docs = course();
    let mut shuffled = docs.clone();
    shuffled.rotate_left(2);

    let first = lectern::build(&docs)?.to_json()?;
    let second = lectern::build(&docs)?.to_json()?;
    let reordered = lectern::build(&shuffled)?.to_json()?;

    assert_eq!(first, second);
    assert_eq!(first, reordered);
    Ok(())
}

#[test]
fn test_every_extracted_term_finds_its_document() -> Result<()> {
    for config in [AnalyzerConfig::default(), AnalyzerConfig::english()] {
        let index = IndexBuilder::with_analyzer(config.clone())?.build(&course())?;
        let searcher = Searcher::new(Arc::new(index))?;
        let analyzer = PipelineAnalyzer::from_config(config);

        for doc in course() {
            for term in analyzer.terms(&doc.text) {
                let ids = searcher.lookup_term(&term);
                assert!(
                    ids.contains(&doc.id),
                    "term '{term}' does not find '{}'",
                    doc.id
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_query_with_document_words_finds_document() -> Result<()> {
    let index = lectern::build(&course())?;
    for doc in course() {
        for word in doc.text.split_whitespace() {
            let ids = lectern::query(&index, word)?;
            if !ids.is_empty() {
                assert!(ids.contains(&doc.id), "'{word}' does not find '{}'", doc.id);
            }
        }
    }
    Ok(())
}

#[test]
fn test_intersection_is_subset_of_union() -> Result<()> {
    let index = lectern::build(&course())?;
    let queries = [
        "beta",
        "conjugate likelihood",
        "gamma prior",
        "alarm regression",
        "the priors",
        "unknown conjugate",
        "BETA Binomial",
    ];
    for text in queries {
        let all = lectern::query_with_mode(&index, text, QueryMode::All)?;
        let any = lectern::query_with_mode(&index, text, QueryMode::Any)?;
        for id in &all {
            assert!(any.contains(id), "'{id}' in intersection but not union of '{text}'");
        }
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert!(any.windows(2).all(|w| w[0] < w[1]));
    }
    Ok(())
}

#[test]
fn test_title_terms_are_searchable() -> Result<()> {
    let index = lectern::build(&course())?;
    // "Models" only appears in the title.
    assert_eq!(lectern::query(&index, "models")?, vec!["Unit1-Regression"]);
    assert_eq!(
        lectern::query(&index, "regression models")?,
        vec!["Unit1-Regression"]
    );
    Ok(())
}

#[test]
fn test_english_analyzer_round_trip() -> Result<()> {
    let builder = IndexBuilder::new(IndexBuilderConfig {
        analyzer: AnalyzerConfig::english(),
        ..Default::default()
    })?;
    let index = builder.build(&course())?;

    // Stemming applies to queries as well: "prior" and "priors" agree.
    assert_eq!(
        lectern::query(&index, "priors")?,
        lectern::query(&index, "prior")?
    );
    // Stopwords are never indexed.
    assert!(lectern::query(&index, "the")?.is_empty());
    Ok(())
}

#[test]
fn test_ranked_search_with_exclusion() -> Result<()> {
    let index = lectern::build(&course())?;
    let searcher = Searcher::new(Arc::new(index))?;

    let request = SearchRequest::builder("conjugate gamma beta -binomial")
        .mode(QueryMode::Any)
        .order(ResultOrder::Score)
        .exclusions(true)
        .build();
    let hits = searcher.search(&request);
    let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();

    assert_eq!(ids, vec!["Unit4-GammaGamma"]);
    assert_eq!(hits[0].title, "Gamma Gamma");
    assert_eq!(hits[0].score, 2);
    Ok(())
}
