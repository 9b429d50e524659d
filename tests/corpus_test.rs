use std::fs;

use lectern::{
    Corpus, IndexBuilder, IndexBuilderConfig, IndexHandle, QueryMode, Result, SearchIndex,
    SearchRequest,
};

fn write_site(root: &std::path::Path) -> Result<()> {
    fs::create_dir_all(root.join("lectures"))?;
    fs::create_dir_all(root.join("_build/html"))?;
    fs::write(root.join("index.md"), "# Bayesian Statistics\nCourse overview.")?;
    fs::write(
        root.join("lectures/Unit3-Alarm.ipynb"),
        r##"{
            "cells": [
                {"cell_type": "markdown", "source": ["# Alarm\n", "Burglary or earthquake?"]},
                {"cell_type": "code", "source": ["import pymc as pm\n"]}
            ],
            "metadata": {},
            "nbformat": 4
        }"##,
    )?;
    fs::write(
        root.join("lectures/Unit4-BetaPriors.md"),
        "# Beta Priors\nConjugate priors for the binomial.",
    )?;
    fs::write(root.join("_build/html/searchindex.js"), "Search.setIndex({})")?;
    Ok(())
}

#[test]
fn test_site_directory_to_artifact() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_site(dir.path())?;

    let corpus = Corpus::load(dir.path())?;
    let ids: Vec<&str> = corpus.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["index", "lectures/Unit3-Alarm", "lectures/Unit4-BetaPriors"]
    );

    let index = IndexBuilder::new(IndexBuilderConfig::default())?.build(&corpus)?;
    assert_eq!(lectern::query(&index, "pymc")?, vec!["lectures/Unit3-Alarm"]);
    assert_eq!(
        lectern::query_with_mode(&index, "burglary binomial", QueryMode::Any)?,
        vec!["lectures/Unit3-Alarm", "lectures/Unit4-BetaPriors"]
    );

    let artifact = dir.path().join("_build/html/searchindex.js");
    index.write_to_path(&artifact)?;
    let reloaded = SearchIndex::read_from_path(&artifact)?;
    assert_eq!(reloaded, index);

    let doc = reloaded.document(1).ok_or_else(|| lectern::LecternError::other("missing"))?;
    assert_eq!(doc.title, "Alarm");
    assert_eq!(doc.filename, Some("lectures/Unit3-Alarm.ipynb"));
    Ok(())
}

#[test]
fn test_rebuild_and_publish() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_site(dir.path())?;

    let builder = IndexBuilder::new(IndexBuilderConfig::default())?;
    let handle = IndexHandle::new(builder.build(&Corpus::load(dir.path())?)?)?;
    let before = handle.searcher()?;
    assert!(before.search_ids("gamma").is_empty());

    fs::write(
        dir.path().join("lectures/Unit4-GammaGamma.md"),
        "# Gamma Gamma\nThe gamma prior.",
    )?;
    handle.publish(builder.build(&Corpus::load(dir.path())?)?)?;

    // Old searchers keep their snapshot; new ones see the rebuild.
    assert!(before.search_ids("gamma").is_empty());
    let after = handle.searcher()?;
    assert_eq!(after.search_ids("gamma"), vec!["lectures/Unit4-GammaGamma"]);

    let hits = after.search(&SearchRequest::new("gamma prior"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Gamma Gamma");
    Ok(())
}

#[test]
fn test_json_corpus_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("corpus.json");
    fs::write(&path, r#"{"a": "the cat sat", "b": "the dog sat"}"#)?;

    let corpus = Corpus::load(&path)?;
    let index = lectern::build(&corpus)?;
    assert_eq!(lectern::query(&index, "dog")?, vec!["b"]);
    Ok(())
}
