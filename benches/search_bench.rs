use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lectern::{
    AnalyzerConfig, Document, IndexBuilder, QueryMode, ResultOrder, SearchRequest, Searcher,
};

const WORDS: &[&str] = &[
    "bayesian", "prior", "posterior", "likelihood", "beta", "gamma", "binomial", "poisson",
    "regression", "hierarchical", "sampling", "markov", "chain", "monte", "carlo", "conjugate",
    "normal", "variance", "model", "inference", "the", "of", "and", "with",
];

fn corpus(docs: usize, words_per_doc: usize) -> Vec<Document> {
    (0..docs)
        .map(|i| {
            let text: Vec<&str> = (0..words_per_doc)
                .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()])
                .collect();
            Document::new(format!("Unit{i:04}"), text.join(" "))
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Index Build");
    group.sample_size(20);
    let docs = corpus(500, 400);
    group.throughput(Throughput::Elements(docs.len() as u64));

    for (name, config) in [
        ("default", AnalyzerConfig::default()),
        ("english", AnalyzerConfig::english()),
    ] {
        let builder = IndexBuilder::with_analyzer(config).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &docs, |b, docs| {
            b.iter(|| builder.build(black_box(docs)).unwrap())
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let index = IndexBuilder::with_analyzer(AnalyzerConfig::default())
        .unwrap()
        .build(&corpus(2000, 200))
        .unwrap();
    let searcher = Searcher::new(Arc::new(index)).unwrap();

    let all = SearchRequest::new("beta binomial conjugate");
    let any = SearchRequest::builder("beta binomial conjugate -poisson")
        .mode(QueryMode::Any)
        .order(ResultOrder::Score)
        .limit(10)
        .exclusions(true)
        .build();

    c.bench_function("search_intersection", |b| {
        b.iter(|| searcher.search(black_box(&all)))
    });
    c.bench_function("search_union_ranked", |b| {
        b.iter(|| searcher.search(black_box(&any)))
    });
}

fn bench_codec(c: &mut Criterion) {
    let index = IndexBuilder::with_analyzer(AnalyzerConfig::default())
        .unwrap()
        .build(&corpus(2000, 200))
        .unwrap();
    let json = index.to_json().unwrap();

    c.bench_function("encode_json", |b| b.iter(|| black_box(&index).to_json().unwrap()));
    c.bench_function("decode_json", |b| {
        b.iter(|| lectern::SearchIndex::from_artifact_str(black_box(&json)).unwrap())
    });
}

criterion_group!(benches, bench_build, bench_search, bench_codec);
criterion_main!(benches);
