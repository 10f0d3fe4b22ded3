use std::hint::black_box;
use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use sentence_lookup::analysis::tokenizer::whitespace::WhitespaceTokenizerFactory;
use sentence_lookup::config::PipelineConfig;
use sentence_lookup::index::InvertedIndex;
use sentence_lookup::pipeline::{LineSource, Pipeline};

/// Generate a Tatoeba-style export with a mix of languages.
fn generate_sentences(count: usize) -> String {
    let words = [
        "猫", "犬", "好き", "が", "は", "を", "食べる", "本", "読む", "学校", "行く", "雨",
        "降る", "今日", "明日", "友達", "会う", "電車", "乗る", "映画",
    ];

    let mut out = String::with_capacity(count * 48);
    for i in 0..count {
        let language = if i % 4 == 0 { "eng" } else { "jpn" };
        let length = 3 + (i % 12);
        let text: Vec<&str> = (0..length)
            .map(|j| words[(i * 7 + j * 13) % words.len()])
            .collect();
        out.push_str(&format!("{}\t{}\t{}\n", i + 1, language, text.join(" ")));
    }
    out
}

/// Benchmark the full pipeline with varying worker counts.
fn bench_pipeline_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_workers");
    let lines = 10_000;
    let input = generate_sentences(lines);

    group.throughput(Throughput::Elements(lines as u64));
    for workers in [1, 2, 4, 8] {
        let pipeline = Pipeline::new(
            PipelineConfig::new().with_workers(workers),
            WhitespaceTokenizerFactory,
        )
        .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(workers), &input, |b, input| {
            b.iter(|| {
                let source = LineSource::new(Cursor::new(input.as_bytes()));
                black_box(pipeline.run(source).unwrap())
            })
        });
    }

    group.finish();
}

/// Benchmark channel capacity, rendezvous against buffered.
fn bench_channel_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("channel_capacity");
    let input = generate_sentences(10_000);

    for capacity in [0, 64, 1024] {
        let pipeline = Pipeline::new(
            PipelineConfig::new()
                .with_workers(4)
                .with_channel_capacity(capacity),
            WhitespaceTokenizerFactory,
        )
        .unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &input,
            |b, input| {
                b.iter(|| {
                    let source = LineSource::new(Cursor::new(input.as_bytes()));
                    black_box(pipeline.run(source).unwrap())
                })
            },
        );
    }

    group.finish();
}

/// Benchmark serialization of a built index.
fn bench_index_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_serialization");
    let pipeline = Pipeline::new(
        PipelineConfig::new().with_workers(4).with_sort_ids(true),
        WhitespaceTokenizerFactory,
    )
    .unwrap();
    let index: InvertedIndex = pipeline
        .run(LineSource::new(Cursor::new(generate_sentences(10_000))))
        .unwrap()
        .index;

    group.throughput(Throughput::Elements(index.total_postings() as u64));
    group.bench_function("to_json", |b| {
        b.iter(|| black_box(serde_json::to_vec(black_box(&index)).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_pipeline_workers,
    bench_channel_capacity,
    bench_index_serialization
);

criterion_main!(benches);
