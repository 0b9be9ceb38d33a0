//! Criterion benchmarks for thaifreq.
//!
//! Covers normalization, segmentation and tagging, single-text analysis
//! and batch analysis on and off the worker pool.

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use thaifreq::analysis::normalizer::TextNormalizer;
use thaifreq::analysis::tokenizer::LinguisticAnalyzer;
use thaifreq::analysis::tokenizer::pipeline::PipelineAnalyzer;
use thaifreq::config::AnalyzerConfig;
use thaifreq::detector::{AnalyzeOptions, FrequencyAggregator};

const SENTENCES: &[&str] = &[
    "แมวกินปลา แมวนอน",
    "ภาษาไทยเป็นภาษาที่สวยงาม",
    "ประเทศไทยมีวัฒนธรรมที่หลากหลาย",
    "อาหารไทยอร่อยมาก",
    "หมากินข้าว",
    "Thai food is delicious",
];

/// Generate test texts for benchmarking.
fn generate_texts(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            (0..8)
                .map(|j| SENTENCES[(i + j) % SENTENCES.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn uncached() -> AnalyzerConfig {
    AnalyzerConfig {
        enable_cache: false,
        ..AnalyzerConfig::in_memory()
    }
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    let text = generate_texts(1).remove(0);
    group.throughput(Throughput::Bytes(text.len() as u64));

    let normalizer = TextNormalizer::new();
    group.bench_function("normalize", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box(&text))))
    });

    let analyzer = PipelineAnalyzer::builtin();
    let cleaned = normalizer.normalize(&text);
    group.bench_function("segment_and_tag", |b| {
        b.iter(|| black_box(analyzer.segment_and_tag(black_box(&cleaned)).unwrap()))
    });

    let aggregator = FrequencyAggregator::new(uncached()).unwrap();
    let options = AnalyzeOptions::new().track_time(false);
    group.bench_function("analyze_uncached", |b| {
        b.iter(|| black_box(aggregator.analyze(black_box(&text), &options).unwrap()))
    });

    let cached = FrequencyAggregator::new(AnalyzerConfig::in_memory()).unwrap();
    group.bench_function("analyze_cached", |b| {
        b.iter(|| black_box(cached.analyze(black_box(&text), &options).unwrap()))
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let texts = generate_texts(64);
    group.throughput(Throughput::Elements(texts.len() as u64));
    let options = AnalyzeOptions::new();

    let aggregator = FrequencyAggregator::new(uncached()).unwrap();
    group.bench_function("sequential", |b| {
        b.iter(|| black_box(aggregator.analyze_batch(&texts, &options, false).unwrap()))
    });

    let aggregator = FrequencyAggregator::new(uncached()).unwrap();
    group.bench_function("parallel", |b| {
        b.iter(|| black_box(aggregator.analyze_batch(&texts, &options, true).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_analysis, bench_batch);
criterion_main!(benches);
