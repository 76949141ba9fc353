//! Benchmarks for chatlens parsing and analysis.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- response`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatlens::core::filter::UserFilter;
use chatlens::core::lexical::{RegexEmojiExtractor, Stopwords, emoji_frequency, word_frequency};
use chatlens::core::output::{to_csv, to_jsonl};
use chatlens::core::report::Analyzer;
use chatlens::core::response::infer_response_edges;
use chatlens::core::sentiment::{LexiconScorer, annotate};
use chatlens::parser::TranscriptParser;

// =============================================================================
// Test Data Generators
// =============================================================================

const BODIES: &[&str] = &[
    "good morning everyone",
    "kya haal hai 😂",
    "traffic was terrible today",
    "<Media omitted>",
    "see https://example.com",
    "I love this 😍😍",
];

fn generate_transcript(count: usize) -> String {
    let senders = ["Alice", "Bob", "Carol"];
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        // One message every 7 minutes with a long pause every 40 messages
        let minutes = i * 7 + (i / 40) * 600;
        let day = 1 + (minutes / 1440) % 28;
        let hour = (minutes / 60) % 24;
        let minute = minutes % 60;
        lines.push(format!(
            "{}/{}/24, {:02}:{:02} - {}: {}",
            1 + (i / 5000) % 12,
            day,
            hour,
            minute,
            senders[i % 3],
            BODIES[i % BODIES.len()]
        ));
    }
    lines.join("\n")
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    let parser = TranscriptParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let txt = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let table = parser.parse_str(black_box(txt));
                black_box(table)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Analysis Benchmarks
// =============================================================================

fn bench_response_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("response");

    for size in [100_usize, 1_000, 10_000] {
        let table = TranscriptParser::new().parse_str(&generate_transcript(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| {
                let edges = infer_response_edges(black_box(table), 0.9);
                black_box(edges)
            });
        });
    }

    group.finish();
}

fn bench_lexical(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexical");
    let stopwords = Stopwords::bundled();
    let table = TranscriptParser::new().parse_str(&generate_transcript(10_000));
    group.throughput(Throughput::Elements(table.len() as u64));

    group.bench_function("words", |b| {
        b.iter(|| black_box(word_frequency(&table, &UserFilter::Overall, &stopwords, 20)));
    });
    group.bench_function("emoji", |b| {
        b.iter(|| {
            black_box(emoji_frequency(&table, &UserFilter::Overall, &RegexEmojiExtractor))
        });
    });

    group.finish();
}

fn bench_sentiment(c: &mut Criterion) {
    let mut group = c.benchmark_group("sentiment");
    let scorer = LexiconScorer::new();

    for size in [1_000_usize, 10_000] {
        let table = TranscriptParser::new().parse_str(&generate_transcript(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| black_box(annotate(black_box(table), &scorer, 0.05)));
        });
    }

    group.finish();
}

fn bench_full_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");
    let analyzer = Analyzer::new(Stopwords::bundled());
    let table = TranscriptParser::new().parse_str(&generate_transcript(10_000));
    group.throughput(Throughput::Elements(table.len() as u64));

    group.bench_function("overall", |b| {
        b.iter(|| black_box(analyzer.analyze(&table, &UserFilter::Overall)));
    });
    group.bench_function("single_user", |b| {
        let filter = UserFilter::user("Alice");
        b.iter(|| black_box(analyzer.analyze(&table, &filter)));
    });

    group.finish();
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let table = TranscriptParser::new().parse_str(&generate_transcript(10_000));
    group.throughput(Throughput::Elements(table.len() as u64));

    group.bench_function("csv", |b| {
        b.iter(|| black_box(to_csv(black_box(&table))));
    });
    group.bench_function("jsonl", |b| {
        b.iter(|| black_box(to_jsonl(black_box(&table))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_response_inference,
    bench_lexical,
    bench_sentiment,
    bench_full_report,
    bench_output,
);
criterion_main!(benches);
