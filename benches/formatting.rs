//! Benchmarks for text analysis and result formatting.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use splitpad::analysis::analyze;
use splitpad::format::{ResultFormat, format_result};

fn prose(paragraphs: usize) -> String {
    "The quick brown fox jumps over the lazy dog. Does it? It does!\n".repeat(paragraphs)
}

fn bench_analyze(c: &mut Criterion) {
    let text = prose(500);
    c.bench_function("analyze_prose", |b| b.iter(|| analyze(black_box(&text))));
}

fn bench_format_json(c: &mut Criterion) {
    let items: Vec<String> = (0..500)
        .map(|i| format!("{{\"id\":{i},\"name\":\"item {i}\",\"tags\":[\"a\",\"b\"]}}"))
        .collect();
    let json = format!("[{}]", items.join(","));
    c.bench_function("format_json", |b| {
        b.iter(|| format_result(black_box(&json), ResultFormat::Json))
    });
}

fn bench_format_html(c: &mut Criterion) {
    let html = "<div>\n  <p>  Some   text  </p>\n  <span> more </span>\n</div>\n".repeat(300);
    c.bench_function("format_html", |b| {
        b.iter(|| format_result(black_box(&html), ResultFormat::Html))
    });
}

criterion_group!(benches, bench_analyze, bench_format_json, bench_format_html);
criterion_main!(benches);
