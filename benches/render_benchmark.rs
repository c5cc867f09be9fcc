//! Benchmarks for rst2html parsing and rendering.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a synthetic document with the given number of sections.
fn create_test_document(section_count: usize) -> String {
    let mut source = String::from("=====\nTitle\n=====\n\nIntro with *emphasis* and ``code``.\n\n");

    for i in 0..section_count {
        source.push_str(&format!("Section {}\n-----------\n\n", i + 1));
        source.push_str("- A bullet list\n\n  - Nested item\n\n- Item 2.\n\n");
        source.push_str("1. First\n2. Second\n\n");
        source.push_str("| A line\n|   nested line\n\n");
        source.push_str("Example::\n\n  let x = 1;\n\n");
        source.push_str("Quote:\n\n  Indented **strong** text.\n\n");
    }

    source
}

/// Benchmark parsing at various sizes.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for section_count in [1, 10, 100].iter() {
        let source = create_test_document(*section_count);

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| rst2html::parse(black_box(&source)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark rendering an already parsed tree.
fn bench_rendering(c: &mut Criterion) {
    let doc = rst2html::parse(&create_test_document(100)).unwrap();
    let options = rst2html::RenderOptions::default();

    c.bench_function("render_100_sections", |b| {
        b.iter(|| rst2html::render_tree(black_box(&doc), &options));
    });
}

/// Benchmark batch rendering, parallel against sequential.
fn bench_batch(c: &mut Criterion) {
    let sources: Vec<String> = (0..32).map(|_| create_test_document(10)).collect();
    let parse_options = rst2html::ParseOptions::default();
    let mut group = c.benchmark_group("batch");

    group.bench_function("parallel", |b| {
        let options = rst2html::RenderOptions::default();
        b.iter(|| rst2html::render_batch(black_box(&sources), &parse_options, &options));
    });

    group.bench_function("sequential", |b| {
        let options = rst2html::RenderOptions::default().sequential();
        b.iter(|| rst2html::render_batch(black_box(&sources), &parse_options, &options));
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_rendering, bench_batch);
criterion_main!(benches);
