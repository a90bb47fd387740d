//! Benchmarks for the cursor-to-highlight pipeline.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use svgsync_core::Highlighter;
use svgsync_syntax::{locate_segment, parse_path, StructuralIndex, DEFAULT_PROXIMITY};

/// Generates a path string with `segments` mixed commands.
fn generate_path(segments: usize) -> String {
    let mut d = String::from("M0,0");
    for i in 0..segments {
        let n = i as f64;
        match i % 4 {
            0 => d.push_str(&format!(" L{},{}", n, n * 0.5)),
            1 => d.push_str(&format!(" c{},0 {},{} 0,{}", n, n, n, n)),
            2 => d.push_str(&format!(" Q{},{} {},{}", n, n, n + 1.0, n)),
            _ => d.push_str(" s1,2 3,4"),
        }
    }
    d
}

/// Generates an SVG document with `groups` groups of three shapes each.
fn generate_svg(groups: usize) -> String {
    let mut svg = String::from("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 1000 1000\">\n");
    for i in 0..groups {
        svg.push_str(&format!(
            "  <g id=\"g{i}\">\n    <rect x=\"{i}\" y=\"{i}\" width=\"10\" height=\"10\"/>\n    <polygon points=\"0,0 {i},0 {i},{i}\"/>\n    <path d=\"{}\"/>\n  </g>\n",
            generate_path(8)
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

/// Benchmarks structural indexing of whole documents.
fn bench_structural_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("structural_index");

    for size in [10, 100, 1000].iter() {
        let svg = generate_svg(*size);

        group.bench_with_input(BenchmarkId::new("build", size), &svg, |b, svg| {
            b.iter(|| black_box(StructuralIndex::build(black_box(svg))))
        });
    }

    let svg = generate_svg(1000);
    let index = StructuralIndex::build(&svg);
    group.bench_function("locate_middle", |b| {
        b.iter(|| black_box(index.locate(black_box(svg.len() / 2))))
    });

    group.finish();
}

/// Benchmarks path parsing and segment lookup.
fn bench_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("path");

    for size in [10, 100, 1000].iter() {
        let d = generate_path(*size);

        group.bench_with_input(BenchmarkId::new("parse", size), &d, |b, d| {
            b.iter(|| black_box(parse_path(black_box(d))))
        });
    }

    let d = generate_path(1000);
    let segments = parse_path(&d);
    group.bench_function("locate_middle", |b| {
        b.iter(|| black_box(locate_segment(&segments, black_box(d.len() / 2), DEFAULT_PROXIMITY)))
    });

    group.finish();
}

/// Benchmarks one full highlight computation per cursor move.
fn bench_highlight(c: &mut Criterion) {
    let mut group = c.benchmark_group("highlight");
    let highlighter = Highlighter::default();

    for size in [10, 100, 1000].iter() {
        let svg = generate_svg(*size);
        // Inside the last path's data
        let offset = svg.rfind("d=\"").map_or(0, |i| i + 10);

        group.bench_with_input(BenchmarkId::new("path_cursor", size), &svg, |b, svg| {
            b.iter(|| black_box(highlighter.highlight(black_box(svg), offset)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_structural_index, bench_path, bench_highlight);

criterion_main!(benches);
