use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use markdown_hybrid_engine::{LineBuffer, compute_block_index};
mod common;

fn bench_block_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_index");
    group.sample_size(20);

    for size in [10, 100, 1000] {
        let content = common::with_frontmatter(&common::generate_markdown_content(size));
        let buffer = LineBuffer::new(&content);
        group.bench_with_input(BenchmarkId::from_parameter(size), &buffer, |b, buffer| {
            b.iter(|| compute_block_index(std::hint::black_box(buffer)));
        });
    }

    group.finish();
}

fn bench_line_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_buffer");
    group.sample_size(20);

    let content = common::generate_markdown_content(1000);
    group.bench_function("new", |b| {
        b.iter(|| LineBuffer::new(std::hint::black_box(&content)));
    });

    group.finish();
}

criterion_group!(benches, bench_block_index, bench_line_buffer);
criterion_main!(benches);
