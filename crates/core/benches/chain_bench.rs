//! Benchmark for chained hashes over the bundled primitives

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use xhash_core::{Hash256, Hasher, SelectorContext, Variant};

fn bench_bundled_variants(c: &mut Criterion) {
    let hasher = Hasher::bundled();
    let input = b"benchmark input data: an 80-byte block header stand-in for chained hashes";

    let mut group = c.benchmark_group("bundled");
    for variant in hasher.supported() {
        group.bench_with_input(BenchmarkId::from_parameter(variant), &variant, |b, v| {
            b.iter(|| hasher.hash(*v, black_box(input), &SelectorContext::None))
        });
    }
    group.finish();
}

fn bench_x16r_blake_only(c: &mut Criterion) {
    let hasher = Hasher::bundled();
    let reference = Hash256::ZERO;

    c.bench_function("x16r_blake_only", |b| {
        let mut nonce: u64 = 0;
        b.iter(|| {
            let mut input = Vec::with_capacity(80);
            input.extend_from_slice(b"header");
            input.extend_from_slice(&nonce.to_le_bytes());
            nonce = nonce.wrapping_add(1);
            hasher.x16r(black_box(&input), &reference)
        })
    });
}

criterion_group!(benches, bench_bundled_variants, bench_x16r_blake_only);
criterion_main!(benches);
