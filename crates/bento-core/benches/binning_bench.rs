use bento_core::bin::{bin, BinStrategy};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn samples(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 * 0.37).sin() * 40.0 + (i % 97) as f64).collect()
}

fn bench_binning(c: &mut Criterion) {
    let mut group = c.benchmark_group("bin");
    for &n in &[10_000usize, 200_000usize] {
        let values = samples(n);
        group.bench_function(format!("equal_width_{n}"), |b| {
            b.iter(|| black_box(bin(black_box(&values), 20, BinStrategy::EqualWidth)));
        });
        group.bench_function(format!("nice_thresholds_{n}"), |b| {
            b.iter(|| black_box(bin(black_box(&values), 20, BinStrategy::NiceThresholds)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_binning);
criterion_main!(benches);
