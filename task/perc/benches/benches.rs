use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use perc::{run_trial, Config, PercolationStats, Sampling};
use rand::{rngs::StdRng, SeedableRng};

fn trial(c: &mut Criterion) {
    let mut group = c.benchmark_group("trial");
    for size in [32, 128, 256] {
        for sampling in [Sampling::Rejection, Sampling::Shuffled] {
            group.bench_with_input(
                BenchmarkId::new(format!("{sampling:?}"), size),
                &size,
                |b, &size| {
                    let mut rng = StdRng::seed_from_u64(0);
                    b.iter(|| run_trial(black_box(size), sampling, &mut rng).unwrap())
                },
            );
        }
    }
    group.finish();
}

fn stats(c: &mut Criterion) {
    c.bench_function("stats 64x64, 100 trials", |b| {
        b.iter(|| {
            let config = Config {
                seed: Some(0),
                ..Config::new(64, 100)
            };
            PercolationStats::with_config(black_box(&config)).unwrap()
        })
    });
}

criterion_group!(benches, trial, stats);
criterion_main!(benches);
