use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use hurriloss::config::ModelConfig;
use hurriloss::{RegionProfile, estimate_region_loss, run_loss_calculations, run_loss_calculations_parallel};

// ── Group 1: region_estimate — sample count scaling ─────────────────────────

fn bench_region_estimate(c: &mut Criterion) {
    let region = RegionProfile::new(3.0, 5.0, 1.0);
    let mut group = c.benchmark_group("region_estimate");
    for &n in &[10u64, 100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            b.iter(|| estimate_region_loss(&region, n, &mut rng))
        });
    }
    group.finish();
}

// ── Group 2: portfolio — sequential vs parallel over many regions ───────────

fn bench_portfolio(c: &mut Criterion) {
    let canonical = ModelConfig::canonical().profiles();
    let wide: Vec<RegionProfile> = (0..32).map(|i| RegionProfile::new(1.0 + i as f64 * 0.1, 5.0, 1.0)).collect();

    let mut group = c.benchmark_group("portfolio");
    for (name, regions) in [("canonical", &canonical), ("wide", &wide)] {
        group.bench_function(BenchmarkId::new("sequential", name), |b| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            b.iter(|| run_loss_calculations(regions, 10_000, &mut rng))
        });
        group.bench_function(BenchmarkId::new("parallel", name), |b| {
            b.iter(|| run_loss_calculations_parallel(regions, 10_000, 42))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_region_estimate, bench_portfolio);
criterion_main!(benches);
