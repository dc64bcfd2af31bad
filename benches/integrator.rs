//! Benchmarks for the CPU-side frame work: integration and frame snapshots.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use portal_fluid::{AppConfig, Integrator, ParticleState, SimulationState, SpawnRegion};

fn bench_pool<const N: usize>(c: &mut Criterion, group_name: &str) {
    let mut group = c.benchmark_group(group_name);
    let region = SpawnRegion::default();
    let integrator = Integrator::new();

    for gravity in [0.0_f32, 2.5, 5.0] {
        group.bench_with_input(BenchmarkId::new("step", gravity), &gravity, |b, &g| {
            let mut rng = SmallRng::seed_from_u64(42);
            let mut state: ParticleState<N> = ParticleState::spawn(&region, &mut rng);
            b.iter(|| integrator.step(&mut state, black_box(1.0 / 60.0), g, &mut rng))
        });
    }

    group.finish();
}

fn bench_step_default_pool(c: &mut Criterion) {
    bench_pool::<10>(c, "integrate_10");
}

fn bench_step_large_pool(c: &mut Criterion) {
    bench_pool::<1024>(c, "integrate_1024");
}

fn bench_frame_data(c: &mut Criterion) {
    let mut config = AppConfig::default();
    config.simulation.seed = Some(42);
    let state: SimulationState = SimulationState::new(&config);

    c.bench_function("frame_data", |b| {
        b.iter(|| black_box(state.frame_data(black_box(4.0 / 3.0))))
    });
}

criterion_group!(
    benches,
    bench_step_default_pool,
    bench_step_large_pool,
    bench_frame_data,
);
criterion_main!(benches);
