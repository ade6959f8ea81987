//! Benchmarks for the shared-board generation loop.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use shared_life::{
    compute::{NullRenderer, WorkerPool},
    schema::{PatternCatalog, Seed, SeedPattern, SimulationConfig},
};

fn noise_seed(size: u32) -> Seed {
    Seed {
        pattern: SeedPattern::Noise {
            width: size,
            height: size,
            density: 0.35,
            seed: 42,
        },
    }
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");

    for size in [64, 128, 256, 512] {
        let config = SimulationConfig {
            width: size,
            height: size,
            workers: Some(4),
            framerate: 0.0,
        };

        let mut pool =
            WorkerPool::from_seed(config, &noise_seed(size), PatternCatalog::default()).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| {
                    black_box(pool.run_generation(&mut NullRenderer).unwrap());
                });
            },
        );
    }

    group.finish();
}

fn bench_worker_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_count");

    for workers in [1, 2, 4, 8] {
        let config = SimulationConfig {
            width: 256,
            height: 256,
            workers: Some(workers),
            framerate: 0.0,
        };

        let mut pool =
            WorkerPool::from_seed(config, &noise_seed(256), PatternCatalog::default()).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_workers", workers)),
            &workers,
            |b, _| {
                b.iter(|| {
                    black_box(pool.run_generation(&mut NullRenderer).unwrap());
                });
            },
        );
    }

    group.finish();
}

fn bench_pattern_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_detection");

    for (label, catalog) in [
        ("empty_catalog", PatternCatalog::empty()),
        ("default_catalog", PatternCatalog::default()),
    ] {
        let config = SimulationConfig {
            width: 256,
            height: 256,
            workers: Some(4),
            framerate: 0.0,
        };

        let mut pool = WorkerPool::from_seed(config, &noise_seed(256), catalog).unwrap();

        group.bench_function(label, |b| {
            b.iter(|| {
                black_box(pool.run_generation(&mut NullRenderer).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_generation,
    bench_worker_count,
    bench_pattern_detection
);
criterion_main!(benches);
