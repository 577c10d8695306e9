//! Round throughput benchmarks
//!
//! - Full `advance_round` at several population sizes
//! - Pairing pass alone
//! - Detailed statistics over a populated snapshot

use std::time::Duration;

use agora_darwinian::trade::run_pairings;
use agora_darwinian::{EvolutionConfig, Population, PopulationConfig, SizePolicy};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn config(target_size: usize) -> PopulationConfig {
    PopulationConfig {
        target_size,
        evolution: EvolutionConfig {
            size_policy: SizePolicy::Constant,
            ..Default::default()
        },
        ..Default::default()
    }
}

// ============ ROUND BENCHMARKS ============

fn bench_advance_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_round");
    group.measurement_time(Duration::from_secs(5));

    for size in [100usize, 1000, 4000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("agents", size), size, |b, &size| {
            let mut population = Population::create(config(size), Some(42)).unwrap();
            b.iter(|| black_box(population.advance_round().unwrap()));
        });
    }

    group.finish();
}

fn bench_pairings(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairings");

    for size in [100usize, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("agents", size), size, |b, &size| {
            let population = Population::create(config(size), Some(42)).unwrap();
            let cfg = population.config().clone();
            let mut rng = StdRng::seed_from_u64(7);
            b.iter_batched(
                || population.agents().to_vec(),
                |mut agents| {
                    run_pairings(&mut agents, &cfg.payoffs, &cfg.strategies, &mut rng).unwrap()
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// ============ STATISTICS BENCHMARKS ============

fn bench_detailed_stats(c: &mut Criterion) {
    let mut population = Population::create(config(1000), Some(42)).unwrap();
    population.run(10).unwrap();

    c.bench_function("detailed_stats_1000", |b| {
        b.iter(|| black_box(population.detailed_stats()));
    });
}

criterion_group!(rounds, bench_advance_round, bench_pairings);

criterion_group!(statistics, bench_detailed_stats);

criterion_main!(rounds, statistics);
