use criterion::{criterion_group, criterion_main, Criterion};
use netipd_core::ga::{reproduce_population, ReproductionPolicy};
use netipd_core::network::{scale_free, small_world};
use netipd_core::simulation::{run_simulation, SimulationConfig};
use netipd_core::{Population, TopologyKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_generation(c: &mut Criterion) {
    c.bench_function("build_small_world_1000_k6", |b| {
        b.iter(|| small_world(1000, 6, 0.1, &mut StdRng::seed_from_u64(0)))
    });

    c.bench_function("build_scale_free_1000_m2", |b| {
        b.iter(|| scale_free(1000, 2, &mut StdRng::seed_from_u64(0)))
    });

    let mut rng = StdRng::seed_from_u64(1);
    let network = scale_free(1000, 2, &mut rng).unwrap();
    let population = Population::random(1000, &mut rng);
    let policy = ReproductionPolicy::standard(0.01).with_meta(0.3);
    c.bench_function("reproduce_scale_free_1000", |b| {
        b.iter(|| {
            let mut pop = population.clone();
            reproduce_population(&mut pop, &network, &policy, &mut rng).unwrap();
        })
    });

    let config = SimulationConfig {
        topology: TopologyKind::SmallWorld,
        num_agents: 200,
        generations: 20,
        rounds: 50,
        ..SimulationConfig::default()
    };
    c.bench_function("run_small_world_200x20", |b| {
        b.iter(|| run_simulation(&config).unwrap())
    });
}

criterion_group!(benches, bench_generation);
criterion_main!(benches);
