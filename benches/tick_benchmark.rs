/*
 * Murmuration Benchmark
 *
 * Measures the two kernels and a full tick for several flock sizes. The
 * neighbor scan is all-pairs, so cost grows with the square of the count.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use murmuration::physics::velocity_pass;
use murmuration::{Agent, Simulation, SimulationParams};

const DT: f32 = 1.0 / 60.0;

fn params(birds: u32, parallel: bool) -> SimulationParams {
    SimulationParams {
        birds: Some(birds),
        seed: Some(1),
        parallel,
        ..SimulationParams::default()
    }
}

// Benchmark the velocity kernel on its own
fn bench_velocity_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("velocity_pass");

    for num_birds in [256u32, 1024, 4096].iter() {
        let sim = Simulation::new(params(*num_birds, true)).expect("valid params");
        let zones = *sim.zones();
        let mut next = vec![Agent::ZERO; sim.agent_count()];

        group.bench_with_input(BenchmarkId::from_parameter(num_birds), num_birds, |b, _| {
            b.iter(|| {
                velocity_pass(sim.frame(), &mut next, &zones, DT, None, true);
                black_box(&next);
            });
        });
    }

    group.finish();
}

// Benchmark a full tick, sequential against parallel dispatch
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for num_birds in [256u32, 1024, 4096].iter() {
        for parallel in [false, true] {
            let mut sim = Simulation::new(params(*num_birds, parallel)).expect("valid params");
            let label = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(BenchmarkId::new(label, num_birds), num_birds, |b, _| {
                b.iter(|| {
                    sim.set_pointer(0.2, -0.1);
                    black_box(sim.tick(DT).expect("tick"));
                });
            });
        }
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_velocity_pass, bench_tick
}

criterion_main!(benches);
