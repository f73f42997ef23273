use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use solar_sim::{utils, Simulation, SpeedMultiplier};

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    group.sample_size(20);

    // Direct summation is O(n²), keep the sweep small.
    for n in [9, 64, 256, 1024] {
        let bodies = if n == 9 {
            utils::solar_system()
        } else {
            utils::uniform_disc(n, 0)
        };
        let mut sim = Simulation::new(bodies);
        sim.set_speed_multiplier(SpeedMultiplier::Fast);
        sim.start();
        // Warmup
        sim.update();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| sim.update());
        });
    }

    group.finish();
}

fn bench_capture_restore(c: &mut Criterion) {
    let mut sim = Simulation::new(utils::uniform_disc(1024, 0));
    let snapshot = sim.capture();

    c.bench_function("capture_1024", |b| b.iter(|| sim.capture()));
    c.bench_function("restore_1024", |b| b.iter(|| sim.restore(&snapshot)));
}

criterion_group!(benches, bench_tick, bench_capture_restore);
criterion_main!(benches);
