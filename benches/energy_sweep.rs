use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::thread_rng;
use transporter_majorana::sweep::SweepBuilder;
use utilities::{construct_energy_space, random_parameters, reference_parameters};

pub fn bench_reference_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_sweep");

    for number_of_steps in [400, 4000, 40000].into_iter() {
        let parameters = reference_parameters(number_of_steps);
        let energy_space = construct_energy_space(&parameters);
        let sweep = SweepBuilder::new()
            .with_parameters(&parameters)
            .with_energy_space(&energy_space)
            .build();
        group.bench_with_input(
            BenchmarkId::new("parallel", number_of_steps),
            &number_of_steps,
            |b, _| b.iter(|| black_box(sweep.run())),
        );
        group.bench_with_input(
            BenchmarkId::new("sequential", number_of_steps),
            &number_of_steps,
            |b, _| b.iter(|| black_box(sweep.run_sequential())),
        );
    }
    group.finish();
}

pub fn bench_random_sample(c: &mut Criterion) {
    let mut rng = thread_rng();
    let parameters = random_parameters(&mut rng, 4000);
    let energy_space = construct_energy_space(&parameters);
    let sweep = SweepBuilder::new()
        .with_parameters(&parameters)
        .with_energy_space(&energy_space)
        .build();

    c.bench_function("single_sample", |b| {
        b.iter(|| sweep.compute_sample(black_box(2000)))
    });
}

criterion_group!(benches, bench_reference_sweep, bench_random_sample);
criterion_main!(benches);
