use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fuzzy_signal::{
    config::ControllerConfig,
    compute::ComputeBackend,
    intersection::IntersectionController,
    scenario::synthetic_snapshots,
};

fn benchmark_sequential_decision(c: &mut Criterion) {
    let controller = IntersectionController::canonical()
        .expect("Failed to build controller");
    let snapshots = synthetic_snapshots(64, Some(42))
        .expect("Failed to generate snapshots");
    let backend = ComputeBackend::new_sequential();

    let mut i = 0;
    c.bench_function("sequential_decision", |b| {
        b.iter(|| {
            i = (i + 1) % snapshots.len();
            controller.decide_with(&backend, black_box(&snapshots[i])).unwrap();
        })
    });
}

#[cfg(feature = "parallel")]
fn benchmark_parallel_decision(c: &mut Criterion) {
    let controller = IntersectionController::canonical()
        .expect("Failed to build controller");
    let snapshots = synthetic_snapshots(64, Some(42))
        .expect("Failed to generate snapshots");

    if let Ok(backend) = ComputeBackend::new_parallel() {
        let mut i = 0;
        c.bench_function("parallel_decision", |b| {
            b.iter(|| {
                i = (i + 1) % snapshots.len();
                controller.decide_with(&backend, black_box(&snapshots[i])).unwrap();
            })
        });
    }
}

fn benchmark_resolution_scaling(c: &mut Criterion) {
    let snapshots = synthetic_snapshots(64, Some(42))
        .expect("Failed to generate snapshots");

    let mut group = c.benchmark_group("resolution_scaling");

    for resolution in [1.0, 0.5, 0.1, 0.01].iter() {
        let mut config = ControllerConfig::default();
        config.engine.resolution = Some(*resolution);
        let controller = IntersectionController::from_config(&config)
            .expect("Failed to build controller");

        let mut i = 0;
        group.bench_with_input(
            format!("resolution_{}", resolution),
            resolution,
            |b, _resolution| {
                b.iter(|| {
                    i = (i + 1) % snapshots.len();
                    controller.decide(black_box(&snapshots[i])).unwrap();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_sequential_decision,
    benchmark_resolution_scaling
);

#[cfg(feature = "parallel")]
criterion_group!(parallel_benches, benchmark_parallel_decision);

#[cfg(feature = "parallel")]
criterion_main!(benches, parallel_benches);

#[cfg(not(feature = "parallel"))]
criterion_main!(benches);
