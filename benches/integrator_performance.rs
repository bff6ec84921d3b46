//! Performance benchmarks for the pendulum integrator
//!
//! # What We're Measuring
//!
//! 1. **Free swing** at several release angles: cost of the adaptive
//!    Bulirsch-Stoer driver on a smooth problem. Larger angles are more
//!    nonlinear and need smaller steps or a higher extrapolation order.
//! 2. **Drag regimes**: the same swing with resistance in air and water,
//!    where each evaluation also computes Re and the drag coefficient.
//! 3. **Sampling overhead**: one second integrated in one call vs sampled
//!    every millisecond into memory. Sampling forces the integrator to land
//!    on every sample time.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench --bench integrator_performance
//!
//! # Only the sampling comparison
//! cargo bench --bench integrator_performance sampling
//! ```

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pendulum_rs::models::Pendulum;
use pendulum_rs::output::TrajectoryRecord;
use pendulum_rs::physics::Fluid;

// =================================================================================================
// Benchmark Functions
// =================================================================================================

/// One second of frictionless motion from rest at different angles
fn benchmark_free_swing(c: &mut Criterion) {
    let mut group = c.benchmark_group("free_swing");

    for degrees in [10u32, 30, 89, 170] {
        let angle = f64::from(degrees).to_radians();

        group.bench_with_input(BenchmarkId::from_parameter(degrees), &angle, |b, &angle| {
            let template = Pendulum::new(1.0, 0.05, false, false, angle);

            b.iter(|| {
                let mut pendulum = template.clone();
                pendulum.advance(black_box(1.0)).unwrap()
            });
        });
    }

    group.finish();
}

/// One second at 89° with drag enabled
fn benchmark_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag");

    for fluid in [Fluid::Air, Fluid::Water] {
        group.bench_with_input(BenchmarkId::from_parameter(fluid), &fluid, |b, &fluid| {
            let mut template = Pendulum::new(1.0, 0.0025, true, false, 1.5533430);
            template.select_fluid(fluid);

            b.iter(|| {
                let mut pendulum = template.clone();
                pendulum.advance(black_box(1.0)).unwrap()
            });
        });
    }

    group.finish();
}

/// Single advance vs 1000 sampled records over the same second
fn benchmark_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    group.measurement_time(Duration::from_secs(10));

    let template = Pendulum::new(1.0, 0.05, true, false, 0.5235988);

    group.bench_function("single_advance", |b| {
        b.iter(|| {
            let mut pendulum = template.clone();
            pendulum.advance(black_box(1.0)).unwrap()
        });
    });

    group.bench_function("every_millisecond", |b| {
        b.iter(|| {
            let mut pendulum = template.clone();
            let mut records: Vec<TrajectoryRecord> = Vec::with_capacity(1001);
            pendulum
                .advance_with_sampling(black_box(0.001), &mut records, 1.0)
                .unwrap();
            records
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_free_swing, benchmark_drag, benchmark_sampling);
criterion_main!(benches);
