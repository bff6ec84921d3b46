//! Helper functions for integration tests

use pendulum_rs::models::Pendulum;
use pendulum_rs::output::TrajectoryRecord;
use pendulum_rs::physics::constants::GRAVITY;

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Linearized pendulum released at rest: θ(t) = θ₀·cos(√(g/l)·t)
pub fn small_angle_solution(initial_angle: f64, length: f64, t: f64) -> f64 {
    initial_angle * ((GRAVITY / length).sqrt() * t).cos()
}

/// Sample `pendulum` into memory
pub fn sample(pendulum: &mut Pendulum, interval: f64, duration: f64) -> Vec<TrajectoryRecord> {
    let mut records = Vec::new();
    pendulum
        .advance_with_sampling(interval, &mut records, duration)
        .expect("sampling failed");
    records
}

/// Largest |E(t) - E(0)| over the records
pub fn max_energy_drift(records: &[TrajectoryRecord]) -> f64 {
    let reference = records[0].energy;
    records
        .iter()
        .map(|r| (r.energy - reference).abs())
        .fold(0.0, f64::max)
}

/// Assert that energy never grows by more than `slack` between records
pub fn assert_energy_non_increasing(records: &[TrajectoryRecord], slack: f64, message: &str) {
    for pair in records.windows(2) {
        assert!(
            pair[1].energy <= pair[0].energy + slack,
            "{}: energy rose from {} to {} at t = {}",
            message, pair[0].energy, pair[1].energy, pair[1].time
        );
    }
}
