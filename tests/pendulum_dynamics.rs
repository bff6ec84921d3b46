//! Physical behaviour of the integrated pendulum
//!
//! Each test runs the full stack (parameters, Bulirsch-Stoer, sampling) and
//! checks a property the motion must have.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use pendulum_rs::error::{IntegrationError, PendulumError};
use pendulum_rs::models::Pendulum;
use pendulum_rs::physics::{drag_coefficient, EquationOfMotion, Fluid, PendulumState};

mod common;
use common::{
    assert_energy_non_increasing, max_energy_drift, relative_error, sample, small_angle_solution,
};

// =================================================================================================
// Small-angle motion
// =================================================================================================

#[test]
fn test_simple_harmonic_matches_analytic_solution() {
    let theta0 = 0.01;
    let mut pendulum = Pendulum::new(1.0, 0.05, false, true, theta0);

    let records = sample(&mut pendulum, 0.1, 10.0);
    assert_eq!(records.len(), 101);

    for record in &records {
        let expected = small_angle_solution(theta0, 1.0, record.time);
        assert!(
            (record.angle - expected).abs() < 1e-10,
            "t = {}: {} vs {}",
            record.time,
            record.angle,
            expected
        );
    }
}

#[test]
fn test_exact_pendulum_close_to_analytic_for_tiny_angles() {
    let theta0 = 1e-3;
    let mut pendulum = Pendulum::new(1.0, 0.05, false, false, theta0);

    let records = sample(&mut pendulum, 0.1, 10.0);

    for record in &records {
        let expected = small_angle_solution(theta0, 1.0, record.time);
        assert!((record.angle - expected).abs() < 1e-3 * theta0);
    }
}

#[test]
fn test_longer_rod_swings_slower() {
    let theta0 = 0.01;
    let mut pendulum = Pendulum::new(2.0, 0.05, false, true, theta0);

    let records = sample(&mut pendulum, 0.5, 5.0);

    for record in &records {
        let expected = small_angle_solution(theta0, 2.0, record.time);
        assert!((record.angle - expected).abs() < 1e-10);
    }
}

// =================================================================================================
// Energy
// =================================================================================================

#[test]
fn test_energy_conserved_without_resistance() {
    let mut pendulum = Pendulum::new(1.0, 0.05, false, false, 0.5);

    let records = sample(&mut pendulum, 0.01, 10.0);
    let drift = max_energy_drift(&records);

    assert!(
        drift < 1e-9 * records[0].energy,
        "energy drifted by {} (E0 = {})",
        drift,
        records[0].energy
    );
}

#[test]
fn test_energy_conserved_near_inverted_position() {
    let mut pendulum = Pendulum::new(1.0, 0.05, false, false, 3.0);

    let records = sample(&mut pendulum, 0.01, 10.0);
    let drift = max_energy_drift(&records);

    assert!(drift < 1e-8 * records[0].energy, "energy drifted by {}", drift);

    // Released below the top: never goes over it
    assert!(records.iter().all(|r| r.angle.abs() <= 3.0 + 1e-9));
}

#[test]
fn test_energy_conserved_in_water_without_resistance() {
    let mut pendulum = Pendulum::new(1.0, 0.05, false, false, 0.5);
    pendulum.select_fluid(Fluid::Water);

    let records = sample(&mut pendulum, 0.05, 5.0);

    assert!(max_energy_drift(&records) < 1e-9 * records[0].energy);
}

#[test]
fn test_resistance_decreases_energy_monotonically() {
    let mut pendulum = Pendulum::new(1.0, 0.05, true, false, 0.5);

    let records = sample(&mut pendulum, 0.01, 10.0);
    let e0 = records[0].energy;

    assert_energy_non_increasing(&records, 1e-10 * e0, "air drag");
    assert!(records.last().unwrap().energy < e0);
}

#[test]
fn test_water_damps_faster_than_air() {
    let mut in_air = Pendulum::new(1.0, 0.05, true, false, 0.5);
    let mut in_water = Pendulum::new(1.0, 0.05, true, false, 0.5);
    in_water.select_fluid(Fluid::Water);

    let e0 = in_air.total_energy();
    assert_relative_eq!(e0, in_water.total_energy(), max_relative = 1e-15);

    in_air.advance(10.0).unwrap();
    in_water.advance(10.0).unwrap();

    let air_loss = e0 - in_air.total_energy();
    let water_loss = e0 - in_water.total_energy();

    assert!(air_loss > 0.0);
    assert!(water_loss > air_loss, "water {} vs air {}", water_loss, air_loss);
}

#[test]
fn test_fluid_switch_mid_run() {
    let mut pendulum = Pendulum::new(1.0, 0.05, true, false, 0.5);

    pendulum.advance(2.0).unwrap();
    let before = pendulum.total_energy();

    pendulum.set_fluid(1).unwrap();
    assert_eq!(pendulum.fluid(), Fluid::Water);
    assert_eq!(pendulum.total_energy(), before);

    let records = sample(&mut pendulum, 0.01, 2.0);
    assert_energy_non_increasing(&records, 1e-10 * before, "after switch");
}

// =================================================================================================
// Drag regimes
// =================================================================================================

/// ω at which Re = 2·r·l·ω / ν = 0.1, scaled by `factor`
fn near_stokes_threshold(pendulum: &Pendulum, factor: f64) -> f64 {
    let parameters = pendulum.parameters();
    0.1 * parameters.kinematic_viscosity() / (2.0 * parameters.radius() * parameters.length())
        * factor
}

fn stokes_acceleration(pendulum: &Pendulum, omega: f64) -> f64 {
    let p = pendulum.parameters();
    -6.0 * PI * p.viscosity() * p.radius() * p.length() * omega / (p.mass() * p.length())
}

#[test]
fn test_pure_stokes_just_below_threshold() {
    let pendulum = Pendulum::new(1.0, 0.05, true, false, 0.0);
    let parameters = pendulum.parameters();
    let omega = near_stokes_threshold(&pendulum, 1.0 - 1e-9);

    assert!(parameters.reynolds_number(omega) < 0.1);
    assert_relative_eq!(
        parameters.drag_acceleration(omega),
        stokes_acceleration(&pendulum, omega),
        max_relative = 1e-12
    );
}

#[test]
fn test_inertial_term_added_just_above_threshold() {
    let pendulum = Pendulum::new(1.0, 0.05, true, false, 0.0);
    let p = pendulum.parameters();
    let omega = near_stokes_threshold(&pendulum, 1.0 + 1e-9);
    let reynolds = p.reynolds_number(omega);
    assert!(reynolds >= 0.1);

    let sweep = p.radius() * p.length() * omega;
    let inertial = 0.5 * p.density() * PI * sweep * sweep * drag_coefficient(reynolds)
        / (p.mass() * p.length());
    let expected = stokes_acceleration(&pendulum, omega) - inertial;

    assert_relative_eq!(p.drag_acceleration(omega), expected, max_relative = 1e-12);

    // C_D ≈ 24/Re here, so the inertial term repeats the Stokes force
    let below = p.drag_acceleration(near_stokes_threshold(&pendulum, 1.0 - 1e-9));
    let ratio = p.drag_acceleration(omega) / below;
    assert!(ratio > 1.9 && ratio < 2.1, "drag ratio {}", ratio);
}

#[test]
fn test_threshold_jump_negligible_in_full_dynamics() {
    let pendulum = Pendulum::new(1.0, 0.05, true, false, 0.0);
    let parameters = pendulum.parameters();

    let below = PendulumState::new(0.3, near_stokes_threshold(&pendulum, 1.0 - 1e-9));
    let above = PendulumState::new(0.3, near_stokes_threshold(&pendulum, 1.0 + 1e-9));
    let slope_below = parameters.evaluate(&below)[1];
    let slope_above = parameters.evaluate(&above)[1];

    let jump = (slope_above - slope_below).abs() / slope_below.abs();
    assert!(jump < 1e-9, "relative jump {:e}", jump);
}

#[test]
fn test_overflowing_velocity_reports_non_finite_state() {
    let mut pendulum = Pendulum::new(1.0, 0.05, true, false, 0.0);
    pendulum.set_velocity(1e160);

    let result = pendulum.advance(0.01);

    assert!(matches!(
        result,
        Err(PendulumError::Integration(IntegrationError::NonFiniteState { .. }))
    ));
}

#[test]
fn test_drag_opposes_motion_in_both_directions() {
    let pendulum = Pendulum::new(1.0, 0.05, true, false, 0.0);
    let parameters = pendulum.parameters();

    for omega in [1e-6, 0.01, 0.5, 3.0] {
        assert!(parameters.drag_acceleration(omega) < 0.0);
        assert!(parameters.drag_acceleration(-omega) > 0.0);
        assert_relative_eq!(
            parameters.drag_acceleration(omega),
            -parameters.drag_acceleration(-omega),
            max_relative = 1e-14
        );
    }
}

#[test]
fn test_equation_of_motion_at_rest_is_zero() {
    let pendulum = Pendulum::new(1.0, 0.05, true, false, 0.0);

    let derivative = pendulum.parameters().evaluate(&PendulumState::new(0.0, 0.0));

    assert_eq!(derivative[0], 0.0);
    assert_eq!(derivative[1], 0.0);
}

// =================================================================================================
// State access
// =================================================================================================

#[test]
fn test_angle_and_velocity_round_trip_exactly() {
    let mut pendulum = Pendulum::new(1.5, 0.05, false, false, 0.0);

    for value in [0.0, -0.0, 1e-300, 0.1, -2.75, 123.456, PI] {
        pendulum.set_angle(value);
        pendulum.set_velocity(-value);

        assert_eq!(pendulum.angle().to_bits(), value.to_bits());
        assert_eq!(pendulum.velocity().to_bits(), (-value).to_bits());
    }
}

#[test]
fn test_linear_velocity_scales_with_length() {
    let mut pendulum = Pendulum::new(1.5, 0.05, false, false, 0.0);
    pendulum.set_velocity(2.0);

    assert_relative_eq!(pendulum.linear_velocity(), 3.0, max_relative = 1e-15);
    assert_relative_eq!(
        pendulum.kinetic_energy(),
        0.5 * pendulum.mass() * 9.0,
        max_relative = 1e-14
    );
}

#[test]
fn test_advance_in_pieces_matches_single_advance() {
    let mut whole = Pendulum::new(1.0, 0.05, true, false, 1.2);
    let mut pieces = whole.clone();

    whole.advance(2.0).unwrap();
    for _ in 0..20 {
        pieces.advance(0.1).unwrap();
    }

    assert!(relative_error(pieces.angle(), whole.angle()) < 1e-9);
    assert!(relative_error(pieces.velocity(), whole.velocity()) < 1e-9);
}
