//! Mock equations of motion for testing
//!
//! These systems have known analytical solutions, making them
//! ideal for validating the integrator independently of the pendulum.

use nalgebra::{SVector, Vector1, Vector2};
use pendulum_rs::physics::EquationOfMotion;

// =================================================================================================
// Exponential Decay: dy/dt = -k*y
// =================================================================================================

/// Exponential decay: dy/dt = -k*y
///
/// Analytical solution: y(t) = y₀ * exp(-k*t)
pub struct ExponentialDecay {
    pub decay_rate: f64,
}

impl ExponentialDecay {
    pub fn new(decay_rate: f64) -> Self {
        Self { decay_rate }
    }

    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 * (-self.decay_rate * t).exp()
    }
}

impl EquationOfMotion<1> for ExponentialDecay {
    fn evaluate(&self, state: &SVector<f64, 1>) -> SVector<f64, 1> {
        Vector1::new(-self.decay_rate * state[0])
    }

    fn name(&self) -> &str {
        "Exponential Decay"
    }
}

// =================================================================================================
// Harmonic Oscillator: x'' = -w²x
// =================================================================================================

/// Undamped oscillator with angular frequency `w`
///
/// Analytical solution from rest at x₀: x(t) = x₀·cos(w·t)
pub struct HarmonicOscillator {
    pub frequency: f64,
}

impl HarmonicOscillator {
    pub fn new(frequency: f64) -> Self {
        Self { frequency }
    }

    pub fn analytical_solution(&self, t: f64, x0: f64) -> (f64, f64) {
        let phase = self.frequency * t;
        (x0 * phase.cos(), -x0 * self.frequency * phase.sin())
    }
}

impl EquationOfMotion<2> for HarmonicOscillator {
    fn evaluate(&self, state: &SVector<f64, 2>) -> SVector<f64, 2> {
        Vector2::new(state[1], -self.frequency * self.frequency * state[0])
    }

    fn name(&self) -> &str {
        "Harmonic Oscillator"
    }
}
