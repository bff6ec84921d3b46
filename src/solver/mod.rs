//! Numerical integration
//!
//! This module advances the state of any [`EquationOfMotion`] in time. It
//! performs no physics: the model supplies `dx/dt`, the integrator supplies
//! the method.
//!
//! # Module Organization
//!
//! - **`configuration`**: tolerances and step bounds (`IntegratorConfiguration`)
//!   plus run counters (`IntegrationStats`)
//! - **`methods`**: the adaptive Bulirsch-Stoer stepper (one trial step)
//! - **`integrator`**: the driver looping the stepper over a time span
//!   (`MotionIntegrator`)
//!
//! # Workflow
//!
//! ```text
//! ┌──────────────────────┐
//! │  EquationOfMotion<N> │  dx/dt = f(x)
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐      ┌─────────────────────────┐
//! │  MotionIntegrator    │◄─────┤ IntegratorConfiguration │
//! │  advance / sampled   │      └─────────────────────────┘
//! └──────────┬───────────┘
//!            │ try_step
//! ┌──────────▼───────────┐
//! │  BulirschStoer       │  accepted / rejected + next step
//! └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use nalgebra::{SVector, Vector2};
//! use pendulum_rs::physics::EquationOfMotion;
//! use pendulum_rs::solver::MotionIntegrator;
//!
//! struct Oscillator;
//!
//! impl EquationOfMotion<2> for Oscillator {
//!     fn evaluate(&self, x: &SVector<f64, 2>) -> SVector<f64, 2> {
//!         Vector2::new(x[1], -x[0])
//!     }
//!     fn name(&self) -> &str { "Oscillator" }
//! }
//!
//! let mut integrator = MotionIntegrator::default();
//! let mut state = Vector2::new(1.0, 0.0);
//! integrator.advance(&Oscillator, &mut state, 1.0).unwrap();
//!
//! assert!((state[0] - 1.0_f64.cos()).abs() < 1e-10);
//! ```

use nalgebra::SVector;

use crate::error::IntegrationError;

// module declaration
pub mod configuration;
pub mod integrator;
pub mod methods;

// re-export commonly used types for convenience
pub use configuration::{IntegrationStats, IntegratorConfiguration};
pub use integrator::{sample_count, MotionIntegrator};
pub use methods::{BulirschStoer, StepOutcome};

// =================================================================================================
// Helpers
// =================================================================================================

/// Check that every component of a state is finite
///
/// NaN arises from 0/0 or Inf - Inf, Inf from overflow. Either means the
/// integration cannot continue.
pub(crate) fn validate_state<const N: usize>(
    state: &SVector<f64, N>,
    time: f64,
) -> Result<(), IntegrationError> {
    match state.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(IntegrationError::NonFiniteState { time, index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    #[test]
    fn test_validate_state_accepts_finite() {
        assert!(validate_state(&Vector2::new(1.0, -1e300), 0.0).is_ok());
    }

    #[test]
    fn test_validate_state_detects_nan() {
        let result = validate_state(&Vector2::new(0.0, f64::NAN), 2.5);
        assert_eq!(
            result,
            Err(IntegrationError::NonFiniteState { time: 2.5, index: 1 })
        );
    }

    #[test]
    fn test_validate_state_detects_inf() {
        let result = validate_state(&Vector2::new(f64::NEG_INFINITY, 0.0), 1.0);
        assert!(matches!(
            result,
            Err(IntegrationError::NonFiniteState { index: 0, .. })
        ));
    }
}
