//! Equation of motion trait and state types
//!
//! This module defines the core API between physics and numerics:
//! - `EquationOfMotion`: trait for any autonomous first-order ODE system
//! - `PendulumState`: the (θ, ω) state vector of a single pendulum

use nalgebra::{SVector, Vector2};

// =================================================================================================
// State Types
// =================================================================================================

/// State of a single pendulum: `[θ, ω]`
///
/// - `θ` (index 0): angle from the vertical \[rad\]
/// - `ω` (index 1): angular velocity dθ/dt \[rad/s\]
///
/// The second component is always the *angular* velocity. The linear
/// velocity of the sphere is `l·ω` and is derived on demand.
pub type PendulumState = Vector2<f64>;

/// Index of the angle in a [`PendulumState`]
pub const ANGLE: usize = 0;

/// Index of the angular velocity in a [`PendulumState`]
pub const ANGULAR_VELOCITY: usize = 1;

// =================================================================================================
// Equation of Motion Trait
// =================================================================================================

/// Right-hand side of an autonomous ODE system `dx/dt = f(x)`
///
/// # Responsibility
///
/// Evaluates the time derivative of the state. Does NOT integrate it
/// (that's the integrator's job).
///
/// The implementor binds its own parameters: `evaluate` is the
/// `(state, parameters) -> derivative` contract with the parameters
/// captured by `self`.
///
/// # Determinism
///
/// `evaluate` is called many times per integration step at trial states that
/// are never committed. It must be a pure function of `state` and the
/// implementor's parameters.
///
/// # Example
///
/// ```rust
/// use nalgebra::SVector;
/// use pendulum_rs::physics::EquationOfMotion;
///
/// /// dy/dt = -k y
/// struct Decay { rate: f64 }
///
/// impl EquationOfMotion<1> for Decay {
///     fn evaluate(&self, state: &SVector<f64, 1>) -> SVector<f64, 1> {
///         state * -self.rate
///     }
///
///     fn name(&self) -> &str { "Decay" }
/// }
///
/// let decay = Decay { rate: 2.0 };
/// let derivative = decay.evaluate(&SVector::<f64, 1>::new(1.0));
/// assert_eq!(derivative[0], -2.0);
/// ```
pub trait EquationOfMotion<const N: usize> {
    /// Computes `dx/dt` at `state`
    fn evaluate(&self, state: &SVector<f64, N>) -> SVector<f64, N>;

    /// Name of the system (used for logging)
    fn name(&self) -> &str;

    /// Description of the system (optional)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Rotation {
        omega: f64,
    }

    impl EquationOfMotion<2> for Rotation {
        fn evaluate(&self, state: &SVector<f64, 2>) -> SVector<f64, 2> {
            Vector2::new(-self.omega * state[1], self.omega * state[0])
        }

        fn name(&self) -> &str {
            "Rotation"
        }
    }

    #[test]
    fn test_state_indices() {
        let state = PendulumState::new(0.25, -1.5);

        assert_eq!(state[ANGLE], 0.25);
        assert_eq!(state[ANGULAR_VELOCITY], -1.5);
    }

    #[test]
    fn test_trait_default_description() {
        let system = Rotation { omega: 1.0 };

        assert_eq!(system.name(), "Rotation");
        assert!(system.description().is_none());

        let derivative = system.evaluate(&Vector2::new(1.0, 0.0));
        assert_eq!(derivative, Vector2::new(0.0, 1.0));
    }
}
