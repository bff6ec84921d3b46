//! Pendulum model
//!
//! [`PendulumParameters`] implements [`EquationOfMotion`](crate::physics::EquationOfMotion):
//! the integrator calls `evaluate` at every trial state, the parameters are
//! responsible for the physics (gravity, drag), the integrator for the time
//! stepping.
//!
//! [`Pendulum`] bundles parameters, state and integrator into the object
//! callers work with.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod parameters;
pub mod pendulum;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use parameters::PendulumParameters;
pub use pendulum::Pendulum;
