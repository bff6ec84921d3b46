//! Physics of the pendulum
//!
//! This module provides the physical building blocks the equation of motion
//! is made of, independent from any numerical method.
//!
//! # Core Concepts
//!
//! - **Equation of motion**: `EquationOfMotion` evaluates dx/dt at a state
//! - **Drag**: Reynolds number and empirical drag coefficient of a sphere
//! - **Fluid**: air and water presets (viscosity, density)
//!
//! # Architecture
//!
//! Physical models are **separate from numerical integrators**:
//! - The model provides the **equations** (physics)
//! - The integrator provides the **method** to advance them (numerics)
//!
//! ```text
//! drag::drag_coefficient ──► PendulumParameters::evaluate ──► MotionIntegrator
//!        (C_D(Re))              (EquationOfMotion<2>)          (Bulirsch-Stoer)
//! ```

// module declaration
pub mod constants;
pub mod drag;
pub mod fluid;
pub mod traits;

// re-export commonly used types for convenience
pub use drag::{drag_coefficient, reynolds_number};
pub use fluid::{Fluid, FluidProperties};
pub use traits::{EquationOfMotion, PendulumState, ANGLE, ANGULAR_VELOCITY};
