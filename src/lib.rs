//! pendulum-rs: Damped Pendulum Simulation
//!
//! A rigid rod of length l carrying a solid aluminium sphere of radius r,
//! swinging in air or water. The restoring force is either exact
//! (`g·sin θ / l`) or linearized (`g·θ / l`); fluid drag uses a
//! Reynolds-dependent drag coefficient. The motion is integrated with an
//! adaptive Bulirsch-Stoer scheme at tight tolerances and can be sampled to
//! CSV trajectories and plotted.
//!
//! # Architecture
//!
//! pendulum-rs is built on the separation of **physics and numerics**:
//! - The pendulum parameters define the equation of motion (what to solve)
//! - The integrator provides the method (how to solve it)
//!
//! ```text
//! physics ──► models ──► solver
//!   drag       Pendulum    MotionIntegrator ──► output (CSV, plots)
//!   fluid      Parameters  BulirschStoer
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use pendulum_rs::prelude::*;
//!
//! // 1 m rod, 5 cm sphere, drag on, exact restoring force, released at 30°
//! let mut pendulum = Pendulum::new(1.0, 0.05, true, false, 0.5235988);
//! pendulum.select_fluid(Fluid::Water);
//!
//! let mut records: Vec<TrajectoryRecord> = Vec::new();
//! let count = pendulum.advance_with_sampling(0.01, &mut records, 1.0)?;
//!
//! assert_eq!(count, 101);
//! assert!(records[100].energy < records[0].energy);
//! # Ok::<(), PendulumError>(())
//! ```
//!
//! # Modules
//!
//! - [`physics`]: drag correlations, fluids, the `EquationOfMotion` trait
//! - [`models`]: pendulum parameters and the `Pendulum` object
//! - [`solver`]: adaptive Bulirsch-Stoer integration
//! - [`output`]: CSV export and plots
//! - [`scenario`]: named batch runs
//! - [`facade`]: thread-local function-style access to one pendulum
//! - [`error`]: error types

pub mod error;
pub mod facade;
pub mod models;
pub mod output;
pub mod physics;
pub mod scenario;
pub mod solver;

pub use error::{ExportError, IntegrationError, PendulumError};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use pendulum_rs::prelude::*;
    //! ```
    pub use crate::error::{ExportError, IntegrationError, PendulumError};
    pub use crate::models::{Pendulum, PendulumParameters};
    pub use crate::output::{CsvConfig, SampleSink, TrajectoryRecord};
    pub use crate::physics::{EquationOfMotion, Fluid, PendulumState};
    pub use crate::scenario::{PendulumScenario, ScenarioReport};
    pub use crate::solver::{IntegratorConfiguration, MotionIntegrator};
}
