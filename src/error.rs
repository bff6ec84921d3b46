//! Error types
//!
//! - `PendulumError`: top-level error returned by the model, the facade and
//!   the scenario runner
//! - `IntegrationError`: failures of the adaptive integrator
//! - `ExportError`: failures while writing or reading trajectory files

use thiserror::Error;

/// Errors raised by the pendulum model and its collaborators
#[derive(Debug, Error)]
pub enum PendulumError {
    /// Fluid selector other than 0 (air) or 1 (water)
    #[error("invalid fluid selector {0} (expected 0 = air or 1 = water)")]
    InvalidFluid(i32),

    /// Negative or non-finite time span
    #[error("invalid duration {0} (must be finite and non-negative)")]
    InvalidDuration(f64),

    /// Non-positive or non-finite sampling interval
    #[error("invalid sampling interval {0} (must be finite and positive)")]
    InvalidSamplingInterval(f64),

    /// Scenario parameters rejected before running
    #[error("invalid scenario '{name}': {reason}")]
    InvalidScenario { name: String, reason: String },

    /// Facade call made before `initialize`
    #[error("no pendulum initialized on this thread")]
    NotInitialized,

    #[error(transparent)]
    Integration(#[from] IntegrationError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Failures of the adaptive integrator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    /// Tolerances or step bounds are not usable
    #[error("invalid integrator configuration: {0}")]
    InvalidConfiguration(String),

    /// Step size shrank below the configured minimum
    #[error("step size {step:e} fell below minimum {minimum:e} at t = {time}")]
    StepSizeUnderflow { time: f64, step: f64, minimum: f64 },

    /// Too many consecutive rejected trial steps
    #[error("{rejected} consecutive rejected steps at t = {time}")]
    TooManyRejections { time: f64, rejected: usize },

    /// State became NaN or infinite
    #[error("non-finite state component {index} at t = {time}")]
    NonFiniteState { time: f64, index: usize },
}

/// Failures while exporting or loading trajectories
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Nothing to export
    #[error("no data to export")]
    EmptyData,

    /// A value that cannot be written (NaN or infinite)
    #[error("non-finite value in {0}")]
    NonFinite(String),

    /// Malformed line in a trajectory file
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Plot rendering failed
    #[error("plot error: {0}")]
    Plot(String),
}
