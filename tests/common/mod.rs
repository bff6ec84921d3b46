//! Common utilities for integration tests

#![allow(dead_code)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{ExponentialDecay, HarmonicOscillator};
pub use test_helpers::{
    assert_energy_non_increasing,
    max_energy_drift,
    relative_error,
    sample,
    small_angle_solution,
};
