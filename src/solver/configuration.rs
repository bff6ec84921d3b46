//! Integrator configuration and run statistics
//!
//! # Defaults
//!
//! | Parameter            | Default  |
//! |----------------------|----------|
//! | absolute tolerance   | 1e-14    |
//! | relative tolerance   | 1e-14    |
//! | initial trial step   | 0.01     |
//! | minimum step         | 1e-12    |
//! | max rejected trials  | 500      |

use crate::error::IntegrationError;

/// Default absolute and relative error tolerance
pub const DEFAULT_TOLERANCE: f64 = 1.0e-14;

/// Default initial trial step size
pub const DEFAULT_INITIAL_STEP: f64 = 0.01;

/// Default lower bound on the step size before giving up
pub const DEFAULT_MIN_STEP: f64 = 1.0e-12;

/// Default number of consecutive rejected trials before giving up
pub const DEFAULT_MAX_REJECTED_STEPS: usize = 500;

// =================================================================================================
// Integrator configuration
// =================================================================================================

/// Configuration of the adaptive integrator
///
/// # Examples
///
/// ```rust
/// use pendulum_rs::solver::IntegratorConfiguration;
///
/// let config = IntegratorConfiguration::default()
///     .with_tolerances(1e-10, 1e-10)
///     .with_initial_step(0.005);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct IntegratorConfiguration {
    /// Absolute error tolerance per state component
    pub absolute_tolerance: f64,

    /// Relative error tolerance per state component
    pub relative_tolerance: f64,

    /// First trial step size
    pub initial_step: f64,

    /// Smallest step size the controller may propose
    pub min_step: f64,

    /// Consecutive rejected trials allowed before failing
    pub max_rejected_steps: usize,
}

impl Default for IntegratorConfiguration {
    fn default() -> Self {
        Self {
            absolute_tolerance: DEFAULT_TOLERANCE,
            relative_tolerance: DEFAULT_TOLERANCE,
            initial_step: DEFAULT_INITIAL_STEP,
            min_step: DEFAULT_MIN_STEP,
            max_rejected_steps: DEFAULT_MAX_REJECTED_STEPS,
        }
    }
}

impl IntegratorConfiguration {
    /// Create a configuration with the default tolerances
    pub fn new() -> Self {
        Self::default()
    }

    /// Set absolute and relative tolerances
    pub fn with_tolerances(mut self, absolute: f64, relative: f64) -> Self {
        self.absolute_tolerance = absolute;
        self.relative_tolerance = relative;
        self
    }

    /// Set the first trial step
    pub fn with_initial_step(mut self, step: f64) -> Self {
        self.initial_step = step;
        self
    }

    /// Set the smallest admissible step
    pub fn with_min_step(mut self, step: f64) -> Self {
        self.min_step = step;
        self
    }

    /// Set the number of consecutive rejected trials allowed
    pub fn with_max_rejected_steps(mut self, count: usize) -> Self {
        self.max_rejected_steps = count;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), IntegrationError> {
        let positive = |value: f64| value.is_finite() && value > 0.0;

        if !(self.absolute_tolerance.is_finite() && self.absolute_tolerance >= 0.0)
            || !(self.relative_tolerance.is_finite() && self.relative_tolerance >= 0.0)
        {
            return Err(IntegrationError::InvalidConfiguration(
                "tolerances must be finite and non-negative".to_string(),
            ));
        }
        if self.absolute_tolerance == 0.0 && self.relative_tolerance == 0.0 {
            return Err(IntegrationError::InvalidConfiguration(
                "at least one tolerance must be positive".to_string(),
            ));
        }
        if !positive(self.initial_step) {
            return Err(IntegrationError::InvalidConfiguration(format!(
                "initial step must be positive, got {}",
                self.initial_step
            )));
        }
        if !positive(self.min_step) || self.min_step > self.initial_step {
            return Err(IntegrationError::InvalidConfiguration(format!(
                "minimum step must be positive and not exceed the initial step, got {}",
                self.min_step
            )));
        }
        if self.max_rejected_steps == 0 {
            return Err(IntegrationError::InvalidConfiguration(
                "at least one rejected step must be allowed".to_string(),
            ));
        }

        Ok(())
    }
}

// =================================================================================================
// Statistics
// =================================================================================================

/// Counters collected over one advance call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntegrationStats {
    /// Steps whose error estimate met the tolerance
    pub accepted_steps: usize,

    /// Trial steps thrown away
    pub rejected_steps: usize,

    /// Right-hand side evaluations
    pub evaluations: usize,
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = IntegratorConfiguration::default();

        assert_eq!(config.absolute_tolerance, 1e-14);
        assert_eq!(config.relative_tolerance, 1e-14);
        assert_eq!(config.initial_step, 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = IntegratorConfiguration::new()
            .with_tolerances(1e-8, 1e-9)
            .with_initial_step(0.1)
            .with_min_step(1e-6)
            .with_max_rejected_steps(10);

        assert_eq!(config.absolute_tolerance, 1e-8);
        assert_eq!(config.relative_tolerance, 1e-9);
        assert_eq!(config.initial_step, 0.1);
        assert_eq!(config.min_step, 1e-6);
        assert_eq!(config.max_rejected_steps, 10);
    }

    #[test]
    fn test_rejects_bad_tolerances() {
        let negative = IntegratorConfiguration::new().with_tolerances(-1.0, 1e-10);
        assert!(negative.validate().is_err());

        let zero = IntegratorConfiguration::new().with_tolerances(0.0, 0.0);
        assert!(zero.validate().is_err());

        let nan = IntegratorConfiguration::new().with_tolerances(f64::NAN, 1e-10);
        assert!(nan.validate().is_err());

        let absolute_only = IntegratorConfiguration::new().with_tolerances(1e-10, 0.0);
        assert!(absolute_only.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_steps() {
        assert!(IntegratorConfiguration::new().with_initial_step(0.0).validate().is_err());
        assert!(IntegratorConfiguration::new().with_initial_step(f64::INFINITY).validate().is_err());
        assert!(IntegratorConfiguration::new().with_min_step(0.0).validate().is_err());
        assert!(IntegratorConfiguration::new().with_min_step(1.0).validate().is_err());
        assert!(IntegratorConfiguration::new().with_max_rejected_steps(0).validate().is_err());
    }
}
