//! Motion integrator driver
//!
//! Drives the adaptive [`BulirschStoer`] stepper over a time span. Two entry
//! points:
//!
//! - [`MotionIntegrator::advance`]: integrate from a clock reset to 0 up to
//!   `duration`, mutating the state in place.
//! - [`MotionIntegrator::advance_sampled`]: integrate from 0 to `duration`
//!   and hand the state to an observer at every multiple of the sampling
//!   interval (t = 0 included).
//!
//! The stepper's order and the suggested step size persist between calls.

use nalgebra::SVector;
use tracing::debug;

use crate::error::IntegrationError;
use crate::physics::EquationOfMotion;
use crate::solver::methods::{BulirschStoer, StepOutcome};
use crate::solver::{validate_state, IntegrationStats, IntegratorConfiguration};

/// Relative slack when counting samples so that `10.0 / 0.001` yields 10000
const SAMPLE_SLACK: f64 = 1.0e-12;

/// Number of sampling intervals that fit in `duration`
///
/// Samples are taken at `i · interval` for `i = 0..=sample_count`.
pub fn sample_count(interval: f64, duration: f64) -> usize {
    ((duration / interval) * (1.0 + SAMPLE_SLACK)).floor() as usize
}

/// Adaptive integrator with persistent step-size control
#[derive(Clone, Debug)]
pub struct MotionIntegrator {
    configuration: IntegratorConfiguration,
    stepper: BulirschStoer,
    step: f64,
    statistics: IntegrationStats,
}

impl Default for MotionIntegrator {
    fn default() -> Self {
        Self::build(IntegratorConfiguration::default())
    }
}

impl MotionIntegrator {
    /// Create an integrator from a validated configuration
    pub fn new(configuration: IntegratorConfiguration) -> Result<Self, IntegrationError> {
        configuration.validate()?;
        Ok(Self::build(configuration))
    }

    fn build(configuration: IntegratorConfiguration) -> Self {
        Self {
            stepper: BulirschStoer::new(
                configuration.absolute_tolerance,
                configuration.relative_tolerance,
            ),
            step: configuration.initial_step,
            statistics: IntegrationStats::default(),
            configuration,
        }
    }

    /// Configuration in use
    pub fn configuration(&self) -> &IntegratorConfiguration {
        &self.configuration
    }

    /// Step size the next trial step will start from
    pub fn suggested_step(&self) -> f64 {
        self.step
    }

    /// Counters of the most recent `advance` / `advance_sampled` call
    pub fn last_statistics(&self) -> IntegrationStats {
        self.statistics
    }

    /// Integrate `state` from 0 to `duration`
    ///
    /// Returns the step size suggested for the next call.
    pub fn advance<const N: usize, S>(
        &mut self,
        system: &S,
        state: &mut SVector<f64, N>,
        duration: f64,
    ) -> Result<f64, IntegrationError>
    where
        S: EquationOfMotion<N> + ?Sized,
    {
        self.statistics = IntegrationStats::default();
        self.integrate_interval(system, state, 0.0, duration)?;

        debug!(
            system = system.name(),
            duration,
            accepted = self.statistics.accepted_steps,
            rejected = self.statistics.rejected_steps,
            "advanced state"
        );

        Ok(self.step)
    }

    /// Integrate `state` from 0 to `duration`, observing it every `interval`
    ///
    /// The observer is called with `(i · interval, state)` for
    /// `i = 0..=sample_count(interval, duration)`; the first call sees the
    /// unintegrated state. Returns the number of observed samples.
    pub fn advance_sampled<const N: usize, S, F, E>(
        &mut self,
        system: &S,
        state: &mut SVector<f64, N>,
        interval: f64,
        duration: f64,
        mut observer: F,
    ) -> Result<usize, E>
    where
        S: EquationOfMotion<N> + ?Sized,
        F: FnMut(f64, &SVector<f64, N>) -> Result<(), E>,
        E: From<IntegrationError>,
    {
        self.statistics = IntegrationStats::default();

        let intervals = sample_count(interval, duration);
        observer(0.0, &*state)?;

        let mut previous = 0.0;
        for i in 1..=intervals {
            let time = i as f64 * interval;
            self.integrate_interval(system, state, previous, time)?;
            observer(time, &*state)?;
            previous = time;
        }

        debug!(
            system = system.name(),
            samples = intervals + 1,
            accepted = self.statistics.accepted_steps,
            rejected = self.statistics.rejected_steps,
            evaluations = self.statistics.evaluations,
            "sampled integration finished"
        );

        Ok(intervals + 1)
    }

    /// Integrate from `start` to `end`, landing exactly on `end`
    fn integrate_interval<const N: usize, S>(
        &mut self,
        system: &S,
        state: &mut SVector<f64, N>,
        start: f64,
        end: f64,
    ) -> Result<(), IntegrationError>
    where
        S: EquationOfMotion<N> + ?Sized,
    {
        let evaluations_before = self.stepper.evaluations();
        let mut time = start;
        let mut rejected = 0usize;
        let mut derivative = system.evaluate(state);
        let mut extra_evaluations = 1usize;

        while time < end {
            let remaining = end - time;
            let truncated = self.step >= remaining;
            let step = if truncated { remaining } else { self.step };
            let committed = *state;

            match self.stepper.try_step(system, state, &derivative, step) {
                StepOutcome::Accepted { next_step } => {
                    validate_state(state, time + step)?;

                    if truncated {
                        time = end;
                        self.step = next_step.max(self.step);
                    } else {
                        // the error reports `time`, so `state` must not run ahead of it
                        if next_step < self.configuration.min_step {
                            *state = committed;
                            return Err(IntegrationError::StepSizeUnderflow {
                                time,
                                step: next_step,
                                minimum: self.configuration.min_step,
                            });
                        }
                        time += step;
                        self.step = next_step;
                    }

                    rejected = 0;
                    self.statistics.accepted_steps += 1;

                    if time < end {
                        derivative = system.evaluate(state);
                        extra_evaluations += 1;
                    }
                }
                StepOutcome::Rejected { next_step } => {
                    rejected += 1;
                    self.statistics.rejected_steps += 1;

                    if next_step < self.configuration.min_step {
                        return Err(IntegrationError::StepSizeUnderflow {
                            time,
                            step: next_step,
                            minimum: self.configuration.min_step,
                        });
                    }
                    if rejected > self.configuration.max_rejected_steps {
                        return Err(IntegrationError::TooManyRejections { time, rejected });
                    }

                    self.step = next_step;
                }
            }
        }

        self.statistics.evaluations +=
            self.stepper.evaluations() - evaluations_before + extra_evaluations;

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{SVector, Vector1, Vector2};

    struct Oscillator;

    impl EquationOfMotion<2> for Oscillator {
        fn evaluate(&self, state: &SVector<f64, 2>) -> SVector<f64, 2> {
            Vector2::new(state[1], -state[0])
        }

        fn name(&self) -> &str {
            "Oscillator"
        }
    }

    /// dy/dt = y², blows up at t = 1 for y(0) = 1
    struct BlowUp;

    impl EquationOfMotion<1> for BlowUp {
        fn evaluate(&self, state: &SVector<f64, 1>) -> SVector<f64, 1> {
            Vector1::new(state[0] * state[0])
        }

        fn name(&self) -> &str {
            "BlowUp"
        }
    }

    #[test]
    fn test_sample_count() {
        assert_eq!(sample_count(0.001, 10.0), 10000);
        assert_eq!(sample_count(0.001, 4.0), 4000);
        assert_eq!(sample_count(0.1, 0.3), 3);
        assert_eq!(sample_count(0.3, 1.0), 3);
        assert_eq!(sample_count(1.0, 0.0), 0);
    }

    #[test]
    fn test_new_rejects_invalid_configuration() {
        let config = IntegratorConfiguration::default().with_initial_step(-1.0);
        assert!(MotionIntegrator::new(config).is_err());
    }

    #[test]
    fn test_advance_full_period() {
        let mut integrator = MotionIntegrator::default();
        let mut state = Vector2::new(1.0, 0.0);

        integrator
            .advance(&Oscillator, &mut state, 2.0 * std::f64::consts::PI)
            .unwrap();

        assert_relative_eq!(state[0], 1.0, epsilon = 1e-11);
        assert_relative_eq!(state[1], 0.0, epsilon = 1e-11);

        let stats = integrator.last_statistics();
        assert!(stats.accepted_steps > 0);
        assert!(stats.evaluations > stats.accepted_steps);
    }

    #[test]
    fn test_advance_zero_duration_is_noop() {
        let mut integrator = MotionIntegrator::default();
        let mut state = Vector2::new(0.3, -0.2);

        integrator.advance(&Oscillator, &mut state, 0.0).unwrap();

        assert_eq!(state, Vector2::new(0.3, -0.2));
        assert_eq!(integrator.last_statistics().accepted_steps, 0);
    }

    #[test]
    fn test_repeated_small_advances_match_single_advance() {
        let mut stepwise = MotionIntegrator::default();
        let mut once = MotionIntegrator::default();
        let mut a = Vector2::new(1.0, 0.0);
        let mut b = Vector2::new(1.0, 0.0);

        for _ in 0..1000 {
            stepwise.advance(&Oscillator, &mut a, 0.001).unwrap();
        }
        once.advance(&Oscillator, &mut b, 1.0).unwrap();

        assert_relative_eq!(a[0], 1.0_f64.cos(), epsilon = 1e-10);
        assert_relative_eq!(a[0], b[0], epsilon = 1e-10);
        assert_relative_eq!(a[1], b[1], epsilon = 1e-10);
    }

    #[test]
    fn test_advance_sampled_times_and_first_sample() {
        let mut integrator = MotionIntegrator::default();
        let mut state = Vector2::new(0.5, 0.0);
        let mut samples = Vec::new();

        let count = integrator
            .advance_sampled(&Oscillator, &mut state, 0.1, 1.0, |t, x| {
                samples.push((t, x[0]));
                Ok::<(), IntegrationError>(())
            })
            .unwrap();

        assert_eq!(count, 11);
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[0], (0.0, 0.5));
        for (i, (t, angle)) in samples.iter().enumerate() {
            assert_relative_eq!(*t, i as f64 * 0.1, epsilon = 1e-15);
            assert_relative_eq!(*angle, 0.5 * t.cos(), epsilon = 1e-11);
        }
    }

    #[test]
    fn test_observer_error_stops_integration() {
        let mut integrator = MotionIntegrator::default();
        let mut state = Vector2::new(0.5, 0.0);
        let mut calls = 0;

        let result: Result<usize, IntegrationError> =
            integrator.advance_sampled(&Oscillator, &mut state, 0.1, 1.0, |t, _| {
                calls += 1;
                if t > 0.25 {
                    Err(IntegrationError::InvalidConfiguration("stop".to_string()))
                } else {
                    Ok(())
                }
            });

        assert!(result.is_err());
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_singularity_is_reported() {
        let config = IntegratorConfiguration::default()
            .with_tolerances(1e-10, 1e-10)
            .with_min_step(1e-9);
        let mut integrator = MotionIntegrator::new(config).unwrap();
        let mut state = Vector1::new(1.0);

        let result = integrator.advance(&BlowUp, &mut state, 2.0);

        assert!(matches!(
            result,
            Err(IntegrationError::StepSizeUnderflow { .. })
                | Err(IntegrationError::TooManyRejections { .. })
                | Err(IntegrationError::NonFiniteState { .. })
        ));
    }

    #[test]
    fn test_underflow_leaves_state_at_reported_time() {
        let config = IntegratorConfiguration::default()
            .with_tolerances(1e-12, 1e-12)
            .with_min_step(1e-4);
        let mut integrator = MotionIntegrator::new(config).unwrap();
        let mut state = Vector1::new(1.0);

        let time = match integrator.advance(&BlowUp, &mut state, 2.0) {
            Err(IntegrationError::StepSizeUnderflow { time, .. }) => time,
            Err(IntegrationError::TooManyRejections { time, .. }) => time,
            other => panic!("expected the singularity to stop integration, got {:?}", other),
        };

        // y(t) = 1 / (1 - t)
        assert!(time < 1.0);
        assert!(state[0].is_finite());
        assert_relative_eq!(state[0], 1.0 / (1.0 - time), max_relative = 1e-5);
    }
}
