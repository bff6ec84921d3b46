//! Sphere pendulum: state, parameters and integrator in one object
//!
//! [`Pendulum`] is what callers hold. It owns
//! - the [`PendulumState`] `(θ, ω)`, ω being the **angular** velocity,
//! - the [`PendulumParameters`] (geometry, fluid, behaviour flags),
//! - a [`MotionIntegrator`] whose step-size control carries over between calls.
//!
//! # Example
//!
//! ```rust
//! use pendulum_rs::models::Pendulum;
//!
//! let mut pendulum = Pendulum::new(1.0, 0.05, false, false, 0.5);
//! let energy = pendulum.total_energy();
//!
//! for _ in 0..100 {
//!     pendulum.advance(0.01)?;
//! }
//!
//! assert!((pendulum.total_energy() - energy).abs() < 1e-10);
//! # Ok::<(), pendulum_rs::PendulumError>(())
//! ```

use std::path::Path;

use crate::error::PendulumError;
use crate::models::PendulumParameters;
use crate::output::export::{CsvConfig, CsvTrajectoryWriter, SampleSink, TrajectoryRecord};
use crate::physics::{Fluid, PendulumState, ANGLE, ANGULAR_VELOCITY};
use crate::solver::{IntegrationStats, IntegratorConfiguration, MotionIntegrator};

/// A sphere pendulum that can be advanced in time
#[derive(Clone, Debug)]
pub struct Pendulum {
    parameters: PendulumParameters,
    state: PendulumState,
    integrator: MotionIntegrator,
}

impl Pendulum {
    /// Creates a pendulum at rest at `initial_angle`, immersed in air
    ///
    /// # Arguments
    ///
    /// * `length` - Rod length l \[m\], must be positive
    /// * `radius` - Sphere radius r \[m\], must be positive
    /// * `resistance` - Include fluid drag
    /// * `simple_harmonic` - Linearize the restoring force
    /// * `initial_angle` - θ₀ \[rad\], must be finite
    ///
    /// Uses the default integrator tolerances (1e-14).
    pub fn new(
        length: f64,
        radius: f64,
        resistance: bool,
        simple_harmonic: bool,
        initial_angle: f64,
    ) -> Self {
        debug_assert!(initial_angle.is_finite(), "Initial angle must be finite");

        Self {
            parameters: PendulumParameters::new(length, radius, resistance, simple_harmonic),
            state: PendulumState::new(initial_angle, 0.0),
            integrator: MotionIntegrator::default(),
        }
    }

    /// Replaces the integrator with one built from `configuration`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn with_integrator(
        mut self,
        configuration: IntegratorConfiguration,
    ) -> Result<Self, PendulumError> {
        self.integrator = MotionIntegrator::new(configuration)?;
        Ok(self)
    }

    // ==================== State ====================

    /// Angle θ from the vertical \[rad\]
    #[inline]
    pub fn angle(&self) -> f64 {
        self.state[ANGLE]
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.state[ANGLE] = angle;
    }

    /// Angular velocity ω = dθ/dt \[rad/s\]
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.state[ANGULAR_VELOCITY]
    }

    /// Sets the angular velocity ω \[rad/s\]
    pub fn set_velocity(&mut self, velocity: f64) {
        self.state[ANGULAR_VELOCITY] = velocity;
    }

    /// Linear velocity of the sphere l·ω \[m/s\]
    pub fn linear_velocity(&self) -> f64 {
        self.parameters.length() * self.state[ANGULAR_VELOCITY]
    }

    /// Current `(θ, ω)` state
    pub fn state(&self) -> &PendulumState {
        &self.state
    }

    // ==================== Parameters ====================

    pub fn parameters(&self) -> &PendulumParameters {
        &self.parameters
    }

    pub fn length(&self) -> f64 {
        self.parameters.length()
    }

    pub fn radius(&self) -> f64 {
        self.parameters.radius()
    }

    pub fn mass(&self) -> f64 {
        self.parameters.mass()
    }

    pub fn fluid(&self) -> Fluid {
        self.parameters.fluid()
    }

    pub fn kinematic_viscosity(&self) -> f64 {
        self.parameters.kinematic_viscosity()
    }

    pub fn resistance(&self) -> bool {
        self.parameters.resistance()
    }

    pub fn set_resistance(&mut self, enabled: bool) {
        self.parameters.set_resistance(enabled);
    }

    pub fn simple_harmonic(&self) -> bool {
        self.parameters.simple_harmonic()
    }

    pub fn set_simple_harmonic(&mut self, enabled: bool) {
        self.parameters.set_simple_harmonic(enabled);
    }

    /// Switches fluid by selector (0 = air, 1 = water)
    ///
    /// # Errors
    ///
    /// [`PendulumError::InvalidFluid`] for any other selector; the pendulum
    /// is left unchanged.
    pub fn set_fluid(&mut self, selector: i32) -> Result<(), PendulumError> {
        let fluid = Fluid::try_from(selector)?;
        self.parameters.select_fluid(fluid);
        Ok(())
    }

    pub fn select_fluid(&mut self, fluid: Fluid) {
        self.parameters.select_fluid(fluid);
    }

    // ==================== Energy ====================

    /// Kinetic energy ½·m·(l·ω)² \[J\]
    pub fn kinetic_energy(&self) -> f64 {
        self.parameters.kinetic_energy(&self.state)
    }

    /// Potential energy \[J\]
    pub fn potential_energy(&self) -> f64 {
        self.parameters.potential_energy(&self.state)
    }

    /// Kinetic plus potential energy \[J\]
    pub fn total_energy(&self) -> f64 {
        self.parameters.total_energy(&self.state)
    }

    // ==================== Integration ====================

    /// Counters of the most recent advance call
    pub fn last_statistics(&self) -> IntegrationStats {
        self.integrator.last_statistics()
    }

    /// Advances the state by `duration` seconds, returns the new angle
    ///
    /// A zero duration leaves the state untouched.
    ///
    /// # Errors
    ///
    /// - [`PendulumError::InvalidDuration`] for a negative or non-finite span
    /// - [`PendulumError::Integration`] if the integrator fails to converge
    pub fn advance(&mut self, duration: f64) -> Result<f64, PendulumError> {
        validate_duration(duration)?;

        self.integrator
            .advance(&self.parameters, &mut self.state, duration)?;

        Ok(self.angle())
    }

    /// Integrates from 0 to `duration`, sending a record every `interval`
    ///
    /// Records are emitted at `i · interval` for every `i` with
    /// `i · interval ≤ duration`; the first is the current state before any
    /// integration. `sink.finish()` is called on every exit path once the
    /// arguments are validated. Returns the number of records.
    pub fn advance_with_sampling<S>(
        &mut self,
        interval: f64,
        sink: &mut S,
        duration: f64,
    ) -> Result<usize, PendulumError>
    where
        S: SampleSink + ?Sized,
    {
        validate_sampling(interval, duration)?;

        let parameters = &self.parameters;
        let result = self.integrator.advance_sampled(
            parameters,
            &mut self.state,
            interval,
            duration,
            |time, state| -> Result<(), PendulumError> {
                sink.record(TrajectoryRecord {
                    time,
                    angle: state[ANGLE],
                    energy: parameters.total_energy(state),
                })?;
                Ok(())
            },
        );
        let finished = sink.finish();

        let count = result?;
        finished?;
        Ok(count)
    }

    /// Samples the trajectory into the CSV file at `path`
    ///
    /// The file is created (or truncated) only after the arguments validate.
    pub fn save_trajectory(
        &mut self,
        interval: f64,
        path: impl AsRef<Path>,
        duration: f64,
    ) -> Result<usize, PendulumError> {
        self.save_trajectory_with(interval, path, duration, CsvConfig::default())
    }

    /// Same as [`save_trajectory`](Self::save_trajectory) with a custom layout
    pub fn save_trajectory_with(
        &mut self,
        interval: f64,
        path: impl AsRef<Path>,
        duration: f64,
        config: CsvConfig,
    ) -> Result<usize, PendulumError> {
        validate_sampling(interval, duration)?;

        let mut writer = CsvTrajectoryWriter::create(path, config)?;
        self.advance_with_sampling(interval, &mut writer, duration)
    }
}

fn validate_duration(duration: f64) -> Result<(), PendulumError> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(PendulumError::InvalidDuration(duration));
    }
    Ok(())
}

fn validate_sampling(interval: f64, duration: f64) -> Result<(), PendulumError> {
    if !interval.is_finite() || interval <= 0.0 {
        return Err(PendulumError::InvalidSamplingInterval(interval));
    }
    validate_duration(duration)
}

// =================================================================================================
// Tests
// =================================================================================================
