//! Batch runs of named pendulum configurations
//!
//! A [`PendulumScenario`] is a complete description of one run: geometry,
//! behaviour flags, starting angle, fluid and sampling. [`run_scenarios`]
//! writes one CSV trajectory per scenario into an output directory and
//! returns a [`ScenarioReport`] for each.
//!
//! Every run owns its own [`Pendulum`], so with the `parallel` feature the
//! batch is spread over the rayon thread pool.
//!
//! # Example
//!
//! ```rust,no_run
//! use pendulum_rs::scenario::{default_scenarios, run_scenarios};
//!
//! let reports = run_scenarios(&default_scenarios(), "results")?;
//! for report in &reports {
//!     println!("{}: {} records", report.name, report.records);
//! }
//! # Ok::<(), pendulum_rs::PendulumError>(())
//! ```

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{ExportError, PendulumError};
use crate::models::Pendulum;
use crate::physics::Fluid;

/// Sampling interval of the default batch (seconds)
pub const DEFAULT_SAMPLING_INTERVAL: f64 = 0.001;

/// Duration of the default batch (seconds)
pub const DEFAULT_DURATION: f64 = 10.0;

// =================================================================================================
// Scenario
// =================================================================================================

/// One named pendulum run
#[derive(Clone, Debug, PartialEq)]
pub struct PendulumScenario {
    /// Identifier, also the CSV file stem
    pub name: String,

    /// Rod length l \[m\]
    pub length: f64,

    /// Sphere radius r \[m\]
    pub radius: f64,

    /// Include fluid drag
    pub resistance: bool,

    /// Linearize the restoring force
    pub simple_harmonic: bool,

    /// Starting angle θ₀ \[rad\], released at rest
    pub initial_angle: f64,

    pub fluid: Fluid,

    /// Time between two records \[s\]
    pub sampling_interval: f64,

    /// Simulated time span \[s\]
    pub duration: f64,
}

impl PendulumScenario {
    /// Frictionless exact pendulum in air, sampled every millisecond for 10 s
    pub fn new(name: impl Into<String>, length: f64, radius: f64, initial_angle: f64) -> Self {
        Self {
            name: name.into(),
            length,
            radius,
            resistance: false,
            simple_harmonic: false,
            initial_angle,
            fluid: Fluid::Air,
            sampling_interval: DEFAULT_SAMPLING_INTERVAL,
            duration: DEFAULT_DURATION,
        }
    }

    pub fn with_resistance(mut self, enabled: bool) -> Self {
        self.resistance = enabled;
        self
    }

    pub fn with_simple_harmonic(mut self, enabled: bool) -> Self {
        self.simple_harmonic = enabled;
        self
    }

    pub fn in_fluid(mut self, fluid: Fluid) -> Self {
        self.fluid = fluid;
        self
    }

    /// Sets the sampling interval and the simulated duration
    pub fn sampled(mut self, interval: f64, duration: f64) -> Self {
        self.sampling_interval = interval;
        self.duration = duration;
        self
    }

    /// Name of the CSV file this scenario writes
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }

    /// Checks every parameter before anything is created on disk
    ///
    /// # Errors
    ///
    /// [`PendulumError::InvalidScenario`] naming the first offending field.
    pub fn validate(&self) -> Result<(), PendulumError> {
        let reason = if self.name.trim().is_empty() {
            Some("name must not be empty".to_string())
        } else if self.name.contains(['/', '\\']) {
            Some("name must not contain path separators".to_string())
        } else if !(self.length.is_finite() && self.length > 0.0) {
            Some(format!("length must be positive, got {}", self.length))
        } else if !(self.radius.is_finite() && self.radius > 0.0) {
            Some(format!("radius must be positive, got {}", self.radius))
        } else if !self.initial_angle.is_finite() {
            Some(format!("initial angle must be finite, got {}", self.initial_angle))
        } else if !(self.sampling_interval.is_finite() && self.sampling_interval > 0.0) {
            Some(format!(
                "sampling interval must be positive, got {}",
                self.sampling_interval
            ))
        } else if !(self.duration.is_finite() && self.duration >= 0.0) {
            Some(format!("duration must be non-negative, got {}", self.duration))
        } else {
            None
        };

        match reason {
            Some(reason) => Err(PendulumError::InvalidScenario {
                name: self.name.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    fn build(&self) -> Pendulum {
        let mut pendulum = Pendulum::new(
            self.length,
            self.radius,
            self.resistance,
            self.simple_harmonic,
            self.initial_angle,
        );
        pendulum.select_fluid(self.fluid);
        pendulum
    }
}

/// Summary of one finished run
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioReport {
    pub name: String,

    /// CSV file written
    pub path: PathBuf,

    /// Number of records in the file
    pub records: usize,

    /// Total energy at release \[J\]
    pub initial_energy: f64,

    /// Total energy at the end of the run \[J\]
    pub final_energy: f64,
}

impl ScenarioReport {
    /// Energy lost over the run, relative to the initial energy
    ///
    /// Zero when the pendulum starts with no energy.
    pub fn relative_energy_loss(&self) -> f64 {
        if self.initial_energy.abs() < f64::MIN_POSITIVE {
            0.0
        } else {
            (self.initial_energy - self.final_energy) / self.initial_energy
        }
    }
}

// =================================================================================================
// Default batch
// =================================================================================================

/// The reference batch: small, medium and near-horizontal release angles for
/// both restoring-force models, plus an 89° swing in air with and without drag
pub fn default_scenarios() -> Vec<PendulumScenario> {
    const TEN_DEGREES: f64 = 0.1745329;
    const THIRTY_DEGREES: f64 = 0.5235988;
    const EIGHTY_NINE_DEGREES: f64 = 1.5533430;

    let mut scenarios = Vec::with_capacity(8);

    for (label, simple_harmonic) in [("simple_harmonic", true), ("exact", false)] {
        for (degrees, angle) in [(10, TEN_DEGREES), (30, THIRTY_DEGREES), (89, EIGHTY_NINE_DEGREES)] {
            scenarios.push(
                PendulumScenario::new(format!("{label}_{degrees}"), 1.0, 0.001, angle)
                    .with_simple_harmonic(simple_harmonic)
                    .sampled(DEFAULT_SAMPLING_INTERVAL, 4.0),
            );
        }
    }

    for (name, resistance) in [("air_resistance_no_89", false), ("air_resistance_yes_89", true)] {
        scenarios.push(
            PendulumScenario::new(name, 1.0, 0.0025, EIGHTY_NINE_DEGREES)
                .with_resistance(resistance)
                .in_fluid(Fluid::Air)
                .sampled(DEFAULT_SAMPLING_INTERVAL, DEFAULT_DURATION),
        );
    }

    scenarios
}

// =================================================================================================
// Runner
// =================================================================================================

/// Runs one scenario, writing `<output_dir>/<name>.csv`
///
/// # Errors
///
/// - [`PendulumError::InvalidScenario`] if the scenario does not validate
/// - [`PendulumError::Integration`] or [`PendulumError::Export`] from the run
pub fn run_scenario(
    scenario: &PendulumScenario,
    output_dir: impl AsRef<Path>,
) -> Result<ScenarioReport, PendulumError> {
    scenario.validate()?;

    let path = output_dir.as_ref().join(scenario.file_name());
    let mut pendulum = scenario.build();
    let initial_energy = pendulum.total_energy();

    let records =
        pendulum.save_trajectory(scenario.sampling_interval, &path, scenario.duration)?;

    let report = ScenarioReport {
        name: scenario.name.clone(),
        path,
        records,
        initial_energy,
        final_energy: pendulum.total_energy(),
    };

    info!(
        scenario = %report.name,
        records = report.records,
        initial_energy = report.initial_energy,
        final_energy = report.final_energy,
        "scenario finished"
    );

    Ok(report)
}

/// Runs every scenario, creating `output_dir` if needed
///
/// All scenarios are validated before the first file is written. Reports are
/// returned in input order. The first failing run aborts the batch.
pub fn run_scenarios(
    scenarios: &[PendulumScenario],
    output_dir: impl AsRef<Path>,
) -> Result<Vec<ScenarioReport>, PendulumError> {
    let output_dir = output_dir.as_ref();

    for scenario in scenarios {
        if let Err(e) = scenario.validate() {
            warn!(scenario = %scenario.name, error = %e, "scenario rejected");
            return Err(e);
        }
    }

    std::fs::create_dir_all(output_dir).map_err(ExportError::from)?;

    info!(
        count = scenarios.len(),
        output_dir = %output_dir.display(),
        "running scenarios"
    );

    #[cfg(feature = "parallel")]
    let reports: Result<Vec<ScenarioReport>, PendulumError> = {
        use rayon::prelude::*;

        scenarios
            .par_iter()
            .map(|scenario| run_scenario(scenario, output_dir))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let reports: Result<Vec<ScenarioReport>, PendulumError> = scenarios
        .iter()
        .map(|scenario| run_scenario(scenario, output_dir))
        .collect();

    reports
}

// =================================================================================================
// Tests
// =================================================================================================
