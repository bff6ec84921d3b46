//! Export of sampled trajectories
//!
//! # Architecture
//!
//! The integrator hands every sample to a [`SampleSink`]. A sink decides what
//! to do with it: keep it in memory (`Vec<TrajectoryRecord>`) or stream it to
//! a file ([`CsvTrajectoryWriter`]). Adding a format means adding a sink,
//! the integration loop never changes.
//!
//! # Usage example
//!
//! ```rust,no_run
//! use pendulum_rs::models::Pendulum;
//! use pendulum_rs::output::export::{CsvConfig, CsvTrajectoryWriter, TrajectoryRecord};
//!
//! let mut pendulum = Pendulum::new(1.0, 0.05, false, true, 0.1745329);
//!
//! // In memory
//! let mut records: Vec<TrajectoryRecord> = Vec::new();
//! pendulum.advance_with_sampling(0.01, &mut records, 1.0)?;
//!
//! // Streamed to disk
//! let mut writer = CsvTrajectoryWriter::create("swing.csv", CsvConfig::default())?;
//! pendulum.advance_with_sampling(0.001, &mut writer, 10.0)?;
//! # Ok::<(), pendulum_rs::PendulumError>(())
//! ```

pub mod csv;

// Re-export the most commonly used types at the module level
pub use csv::{
    export_trajectory_csv, load_trajectory_csv, CsvConfig, CsvMetadata, CsvTrajectoryWriter,
};

use crate::error::ExportError;

/// One sample of a trajectory
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectoryRecord {
    /// Simulation time \[s\]
    pub time: f64,

    /// Pendulum angle \[rad\]
    pub angle: f64,

    /// Total mechanical energy \[J\]
    pub energy: f64,
}

/// Destination of sampled records
///
/// `finish` is called once after the last record, on success and on failure
/// of the integration alike.
pub trait SampleSink {
    /// Consume one record
    fn record(&mut self, record: TrajectoryRecord) -> Result<(), ExportError>;

    /// Flush whatever is buffered
    fn finish(&mut self) -> Result<(), ExportError> {
        Ok(())
    }
}

impl SampleSink for Vec<TrajectoryRecord> {
    fn record(&mut self, record: TrajectoryRecord) -> Result<(), ExportError> {
        self.push(record);
        Ok(())
    }
}

impl<S: SampleSink + ?Sized> SampleSink for &mut S {
    fn record(&mut self, record: TrajectoryRecord) -> Result<(), ExportError> {
        (**self).record(record)
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        (**self).finish()
    }
}
