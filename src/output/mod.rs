//! Output of simulation results
//!
//! - **Export**: sample sinks and CSV trajectory files
//! - **Visualization**: PNG/SVG plots using plotters
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── export/             ← Data export
//! │   ├── mod.rs          ← TrajectoryRecord, SampleSink
//! │   └── csv.rs
//! └── visualization/      ← Plots
//!     ├── mod.rs
//!     ├── config.rs
//!     └── trajectory.rs
//! ```
//!
//! Export is streamed: the integrator pushes each sample into a sink as soon
//! as it is computed. Visualization works on a finished `&[TrajectoryRecord]`.

pub mod export;
pub mod visualization;

// Re-export commonly used items for convenience
pub use export::{
    export_trajectory_csv, load_trajectory_csv, CsvConfig, CsvTrajectoryWriter, SampleSink,
    TrajectoryRecord,
};

pub use visualization::{plot_trajectories_comparison, plot_trajectory, PlotConfig};
