//! Visualization of sampled trajectories
//!
//! Static post-processing plots rendered with `plotters`.
//!
//! # Organization
//!
//! - **config**: Plot configuration (`PlotConfig`, `SeriesStyle`)
//! - **trajectory**: Angle/energy plots and run comparisons
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pendulum_rs::output::visualization::{plot_trajectory, PlotConfig};
//!
//! let mut records = Vec::new();
//! pendulum.advance_with_sampling(0.001, &mut records, 10.0)?;
//!
//! plot_trajectory(&records, "swing.png", Some(&PlotConfig::trajectory("Exact, 30°")))?;
//! ```

pub mod config;
pub mod trajectory;

pub use config::{PlotConfig, SeriesStyle};
pub use trajectory::{plot_trajectories_comparison, plot_trajectory};
