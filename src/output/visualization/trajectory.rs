//! Trajectory plotting
//!
//! # Available functions
//!
//! - [`plot_trajectory`]: angle (top) and total energy (bottom) vs time
//! - [`plot_trajectories_comparison`]: angle of several runs on the same axes
//!
//! The backend is picked from the file extension: `.svg` renders SVG,
//! anything else a bitmap (PNG by default).
//!
//! # Usage
//!
//! ```rust,ignore
//! use pendulum_rs::output::visualization::{plot_trajectory, plot_trajectories_comparison};
//!
//! plot_trajectory(&records, "exact_89.png", None)?;
//!
//! plot_trajectories_comparison(
//!     &[("no drag", &free), ("air drag", &damped)],
//!     "air_resistance.svg",
//!     None,
//! )?;
//! ```

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::config::{PlotConfig, SeriesStyle};
use crate::error::ExportError;
use crate::output::export::TrajectoryRecord;

// =================================================================================================
// Helper Functions
// =================================================================================================

fn validate(records: &[TrajectoryRecord]) -> Result<(), ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptyData);
    }
    if let Some(bad) = records
        .iter()
        .find(|r| !(r.time.is_finite() && r.angle.is_finite() && r.energy.is_finite()))
    {
        return Err(ExportError::NonFinite(format!("record at t = {}", bad.time)));
    }
    Ok(())
}

/// Value range padded by 5%, widened when the data is flat
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    let span = max - min;
    let pad = if span > 1e-12 {
        0.05 * span
    } else {
        1e-3 * max.abs().max(1.0)
    };

    (min - pad)..(max + pad)
}

fn time_range(records: &[TrajectoryRecord]) -> Range<f64> {
    let start = records.first().map_or(0.0, |r| r.time);
    let end = records.last().map_or(1.0, |r| r.time);

    if end > start { start..end } else { start..(start + 1.0) }
}

fn is_svg(output_path: &Path) -> bool {
    output_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

// =================================================================================================
// Public Functions
// =================================================================================================

/// Plot angle and total energy of one trajectory against time
///
/// # Errors
///
/// - Empty data or NaN/Inf values
/// - Rendering or file errors
pub fn plot_trajectory(
    records: &[TrajectoryRecord],
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), ExportError> {
    validate(records)?;

    let fallback = PlotConfig::default();
    let config = config.unwrap_or(&fallback);
    let output_path = output_path.as_ref();

    let result = if is_svg(output_path) {
        let backend = SVGBackend::new(output_path, config.size);
        plot_trajectory_impl(backend, records, config)
    } else {
        let backend = BitMapBackend::new(output_path, config.size);
        plot_trajectory_impl(backend, records, config)
    };

    result.map_err(|e| ExportError::Plot(e.to_string()))
}

/// Overlay the angle of several labelled trajectories
pub fn plot_trajectories_comparison(
    runs: &[(&str, &[TrajectoryRecord])],
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), ExportError> {
    if runs.is_empty() {
        return Err(ExportError::EmptyData);
    }
    for (_, records) in runs {
        validate(records)?;
    }

    let fallback = PlotConfig::comparison("Trajectory Comparison");
    let config = config.unwrap_or(&fallback);
    let output_path = output_path.as_ref();

    let result = if is_svg(output_path) {
        let backend = SVGBackend::new(output_path, config.size);
        plot_comparison_impl(backend, runs, config)
    } else {
        let backend = BitMapBackend::new(output_path, config.size);
        plot_comparison_impl(backend, runs, config)
    };

    result.map_err(|e| ExportError::Plot(e.to_string()))
}

// =================================================================================================
// Rendering
// =================================================================================================

fn plot_trajectory_impl<DB: DrawingBackend>(
    backend: DB,
    records: &[TrajectoryRecord],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;
    let root = root.titled(&config.title, ("sans-serif", 32))?;

    let panels = root.split_evenly((2, 1));
    let x_range = time_range(records);

    let angles: Vec<(f64, f64)> = records.iter().map(|r| (r.time, r.angle)).collect();
    let energies: Vec<(f64, f64)> = records.iter().map(|r| (r.time, r.energy)).collect();

    draw_panel(&panels[0], &angles, x_range.clone(), &config.angle, config)?;
    draw_panel(&panels[1], &energies, x_range, &config.energy, config)?;

    root.present()?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    points: &[(f64, f64)],
    x_range: Range<f64>,
    style: &SeriesStyle,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let y_range = padded_range(points.iter().map(|(_, y)| *y));

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)?;

    let mut mesh = chart.configure_mesh();
    if !config.grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&config.time_label).y_desc(&style.label).draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        ShapeStyle::from(&style.color).stroke_width(config.stroke),
    ))?;

    Ok(())
}

fn plot_comparison_impl<DB: DrawingBackend>(
    backend: DB,
    runs: &[(&str, &[TrajectoryRecord])],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let start = runs
        .iter()
        .filter_map(|(_, r)| r.first())
        .map(|r| r.time)
        .fold(f64::INFINITY, f64::min);
    let end = runs
        .iter()
        .filter_map(|(_, r)| r.last())
        .map(|r| r.time)
        .fold(f64::NEG_INFINITY, f64::max);
    let x_range = if end > start { start..end } else { start..(start + 1.0) };
    let y_range = padded_range(runs.iter().flat_map(|(_, r)| r.iter().map(|p| p.angle)));

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)?;

    let mut mesh = chart.configure_mesh();
    if !config.grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&config.time_label)
        .y_desc(&config.angle.label)
        .draw()?;

    for (index, (label, records)) in runs.iter().enumerate() {
        let color = config.run_color(index);
        chart
            .draw_series(LineSeries::new(
                records.iter().map(|r| (r.time, r.angle)),
                ShapeStyle::from(&color).stroke_width(config.stroke),
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
