//! `pendulum`: run the reference pendulum batch from the command line
//!
//! ```bash
//! # All eight reference runs into ./results
//! pendulum
//!
//! # Only the exact runs, with plots, into /tmp/out
//! pendulum --output-dir /tmp/out --scenario exact_10 --scenario exact_89 --plot
//!
//! # Show available scenarios
//! pendulum --list
//! ```
//!
//! Logging goes through `tracing`; set `RUST_LOG=debug` for integrator
//! statistics.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pendulum_rs::output::{
    load_trajectory_csv, plot_trajectories_comparison, plot_trajectory, PlotConfig,
};
use pendulum_rs::scenario::{default_scenarios, run_scenarios, PendulumScenario, ScenarioReport};

/// Damped pendulum simulation
#[derive(Parser, Debug)]
#[command(name = "pendulum", version, about)]
struct Cli {
    /// Directory the CSV trajectories (and plots) are written to
    #[arg(long, short = 'o', default_value = "results")]
    output_dir: PathBuf,

    /// Run only the named scenario (repeatable)
    #[arg(long = "scenario", short = 's')]
    scenarios: Vec<String>,

    /// Render a PNG plot next to each CSV file
    #[arg(long)]
    plot: bool,

    /// List the available scenarios and exit
    #[arg(long)]
    list: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let available = default_scenarios();

    if cli.list {
        for scenario in &available {
            println!(
                "{:<24} l = {} m, r = {} m, θ₀ = {} rad, {} s{}{}",
                scenario.name,
                scenario.length,
                scenario.radius,
                scenario.initial_angle,
                scenario.duration,
                if scenario.simple_harmonic { ", simple harmonic" } else { "" },
                if scenario.resistance { ", drag" } else { "" },
            );
        }
        return Ok(());
    }

    let selected = select(available, &cli.scenarios)?;
    let reports = run_scenarios(&selected, &cli.output_dir)?;

    for report in &reports {
        println!(
            "{:<24} {:>6} records  E0 = {:.9} J  E = {:.9} J  -> {}",
            report.name,
            report.records,
            report.initial_energy,
            report.final_energy,
            report.path.display()
        );
    }

    if cli.plot {
        plot_reports(&reports)?;
    }

    Ok(())
}

/// Keeps the scenarios named on the command line, all of them if none
fn select(
    available: Vec<PendulumScenario>,
    names: &[String],
) -> Result<Vec<PendulumScenario>, Box<dyn Error>> {
    if names.is_empty() {
        return Ok(available);
    }

    if let Some(unknown) = names.iter().find(|n| !available.iter().any(|s| &s.name == *n)) {
        return Err(format!("unknown scenario '{unknown}' (see --list)").into());
    }

    Ok(available
        .into_iter()
        .filter(|s| names.contains(&s.name))
        .collect())
}

fn plot_reports(reports: &[ScenarioReport]) -> Result<(), Box<dyn Error>> {
    let mut loaded = Vec::with_capacity(reports.len());

    for report in reports {
        let records = load_trajectory_csv(&report.path, None)?;
        let image = report.path.with_extension("png");

        plot_trajectory(&records, &image, Some(&PlotConfig::trajectory(report.name.as_str())))?;
        info!(plot = %image.display(), "plot written");

        loaded.push((report, records));
    }

    let drag_runs: Vec<(&str, &[_])> = loaded
        .iter()
        .filter(|(report, _)| report.name.starts_with("air_resistance"))
        .map(|(report, records)| (report.name.as_str(), records.as_slice()))
        .collect();

    if drag_runs.len() > 1 {
        if let Some((report, _)) = loaded.first() {
            let image = report.path.with_file_name("air_resistance_comparison.png");
            plot_trajectories_comparison(
                &drag_runs,
                &image,
                Some(&PlotConfig::comparison("Air resistance, 89°")),
            )?;
            info!(plot = %image.display(), "comparison plot written");
        }
    }

    Ok(())
}
