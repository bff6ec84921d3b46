//! CSV export of pendulum trajectories
//!
//! # Format
//!
//! One line per sample, no header row:
//!
//! ```csv
//! 0.000, 0.174532900000000, 0.211173374029476
//! 0.001, 0.174532813660413, 0.211173374029476
//! ```
//!
//! Time is written with 3 decimals, angle and total energy with 15.
//!
//! # With Metadata
//!
//! When `include_metadata` is set, comment lines precede the data:
//!
//! ```csv
//! # Pendulum Simulation Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Model: Pendulum
//! # Fluid: air
//! # Sampling Interval: 0.001 s
//! # Duration: 10 s
//! #
//! 0.000, 0.174532900000000, 0.211173374029476
//! ```
//!
//! [`load_trajectory_csv`] skips those comment lines, so files round-trip with
//! either layout.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::ExportError;
use crate::output::export::{SampleSink, TrajectoryRecord};

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use pendulum_rs::output::export::CsvConfig;
///
/// let config = CsvConfig::default().precision(10).delimiter(",");
/// assert_eq!(config.precision, 10);
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ", ")
    pub delimiter: String,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Decimal places of the time column (default: 3)
    pub time_precision: usize,

    /// Decimal places of angle and energy (default: 15)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ", ".to_string(),
            decimal_separator: '.',
            time_precision: 3,
            precision: 15,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European layout: semicolon delimiter, comma as decimal separator
    pub fn european() -> Self {
        Self {
            delimiter: "; ".to_string(),
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: &str) -> Self {
        self.delimiter = delimiter.to_string();
        self
    }

    /// Builder pattern: set precision of angle and energy
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: set precision of the time column
    pub fn time_precision(mut self, precision: usize) -> Self {
        self.time_precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set are written.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// Model name
    pub model_name: Option<String>,

    /// Fluid the pendulum swings in
    pub fluid: Option<String>,

    /// Sampling interval (seconds)
    pub sampling_interval: Option<f64>,

    /// Simulated duration (seconds)
    pub duration: Option<f64>,

    /// Additional parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata of a sampled run
    pub fn from_run(model: &str, sampling_interval: f64, duration: f64) -> Self {
        Self {
            model_name: Some(model.to_string()),
            sampling_interval: Some(sampling_interval),
            duration: Some(duration),
            ..Default::default()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl ToString) {
        self.custom.push((key.into(), value.to_string()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> std::io::Result<()> {
    writeln!(out, "# Pendulum Simulation Data")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(out, "# Model: {}", model)?;
    }
    if let Some(fluid) = &metadata.fluid {
        writeln!(out, "# Fluid: {}", fluid)?;
    }
    if let Some(interval) = metadata.sampling_interval {
        writeln!(out, "# Sampling Interval: {} s", interval)?;
    }
    if let Some(duration) = metadata.duration {
        writeln!(out, "# Duration: {} s", duration)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")
}

/// Format number with the given precision and decimal separator
fn format_number(value: f64, precision: usize, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn parse_number(field: &str, line: usize, config: &CsvConfig) -> Result<f64, ExportError> {
    let normalized = if config.decimal_separator != '.' {
        field.trim().replace(config.decimal_separator, ".")
    } else {
        field.trim().to_string()
    };

    normalized.parse::<f64>().map_err(|e| ExportError::Parse {
        line,
        reason: format!("'{}': {}", field.trim(), e),
    })
}

// =============================================================================
// Streaming writer
// =============================================================================

/// Sink writing each record as one CSV line
///
/// Output is buffered; [`SampleSink::finish`] flushes it. Dropping the writer
/// also flushes, but silently ignores errors.
pub struct CsvTrajectoryWriter<W: Write> {
    out: W,
    config: CsvConfig,
    header_pending: bool,
    records_written: usize,
}

impl CsvTrajectoryWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path`
    pub fn create(path: impl AsRef<Path>, config: CsvConfig) -> Result<Self, ExportError> {
        let file = File::create(path.as_ref())?;
        Ok(Self::new(BufWriter::new(file), config))
    }
}

impl<W: Write> CsvTrajectoryWriter<W> {
    /// Wrap any writer
    pub fn new(out: W, config: CsvConfig) -> Self {
        let header_pending = config.include_metadata && config.metadata.is_some();
        Self {
            out,
            config,
            header_pending,
            records_written: 0,
        }
    }

    /// Number of data lines written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> Result<W, ExportError> {
        self.finish()?;
        Ok(self.out)
    }

    fn write_header_once(&mut self) -> Result<(), ExportError> {
        if self.header_pending {
            self.header_pending = false;
            if let Some(metadata) = &self.config.metadata {
                write_metadata_header(&mut self.out, metadata)?;
            }
        }
        Ok(())
    }
}

impl<W: Write> SampleSink for CsvTrajectoryWriter<W> {
    fn record(&mut self, record: TrajectoryRecord) -> Result<(), ExportError> {
        if !(record.time.is_finite() && record.angle.is_finite() && record.energy.is_finite()) {
            return Err(ExportError::NonFinite(format!("record at t = {}", record.time)));
        }

        self.write_header_once()?;

        let config = &self.config;
        writeln!(
            self.out,
            "{}{}{}{}{}",
            format_number(record.time, config.time_precision, config),
            config.delimiter,
            format_number(record.angle, config.precision, config),
            config.delimiter,
            format_number(record.energy, config.precision, config),
        )?;

        self.records_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        self.write_header_once()?;
        self.out.flush()?;
        Ok(())
    }
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export an in-memory trajectory to CSV
///
/// # Errors
///
/// - Empty data
/// - NaN or Inf values
/// - File creation errors
///
/// # Example
///
/// ```rust,no_run
/// use pendulum_rs::output::export::export_trajectory_csv;
/// use pendulum_rs::output::export::TrajectoryRecord;
///
/// let records = vec![TrajectoryRecord { time: 0.0, angle: 0.1, energy: 0.07 }];
/// export_trajectory_csv(&records, "swing.csv", None)?;
/// # Ok::<(), pendulum_rs::error::ExportError>(())
/// ```
pub fn export_trajectory_csv(
    records: &[TrajectoryRecord],
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), ExportError> {
    // ============================= Validation =============================

    if records.is_empty() {
        return Err(ExportError::EmptyData);
    }

    if let Some(bad) = records
        .iter()
        .find(|r| !(r.time.is_finite() && r.angle.is_finite() && r.energy.is_finite()))
    {
        return Err(ExportError::NonFinite(format!("record at t = {}", bad.time)));
    }

    // ============================= Write ==================================

    let configuration = configuration.cloned().unwrap_or_default();
    let mut writer = CsvTrajectoryWriter::create(output_path, configuration)?;

    for record in records {
        writer.record(*record)?;
    }

    writer.finish()
}

/// Load a trajectory written by [`CsvTrajectoryWriter`]
///
/// Comment lines (`#`) and blank lines are skipped.
pub fn load_trajectory_csv(
    input_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<Vec<TrajectoryRecord>, ExportError> {
    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    let separator = configuration.delimiter.trim();

    let reader = BufReader::new(File::open(input_path.as_ref())?);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = content.split(separator).collect();
        if fields.len() != 3 {
            return Err(ExportError::Parse {
                line: index + 1,
                reason: format!("expected 3 fields, found {}", fields.len()),
            });
        }

        records.push(TrajectoryRecord {
            time: parse_number(fields[0], index + 1, configuration)?,
            angle: parse_number(fields[1], index + 1, configuration)?,
            energy: parse_number(fields[2], index + 1, configuration)?,
        });
    }

    Ok(records)
}

// =================================================================================================
// Tests
// =================================================================================================
