//! Look of the trajectory plots
//!
//! A plot has a title, a shared time axis and one or two panels. Each panel
//! is drawn with a [`SeriesStyle`]: axis label plus line color.

use plotters::prelude::*;

/// Axis label and line color of one plotted quantity
#[derive(Clone)]
pub struct SeriesStyle {
    pub label: String,
    pub color: RGBColor,
}

impl SeriesStyle {
    pub fn new(label: impl Into<String>, color: RGBColor) -> Self {
        Self { label: label.into(), color }
    }
}

/// Image and styling options for the plotting functions
///
/// ```rust
/// use pendulum_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let config = PlotConfig::trajectory("Exact, 89°")
///     .with_size(1920, 1080)
///     .with_stroke(3);
///
/// assert_eq!(config.size, (1920, 1080));
/// assert_eq!(config.energy.color, BLUE);
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image size in pixels, `(width, height)`
    pub size: (u32, u32),

    pub title: String,

    /// Label of the shared time axis
    pub time_label: String,

    /// Angle panel (and every curve of a comparison plot)
    pub angle: SeriesStyle,

    /// Total energy panel
    pub energy: SeriesStyle,

    pub background: RGBColor,

    /// Stroke width of the curves in pixels
    pub stroke: u32,

    /// Draw the mesh behind the curves
    pub grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            size: (1200, 800),
            title: "Pendulum Trajectory".to_string(),
            time_label: "t (s)".to_string(),
            angle: SeriesStyle::new("θ (rad)", RED),
            energy: SeriesStyle::new("E (J)", BLUE),
            background: WHITE,
            stroke: 2,
            grid: true,
        }
    }
}

impl PlotConfig {
    /// Angle and energy panels under `title`
    pub fn trajectory(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Overlaid angle curves of several runs under `title`
    pub fn comparison(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn with_stroke(mut self, stroke: u32) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn without_grid(mut self) -> Self {
        self.grid = false;
        self
    }

    /// Curve color of run `index` in a comparison plot
    ///
    /// The first run uses the angle color, the rest cycle through a fixed palette.
    pub(crate) fn run_color(&self, index: usize) -> RGBColor {
        const CYCLE: [RGBColor; 6] = [
            BLUE,
            RGBColor(0, 128, 0),
            RGBColor(255, 140, 0),
            MAGENTA,
            RGBColor(0, 139, 139),
            RGBColor(75, 0, 130),
        ];

        match index {
            0 => self.angle.color,
            n => CYCLE[(n - 1) % CYCLE.len()],
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
