//! Physical constants shared by the pendulum model

/// Standard gravitational acceleration g \[m/s²\]
pub const GRAVITY: f64 = 9.80665;

/// Density of aluminium, the sphere material \[kg/m³\]
pub const ALUMINIUM_DENSITY: f64 = 2698.9;

/// Reynolds number below which only Stokes (linear viscous) drag is applied
///
/// The drag coefficient correlations are not evaluated below this value.
pub const REYNOLDS_THRESHOLD: f64 = 0.1;

/// Reynolds number separating the Cheng and Almedeij drag correlations
pub const CORRELATION_BOUNDARY: f64 = 3000.0;
