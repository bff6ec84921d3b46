//! Physical parameters of the pendulum and its equation of motion
//!
//! # Mathematical Background
//!
//! A sphere of radius `r` and mass `m` hangs from a massless rod of length
//! `l`. With `θ` the angle from the vertical and `ω = dθ/dt`:
//!
//! ```text
//! dθ/dt = ω
//! dω/dt = f₁(θ) + a_inertial(ω) − F/(m·l)
//! ```
//!
//! Where:
//! - **f₁** = −g·sin θ / l, or −g·θ / l with the simple-harmonic approximation
//! - **F** = 6π·μ·r·l·ω : Stokes (viscous) drag
//! - **a_inertial** = ∓ ½·ρ·π·(r·l·ω)²·C_D(Re) / (m·l), always opposing motion
//! - **Re** = 2r·|l·ω| / ν
//!
//! Below Re = 0.1 the inertial term is dropped and only Stokes drag remains.
//! With resistance disabled both drag terms vanish.
//!
//! # Energy
//!
//! ```text
//! E_k = ½·m·(l·ω)²
//! E_p = m·g·l·(1 − cos θ)      (exact restoring force)
//! E_p = ½·m·g·l·θ²             (simple-harmonic approximation)
//! ```
//!
//! The potential always matches the restoring force in use, so the total is
//! a constant of motion whenever resistance is disabled.

use std::f64::consts::PI;

use nalgebra::Vector2;

use crate::physics::constants::{ALUMINIUM_DENSITY, GRAVITY, REYNOLDS_THRESHOLD};
use crate::physics::{
    drag_coefficient, reynolds_number, EquationOfMotion, Fluid, PendulumState, ANGLE,
    ANGULAR_VELOCITY,
};

/// Physical parameters of a sphere pendulum immersed in a fluid
///
/// Length, radius and mass are fixed at construction. The fluid properties
/// and the two behaviour flags can change between integration calls.
#[derive(Clone, Debug, PartialEq)]
pub struct PendulumParameters {
    length: f64,
    radius: f64,
    mass: f64,
    fluid: Fluid,
    viscosity: f64,
    density: f64,
    kinematic_viscosity: f64,
    resistance: bool,
    simple_harmonic: bool,
}

impl PendulumParameters {
    /// Creates the parameter set, immersed in air
    ///
    /// # Arguments
    ///
    /// * `length` - Rod length l \[m\], must be positive
    /// * `radius` - Sphere radius r \[m\], must be positive
    /// * `resistance` - Include fluid drag
    /// * `simple_harmonic` - Linearize the restoring force (sin θ ≈ θ)
    ///
    /// The sphere mass is derived from the radius and the density of
    /// aluminium: m = 4/3·π·r³·ρ_Al.
    pub fn new(length: f64, radius: f64, resistance: bool, simple_harmonic: bool) -> Self {
        debug_assert!(length > 0.0, "Rod length must be positive, got {}", length);
        debug_assert!(radius > 0.0, "Sphere radius must be positive, got {}", radius);

        let fluid = Fluid::default();
        let properties = fluid.properties();

        Self {
            length,
            radius,
            mass: 4.0 / 3.0 * PI * radius.powi(3) * ALUMINIUM_DENSITY,
            fluid,
            viscosity: properties.viscosity,
            density: properties.density,
            kinematic_viscosity: properties.kinematic_viscosity(),
            resistance,
            simple_harmonic,
        }
    }

    // ==================== Accessors ====================

    /// Rod length \[m\]
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Sphere radius \[m\]
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Sphere mass \[kg\]
    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Surrounding fluid
    #[inline]
    pub fn fluid(&self) -> Fluid {
        self.fluid
    }

    /// Dynamic viscosity μ \[kg/(m·s)\]
    #[inline]
    pub fn viscosity(&self) -> f64 {
        self.viscosity
    }

    /// Fluid density ρ \[kg/m³\]
    #[inline]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Kinematic viscosity ν = μ/ρ \[m²/s\]
    #[inline]
    pub fn kinematic_viscosity(&self) -> f64 {
        self.kinematic_viscosity
    }

    #[inline]
    pub fn resistance(&self) -> bool {
        self.resistance
    }

    #[inline]
    pub fn simple_harmonic(&self) -> bool {
        self.simple_harmonic
    }

    pub fn set_resistance(&mut self, enabled: bool) {
        self.resistance = enabled;
    }

    pub fn set_simple_harmonic(&mut self, enabled: bool) {
        self.simple_harmonic = enabled;
    }

    /// Replace viscosity and density with the preset of `fluid`
    pub fn select_fluid(&mut self, fluid: Fluid) {
        let properties = fluid.properties();
        self.fluid = fluid;
        self.viscosity = properties.viscosity;
        self.density = properties.density;
        self.kinematic_viscosity = properties.kinematic_viscosity();
    }

    // ==================== Forces ====================

    /// Restoring angular acceleration f₁(θ) \[rad/s²\]
    pub fn restoring_acceleration(&self, angle: f64) -> f64 {
        if self.simple_harmonic {
            -GRAVITY * angle / self.length
        } else {
            -GRAVITY * angle.sin() / self.length
        }
    }

    /// Reynolds number of the sphere at angular velocity `omega`
    pub fn reynolds_number(&self, omega: f64) -> f64 {
        reynolds_number(2.0 * self.radius, self.length * omega, self.kinematic_viscosity)
    }

    /// Angular acceleration due to fluid drag \[rad/s²\]
    ///
    /// Zero when resistance is disabled.
    pub fn drag_acceleration(&self, omega: f64) -> f64 {
        if !self.resistance {
            return 0.0;
        }

        let moment_arm = self.mass * self.length;
        let stokes = 6.0 * PI * self.viscosity * self.radius * self.length * omega;

        let reynolds = self.reynolds_number(omega);
        if reynolds < REYNOLDS_THRESHOLD {
            return -stokes / moment_arm;
        }

        let sweep = self.radius * self.length * omega;
        let inertial = 0.5 * self.density * PI * sweep * sweep * drag_coefficient(reynolds);
        let inertial = if omega >= 0.0 { -inertial } else { inertial };

        inertial / moment_arm - stokes / moment_arm
    }

    // ==================== Energy ====================

    /// Kinetic energy ½·m·(l·ω)² \[J\]
    pub fn kinetic_energy(&self, state: &PendulumState) -> f64 {
        let speed = self.length * state[ANGULAR_VELOCITY];
        0.5 * self.mass * speed * speed
    }

    /// Potential energy relative to the rest position \[J\]
    ///
    /// The exact pendulum uses m·g·l·(1 − cos θ). The simple harmonic model
    /// uses ½·m·g·l·θ² instead, the potential of its linear restoring force
    /// −(g/l)·θ, so its total energy is conserved without drag.
    pub fn potential_energy(&self, state: &PendulumState) -> f64 {
        let angle = state[ANGLE];
        let weight = self.mass * GRAVITY * self.length;

        if self.simple_harmonic {
            0.5 * weight * angle * angle
        } else {
            weight * (1.0 - angle.cos())
        }
    }

    /// Kinetic plus potential energy \[J\]
    pub fn total_energy(&self, state: &PendulumState) -> f64 {
        self.kinetic_energy(state) + self.potential_energy(state)
    }
}

impl EquationOfMotion<2> for PendulumParameters {
    fn evaluate(&self, state: &PendulumState) -> PendulumState {
        let omega = state[ANGULAR_VELOCITY];
        let acceleration = self.restoring_acceleration(state[ANGLE]) + self.drag_acceleration(omega);

        Vector2::new(omega, acceleration)
    }

    fn name(&self) -> &str {
        "Pendulum"
    }

    fn description(&self) -> Option<&str> {
        Some("Sphere pendulum with Stokes and Reynolds-dependent inertial drag")
    }
}

// =================================================================================================
// Tests
// =================================================================================================
