//! Fluid presets surrounding the pendulum
//!
//! The sphere swings either in air or in water. Switching fluid replaces the
//! dynamic viscosity μ and the density ρ together, so the kinematic viscosity
//! ν = μ/ρ derived from them is always consistent.
//!
//! | Fluid | μ \[kg/(m·s)\] | ρ \[kg/m³\] | selector |
//! |-------|----------------|-------------|----------|
//! | Air   | 1.822×10⁻⁵     | 1.205       | 0        |
//! | Water | 1.004×10⁻³     | 998.203     | 1        |

use std::fmt;

use crate::error::PendulumError;

// =================================================================================================
// Fluid Properties
// =================================================================================================

/// Dynamic viscosity and density of a fluid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProperties {
    /// Dynamic viscosity μ \[kg/(m·s)\]
    pub viscosity: f64,

    /// Density ρ \[kg/m³\]
    pub density: f64,
}

impl FluidProperties {
    /// Air at room temperature
    pub const AIR: Self = Self {
        viscosity: 1.822e-5,
        density: 1.205,
    };

    /// Water at room temperature
    pub const WATER: Self = Self {
        viscosity: 1.004e-3,
        density: 998.203,
    };

    /// Kinematic viscosity ν = μ/ρ \[m²/s\]
    pub fn kinematic_viscosity(&self) -> f64 {
        self.viscosity / self.density
    }
}

// =================================================================================================
// Fluid Selector
// =================================================================================================

/// Fluid the pendulum is immersed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fluid {
    /// Air (selector 0)
    #[default]
    Air,

    /// Water (selector 1)
    Water,
}

impl Fluid {
    /// Preset properties of this fluid
    pub fn properties(self) -> FluidProperties {
        match self {
            Fluid::Air => FluidProperties::AIR,
            Fluid::Water => FluidProperties::WATER,
        }
    }

    /// Integer selector used by the flat facade (0 = air, 1 = water)
    pub fn selector(self) -> i32 {
        match self {
            Fluid::Air => 0,
            Fluid::Water => 1,
        }
    }

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            Fluid::Air => "air",
            Fluid::Water => "water",
        }
    }
}

impl TryFrom<i32> for Fluid {
    type Error = PendulumError;

    fn try_from(selector: i32) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(Fluid::Air),
            1 => Ok(Fluid::Water),
            other => Err(PendulumError::InvalidFluid(other)),
        }
    }
}

impl fmt::Display for Fluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
