//! Drag coefficient of a sphere as a function of the Reynolds number
//!
//! # Correlations
//!
//! Two empirical fits cover the whole range, joined at Re = 3000:
//!
//! - **Re ≤ 3000**: N.-S. Cheng, *Comparison of formulas for drag coefficient
//!   and settling velocity of spherical particles*, Powder Technology 189
//!   (2009) 395–398:
//!
//!   ```text
//!   C_D = 24/Re · (1 + 0.27·Re)^0.43 + 0.47 · (1 − exp(−0.04·Re^0.38))
//!   ```
//!
//! - **Re > 3000**: J. Almedeij, *Drag coefficient of flow around a sphere:
//!   matching asymptotically the wide trend*, Powder Technology (2008):
//!
//!   ```text
//!   φ1 = (24/Re)^10 + (21·Re^−0.67)^10 + (4·Re^−0.33)^10 + 0.4^10
//!   φ2 = 1 / ((0.148·Re^0.11)^−10 + 0.5^−10)
//!   φ3 = (1.57×10⁸·Re^−1.625)^10
//!   φ4 = 1 / ((6.0×10⁻¹⁷·Re^2.63)^−10 + 0.2^−10)
//!   C_D = (1 / (1/(φ1 + φ2) + 1/φ3) + φ4)^0.1
//!   ```
//!
//! Both fits tend to Stokes' law C_D → 24/Re at low Reynolds numbers.

use crate::physics::constants::CORRELATION_BOUNDARY;

/// Reynolds number of a sphere moving through a fluid
///
/// `Re = d·|v|/ν`
///
/// # Arguments
///
/// * `diameter` - Sphere diameter d \[m\]
/// * `speed` - Relative speed v \[m/s\] (sign ignored)
/// * `kinematic_viscosity` - ν \[m²/s\]
pub fn reynolds_number(diameter: f64, speed: f64, kinematic_viscosity: f64) -> f64 {
    diameter * speed.abs() / kinematic_viscosity
}

/// Drag coefficient C_D of a sphere at Reynolds number `reynolds`
///
/// The caller guarantees `reynolds > 0`. A NaN Reynolds number from an
/// overflowing state yields a NaN coefficient, which the integrator then
/// reports as a non-finite state.
pub fn drag_coefficient(reynolds: f64) -> f64 {
    debug_assert!(!(reynolds <= 0.0), "Reynolds number must be positive, got {}", reynolds);

    if reynolds <= CORRELATION_BOUNDARY {
        cheng(reynolds)
    } else {
        almedeij(reynolds)
    }
}

#[inline]
fn cheng(re: f64) -> f64 {
    24.0 / re * (1.0 + 0.27 * re).powf(0.43) + 0.47 * (1.0 - (-0.04 * re.powf(0.38)).exp())
}

#[inline]
fn almedeij(re: f64) -> f64 {
    let phi1 = (24.0 / re).powi(10)
        + (21.0 * re.powf(-0.67)).powi(10)
        + (4.0 * re.powf(-0.33)).powi(10)
        + 0.4_f64.powi(10);
    let phi2 = 1.0 / (1.0 / (0.148 * re.powf(0.11)).powi(10) + 1.0 / 0.5_f64.powi(10));
    let phi3 = (1.57e8 * re.powf(-1.625)).powi(10);
    let phi4 = 1.0 / (1.0 / (6.0e-17 * re.powf(2.63)).powi(10) + 1.0 / 0.2_f64.powi(10));

    (1.0 / (1.0 / (phi1 + phi2) + 1.0 / phi3) + phi4).powf(0.1)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reynolds_number_ignores_direction() {
        let forward = reynolds_number(0.1, 2.0, 1.0e-6);
        let backward = reynolds_number(0.1, -2.0, 1.0e-6);

        assert_relative_eq!(forward, 2.0e5, max_relative = 1e-12);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_stokes_limit() {
        // C_D · Re / 24 → 1 as Re → 0
        let re = 1.0e-4;
        let ratio = drag_coefficient(re) * re / 24.0;
        assert_relative_eq!(ratio, 1.0, max_relative = 1e-4);
    }

    #[test]
    fn test_cheng_reference_value() {
        // Hand evaluation at Re = 1
        let expected = 24.0 * 1.27_f64.powf(0.43) + 0.47 * (1.0 - (-0.04_f64).exp());
        assert_relative_eq!(drag_coefficient(1.0), expected, max_relative = 1e-14);
        assert_relative_eq!(drag_coefficient(1.0), 26.616, max_relative = 1e-3);
    }

    #[test]
    fn test_decreasing_in_laminar_range() {
        let samples = [0.1, 1.0, 10.0, 100.0, 500.0, 1000.0];

        for pair in samples.windows(2) {
            assert!(
                drag_coefficient(pair[0]) > drag_coefficient(pair[1]),
                "C_D not decreasing between Re = {} and Re = {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_correlations_meet_at_boundary() {
        let below = cheng(CORRELATION_BOUNDARY);
        let above = almedeij(CORRELATION_BOUNDARY);

        // Both fits give C_D ≈ 0.41 at Re = 3000
        assert_relative_eq!(below, above, max_relative = 0.02);
        assert_eq!(drag_coefficient(CORRELATION_BOUNDARY), below);
    }

    #[test]
    fn test_newton_regime_plateau() {
        for re in [1.0e4, 5.0e4, 1.0e5] {
            let cd = drag_coefficient(re);
            assert!(cd > 0.3 && cd < 0.6, "C_D = {} at Re = {} outside Newton plateau", cd, re);
        }
    }

    #[test]
    fn test_always_positive_and_finite() {
        let mut re = 1.0e-3;
        while re < 1.0e7 {
            let cd = drag_coefficient(re);
            assert!(cd.is_finite() && cd > 0.0, "C_D = {} at Re = {}", cd, re);
            re *= 3.7;
        }
    }

    #[test]
    fn test_nan_propagates_without_panic() {
        assert!(drag_coefficient(f64::NAN).is_nan());
        assert!(drag_coefficient(reynolds_number(0.1, f64::INFINITY, f64::INFINITY)).is_nan());
    }
}
