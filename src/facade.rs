//! Flat, function-style access to a single current pendulum
//!
//! Some callers want one implicit pendulum rather than an object to pass
//! around. This module keeps that pendulum in a thread-local slot:
//! [`initialize`] fills it, [`teardown`] empties it, and every other function
//! operates on it.
//!
//! # Threads
//!
//! The slot is **per thread** and not shared: a pendulum initialized on one
//! thread is invisible from another, which sees [`PendulumError::NotInitialized`].
//! Code that needs several pendulums or cross-thread access should hold
//! [`Pendulum`] values directly.
//!
//! # Example
//!
//! ```rust
//! use pendulum_rs::facade;
//!
//! facade::initialize(1.0, 0.05, false, false, 0.3);
//! facade::set_fluid(1)?;
//! let angle = facade::next_step(0.01)?;
//! assert!(angle < 0.3);
//! facade::teardown();
//! # Ok::<(), pendulum_rs::PendulumError>(())
//! ```

use std::cell::RefCell;
use std::path::Path;

use crate::error::PendulumError;
use crate::models::Pendulum;

thread_local! {
    static CURRENT: RefCell<Option<Pendulum>> = const { RefCell::new(None) };
}

fn with_current<T>(f: impl FnOnce(&mut Pendulum) -> Result<T, PendulumError>) -> Result<T, PendulumError> {
    CURRENT.with_borrow_mut(|slot| match slot.as_mut() {
        Some(pendulum) => f(pendulum),
        None => Err(PendulumError::NotInitialized),
    })
}

// =================================================================================================
// Lifecycle
// =================================================================================================

/// Creates the current pendulum, replacing any previous one
pub fn initialize(
    length: f64,
    radius: f64,
    resistance: bool,
    simple_harmonic: bool,
    initial_angle: f64,
) {
    let pendulum = Pendulum::new(length, radius, resistance, simple_harmonic, initial_angle);
    CURRENT.with_borrow_mut(|slot| *slot = Some(pendulum));
}

/// Drops the current pendulum; a no-op when there is none
pub fn teardown() {
    CURRENT.with_borrow_mut(|slot| *slot = None);
}

pub fn is_initialized() -> bool {
    CURRENT.with_borrow(|slot| slot.is_some())
}

// =================================================================================================
// State and flags
// =================================================================================================

/// Current angle θ \[rad\]
pub fn theta() -> Result<f64, PendulumError> {
    with_current(|p| Ok(p.angle()))
}

pub fn set_theta(angle: f64) -> Result<(), PendulumError> {
    with_current(|p| {
        p.set_angle(angle);
        Ok(())
    })
}

/// Current angular velocity ω \[rad/s\]
pub fn velocity() -> Result<f64, PendulumError> {
    with_current(|p| Ok(p.velocity()))
}

pub fn set_velocity(velocity: f64) -> Result<(), PendulumError> {
    with_current(|p| {
        p.set_velocity(velocity);
        Ok(())
    })
}

pub fn set_resistance(enabled: bool) -> Result<(), PendulumError> {
    with_current(|p| {
        p.set_resistance(enabled);
        Ok(())
    })
}

pub fn set_simple_harmonic(enabled: bool) -> Result<(), PendulumError> {
    with_current(|p| {
        p.set_simple_harmonic(enabled);
        Ok(())
    })
}

/// Switches the surrounding fluid: 0 = air, 1 = water
///
/// # Errors
///
/// [`PendulumError::InvalidFluid`] for any other selector; the pendulum is
/// left unchanged.
pub fn set_fluid(selector: i32) -> Result<(), PendulumError> {
    with_current(|p| p.set_fluid(selector))
}

// =================================================================================================
// Energy
// =================================================================================================

pub fn kinetic_energy() -> Result<f64, PendulumError> {
    with_current(|p| Ok(p.kinetic_energy()))
}

pub fn potential_energy() -> Result<f64, PendulumError> {
    with_current(|p| Ok(p.potential_energy()))
}

// =================================================================================================
// Integration
// =================================================================================================

/// Advances the current pendulum by `dt` seconds, returns the new angle
pub fn next_step(dt: f64) -> Result<f64, PendulumError> {
    with_current(|p| p.advance(dt))
}

/// Integrates for `duration` seconds, writing a CSV record every `dt` to `path`
///
/// Returns the number of records written.
pub fn save_result(dt: f64, path: impl AsRef<Path>, duration: f64) -> Result<usize, PendulumError> {
    with_current(|p| p.save_trajectory(dt, path, duration))
}

// =================================================================================================
// Tests
// =================================================================================================
