//! Adaptive Bulirsch-Stoer stepper
//!
//! # Mathematical Background
//!
//! One macro step of size `H` is computed several times with the modified
//! midpoint rule, using `n_k = 2(k+1)` sub-steps for row `k`:
//!
//! ```text
//! z₀ = x
//! z₁ = z₀ + h·f(z₀)                       h = H/n
//! zₘ₊₁ = zₘ₋₁ + 2h·f(zₘ)                  m = 1 … n−1
//! T_k,0 = ½ (z_n + z_{n−1} + h·f(z_n))    (Gragg smoothing)
//! ```
//!
//! Gragg's smoothing leaves an error expansion in even powers of `h`, so the
//! rows are combined by polynomial (Neville) extrapolation towards `h → 0`:
//!
//! ```text
//! T_k,j = T_k,j−1 + (T_k,j−1 − T_k−1,j−1) / ((n_k / n_k−j)² − 1)
//! ```
//!
//! The difference between the two highest entries of a row is the local
//! error estimate. It is scaled per component by
//! `atol + rtol·(|xᵢ| + H·|f(x)ᵢ|)` and reduced with the max norm.
//!
//! # Step and Order Control
//!
//! - The step proposal for row `k` is `H·0.94 / (err/0.65)^(1/(2k+1))`,
//!   clamped so the step changes by at most a factor `1/0.02^(1/(2k+1))`.
//! - The step is accepted at the first row `k ≥ 1` whose error is ≤ 1.
//! - The next target order is the one with the least work per unit step
//!   (`cost[k] / h_opt[k]`).
//! - After a rejection the next accepted step may not grow.
//!
//! The target order persists between calls so consecutive steps start from
//! the order that worked last time.

use nalgebra::SVector;

use crate::physics::EquationOfMotion;

/// Number of rows of the extrapolation table
pub(crate) const ROWS: usize = 9;

const SAFETY_ERROR: f64 = 0.65;
const SAFETY_STEP: f64 = 0.94;
const MAX_SHRINK: f64 = 0.02;
const SHRINK_LIMIT: f64 = 4.0;
const ORDER_DECREASE: f64 = 0.8;
const ORDER_INCREASE: f64 = 0.9;

/// Result of one trial step
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// The state has been advanced by the trial step
    Accepted { next_step: f64 },

    /// The state is untouched and the step must be retried with `next_step`
    Rejected { next_step: f64 },
}

/// Adaptive Bulirsch-Stoer stepper with order control
#[derive(Clone, Debug)]
pub struct BulirschStoer {
    absolute_tolerance: f64,
    relative_tolerance: f64,
    intervals: [usize; ROWS],
    cost: [usize; ROWS],
    coefficients: [[f64; ROWS]; ROWS],
    target_order: usize,
    last_rejected: bool,
    evaluations: usize,
}

impl BulirschStoer {
    /// Create a stepper for the given tolerances
    ///
    /// The initial target order is derived from the relative tolerance.
    pub fn new(absolute_tolerance: f64, relative_tolerance: f64) -> Self {
        let mut intervals = [0usize; ROWS];
        let mut cost = [0usize; ROWS];
        for k in 0..ROWS {
            intervals[k] = 2 * (k + 1);
            cost[k] = if k == 0 {
                intervals[0] + 1
            } else {
                cost[k - 1] + intervals[k]
            };
        }

        let mut coefficients = [[0.0; ROWS]; ROWS];
        for k in 1..ROWS {
            for j in 1..=k {
                let ratio = intervals[k] as f64 / intervals[k - j] as f64;
                coefficients[k][j] = ratio * ratio - 1.0;
            }
        }

        let tolerance = if relative_tolerance > 0.0 {
            relative_tolerance
        } else {
            absolute_tolerance
        };
        let order = (-tolerance.log10() * 0.6 + 0.5).floor().max(1.0) as usize;

        Self {
            absolute_tolerance,
            relative_tolerance,
            intervals,
            cost,
            coefficients,
            target_order: order.clamp(1, ROWS - 2),
            last_rejected: false,
            evaluations: 0,
        }
    }

    /// Extrapolation order the next step starts from
    pub fn target_order(&self) -> usize {
        self.target_order
    }

    /// Total right-hand side evaluations since creation
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Try to advance `state` by `step`
    ///
    /// `derivative` must be `system.evaluate(state)`. On acceptance `state`
    /// holds the extrapolated solution, on rejection it is left unchanged.
    pub fn try_step<const N: usize, S>(
        &mut self,
        system: &S,
        state: &mut SVector<f64, N>,
        derivative: &SVector<f64, N>,
        step: f64,
    ) -> StepOutcome
    where
        S: EquationOfMotion<N> + ?Sized,
    {
        let mut table = [[SVector::<f64, N>::zeros(); ROWS]; ROWS];
        let mut h_opt = [0.0; ROWS];
        let mut work = [f64::INFINITY; ROWS];

        let k_max = (self.target_order + 1).min(ROWS - 1);

        for k in 0..=k_max {
            table[k][0] = self.modified_midpoint(system, state, derivative, step, self.intervals[k]);

            for j in 1..=k {
                let difference = table[k][j - 1] - table[k - 1][j - 1];
                table[k][j] = table[k][j - 1] + difference / self.coefficients[k][j];
            }

            if k == 0 {
                continue;
            }

            let error = self.error_norm(state, derivative, &table[k][k], &table[k][k - 1], step);
            h_opt[k] = optimal_step(error, step, k);
            work[k] = self.cost[k] as f64 / h_opt[k];

            if error <= 1.0 {
                *state = table[k][k];
                let next_step = self.select_order(k, &h_opt, &work);
                let next_step = if self.last_rejected {
                    next_step.min(step)
                } else {
                    next_step
                };
                self.last_rejected = false;
                return StepOutcome::Accepted { next_step };
            }
        }

        self.last_rejected = true;
        StepOutcome::Rejected {
            next_step: h_opt[k_max],
        }
    }

    /// Modified midpoint rule with `substeps` sub-steps and Gragg smoothing
    fn modified_midpoint<const N: usize, S>(
        &mut self,
        system: &S,
        state: &SVector<f64, N>,
        derivative: &SVector<f64, N>,
        step: f64,
        substeps: usize,
    ) -> SVector<f64, N>
    where
        S: EquationOfMotion<N> + ?Sized,
    {
        let h = step / substeps as f64;

        let mut previous = *state;
        let mut current = state + derivative * h;

        for _ in 1..substeps {
            let slope = system.evaluate(&current);
            let next = previous + slope * (2.0 * h);
            previous = current;
            current = next;
        }

        let slope = system.evaluate(&current);
        self.evaluations += substeps;

        (previous + current + slope * h) * 0.5
    }

    /// Scaled max-norm of the difference between two extrapolations
    fn error_norm<const N: usize>(
        &self,
        state: &SVector<f64, N>,
        derivative: &SVector<f64, N>,
        high: &SVector<f64, N>,
        low: &SVector<f64, N>,
        step: f64,
    ) -> f64 {
        (0..N)
            .map(|i| {
                let scale = self.absolute_tolerance
                    + self.relative_tolerance * (state[i].abs() + step * derivative[i].abs());
                (high[i] - low[i]).abs() / scale
            })
            .fold(0.0, f64::max)
    }

    /// Update the target order after acceptance at row `k`, returns the next step
    fn select_order(&mut self, k: usize, h_opt: &[f64; ROWS], work: &[f64; ROWS]) -> f64 {
        if k >= 2 && work[k - 1] < ORDER_DECREASE * work[k] {
            self.target_order = (k - 1).clamp(1, ROWS - 2);
            return h_opt[k - 1];
        }

        if !self.last_rejected && k < ROWS - 2 && work[k] < ORDER_INCREASE * work[k - 1] {
            self.target_order = k + 1;
            return h_opt[k] * self.cost[k + 1] as f64 / self.cost[k] as f64;
        }

        self.target_order = k.clamp(1, ROWS - 2);
        h_opt[k]
    }
}

/// Step size proposal for row `k` given its scaled error
fn optimal_step(error: f64, step: f64, k: usize) -> f64 {
    let exponent = 1.0 / (2 * k + 1) as f64;
    let min_factor = MAX_SHRINK.powf(exponent);

    let factor = if error == 0.0 {
        1.0 / min_factor
    } else {
        let raw = SAFETY_STEP / (error / SAFETY_ERROR).powf(exponent);
        raw.clamp(min_factor / SHRINK_LIMIT, 1.0 / min_factor)
    };

    step * factor
}

// =================================================================================================
// Tests
// =================================================================================================
