//! Numerical stepping methods
//!
//! # Available Methods
//!
//! - **[`BulirschStoer`]**: modified midpoint rule + Richardson extrapolation
//!   - Order: adaptive, up to 2·(rows − 1)
//!   - Cost: `n_k` evaluations for row `k`, `n_k = 2, 4, 6, …`
//!   - Use: smooth non-stiff problems at very tight tolerances
//!
//! A stepper only takes one trial step; looping over a time span and
//! handling rejections is the job of [`MotionIntegrator`](crate::solver::MotionIntegrator).

mod bulirsch_stoer;

// Re-exports for convenience
pub use bulirsch_stoer::{BulirschStoer, StepOutcome};
