//! # pr-math
//!
//! Mathematical building blocks for the partitioned reductions: quadrature
//! rules over sampled data, uniform grids, Mersenne-Twister random streams,
//! a running statistics accumulator, and floating-point comparison.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison utilities.
pub mod comparison;

/// Quadrature rules over sampled data and uniform grids.
pub mod integrals;

/// Random number generators.
pub mod random_numbers;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::close;
pub use integrals::{grid_segment, linspace, QuadratureRule};
pub use random_numbers::{stream_seed, MersenneTwisterUniformRng};
pub use statistics::Statistics;
