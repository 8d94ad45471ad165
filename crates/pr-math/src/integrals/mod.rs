//! Numerical integration over sampled data.
//!
//! Provides the left-rectangle and trapezoidal rules over abscissa/ordinate
//! pairs, and the uniform grids those samples are taken on. A grid over
//! `[a, b]` with `cells` cells has points `x_k = a + k·h`, `h = (b - a) / cells`,
//! with the last point pinned to `b`; any contiguous run of those points can
//! be regenerated on its own with [`grid_segment`], so disjoint slices of
//! one grid agree bit-for-bit on their shared boundary points.

pub mod discrete;

pub use discrete::{discrete_left_rectangle, discrete_trapezoid};

use pr_core::{ensure, errors::Result, Real, Size};

/// A quadrature rule applied to sampled data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuadratureRule {
    /// `Σ f(x_i)·(x_{i+1} - x_i)`: first-order, one evaluation per cell.
    LeftRectangle,
    /// `Σ ½·(x_{i+1} - x_i)·(f_i + f_{i+1})`: second-order.
    #[default]
    Trapezoid,
}

impl QuadratureRule {
    /// Apply the rule to abscissae `x` and ordinates `f`.
    ///
    /// Both slices must be non-empty and of equal length. A single point
    /// integrates to zero.
    pub fn apply(&self, x: &[Real], f: &[Real]) -> Result<Real> {
        ensure!(
            x.len() == f.len(),
            "abscissae ({}) and ordinates ({}) differ in length",
            x.len(),
            f.len()
        );
        ensure!(!x.is_empty(), "at least one sample point is required");
        Ok(match self {
            QuadratureRule::LeftRectangle => discrete_left_rectangle(x, f),
            QuadratureRule::Trapezoid => discrete_trapezoid(x, f),
        })
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            QuadratureRule::LeftRectangle => "left-rectangle",
            QuadratureRule::Trapezoid => "trapezoid",
        }
    }
}

/// Points `first..=last` of the uniform grid over `[a, b]` with `cells` cells.
///
/// # Panics
/// Panics if `cells == 0`, `first > last`, or `last > cells`.
pub fn grid_segment(a: Real, b: Real, cells: Size, first: Size, last: Size) -> Vec<Real> {
    assert!(cells > 0, "a grid needs at least one cell");
    assert!(
        first <= last && last <= cells,
        "segment {first}..={last} outside grid of {cells} cells"
    );
    let h = (b - a) / cells as Real;
    (first..=last)
        .map(|k| if k == cells { b } else { a + k as Real * h })
        .collect()
}

/// `n` evenly spaced points over `[a, b]`, endpoints included.
///
/// # Panics
/// Panics if `n < 2`.
pub fn linspace(a: Real, b: Real, n: Size) -> Vec<Real> {
    assert!(n >= 2, "need at least 2 points, got {n}");
    grid_segment(a, b, n - 1, 0, n - 1)
}
