//! Discrete integrators operating on pre-computed data arrays.
//!
//! These are used when the integrand is only available as a vector of
//! function values at specified abscissae, which is exactly what a worker
//! holds once it has sampled its slice of the grid.

use pr_core::Real;

/// Left-rectangle rule on discrete data points.
///
/// Given abscissae `x[0..n]` and ordinates `f[0..n]`, returns
///
/// $$\sum_{i=0}^{n-2} f_i\,(x_{i+1}-x_i).$$
///
/// The last ordinate is never read. Fewer than two points yield zero.
pub fn discrete_left_rectangle(x: &[Real], f: &[Real]) -> Real {
    debug_assert_eq!(x.len(), f.len());
    let n = x.len();
    if n < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n - 1 {
        sum += f[i] * (x[i + 1] - x[i]);
    }
    sum
}

/// Composite trapezoidal rule on discrete data points.
///
/// Given abscissae `x[0..n]` and ordinates `f[0..n]`, returns
///
/// $$\sum_{i=0}^{n-2} \tfrac12 (x_{i+1}-x_i)(f_i + f_{i+1}).$$
pub fn discrete_trapezoid(x: &[Real], f: &[Real]) -> Real {
    debug_assert_eq!(x.len(), f.len());
    let n = x.len();
    if n < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n - 1 {
        sum += (x[i + 1] - x[i]) * (f[i] + f[i + 1]);
    }
    0.5 * sum
}
