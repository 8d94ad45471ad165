//! Floating-point comparison.

use pr_core::Real;

/// Whether `a` and `b` differ by at most `tolerance`.
#[inline]
pub fn close(a: Real, b: Real, tolerance: Real) -> bool {
    (a - b).abs() <= tolerance
}
