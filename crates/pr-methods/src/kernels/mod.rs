//! Local kernels: reduce one partition to one scalar.
//!
//! * [`TrapezoidKernel`]: samples an integrand on an interval slice and
//!   applies a quadrature rule
//! * [`MonteCarloKernel`]: estimates π from a share of unit-circle trials

mod monte_carlo;

pub use monte_carlo::{count_unit_circle_hits, MonteCarloKernel};

use pr_core::{Real, Result, Size};
use pr_math::QuadratureRule;

use crate::partition::IntervalPartition;

/// Reduces a partition of type `P` to a single partial result.
pub trait LocalKernel<P> {
    /// Compute the partial result of `partition`.
    fn reduce(&self, partition: &P) -> Result<Real>;

    /// The value a worker contributes to the coordinator's sum, given its
    /// partial and the number of workers. Identity unless the kernel's
    /// partials are averages that must be pre-scaled.
    fn contribution(&self, partial: Real, _num_workers: Size) -> Real {
        partial
    }

    /// Short human-readable name.
    fn name(&self) -> String;
}

// ─── Trapezoid ────────────────────────────────────────────────────────────────

/// Integrates `f` over an interval slice with a quadrature rule.
#[derive(Debug, Clone, Copy)]
pub struct TrapezoidKernel<F> {
    integrand: F,
    rule: QuadratureRule,
}

impl<F: Fn(Real) -> Real> TrapezoidKernel<F> {
    /// Create a kernel for `integrand`.
    pub fn new(integrand: F, rule: QuadratureRule) -> Self {
        Self { integrand, rule }
    }
}

/// A [`TrapezoidKernel`] over a plain function pointer.
pub type FnTrapezoidKernel = TrapezoidKernel<fn(Real) -> Real>;

impl FnTrapezoidKernel {
    /// Kernel integrating `cos`.
    pub fn cosine(rule: QuadratureRule) -> Self {
        Self::new(Real::cos, rule)
    }
}

impl<F: Fn(Real) -> Real> LocalKernel<IntervalPartition> for TrapezoidKernel<F> {
    fn reduce(&self, partition: &IntervalPartition) -> Result<Real> {
        let x = partition.abscissas();
        let y: Vec<Real> = x.iter().map(|&xi| (self.integrand)(xi)).collect();
        self.rule.apply(&x, &y)
    }

    fn name(&self) -> String {
        format!("{} integral", self.rule.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{IntervalSpec, WorkSpec};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn integrate(rule: QuadratureRule, b: Real, n: usize) -> Real {
        let spec = IntervalSpec::new(0.0, b, n).unwrap();
        FnTrapezoidKernel::cosine(rule).reduce(&spec.whole()).unwrap()
    }

    #[test]
    fn cosine_on_three_quarter_pi() {
        let exact = (3.0 * PI / 4.0).sin();
        let got = integrate(QuadratureRule::Trapezoid, 3.0 * PI / 4.0, 80);
        assert!((got - exact).abs() < 1e-2, "got {got}, expected {exact}");
    }

    #[test]
    fn left_rectangle_error_shrinks() {
        let b = 3.0 * PI / 4.0;
        let exact = b.sin();
        let e80 = (integrate(QuadratureRule::LeftRectangle, b, 80) - exact).abs();
        let e800 = (integrate(QuadratureRule::LeftRectangle, b, 800) - exact).abs();
        assert!(e80 < 5e-2, "error {e80}");
        assert!(e800 < e80 / 5.0, "error {e800} vs {e80}");
    }

    #[test]
    fn sequential_integral_over_three_half_pi() {
        let got = integrate(QuadratureRule::Trapezoid, 3.0 * PI / 2.0, 80);
        assert_abs_diff_eq!(got, -1.0, epsilon = 1e-3);
    }

    #[test]
    fn single_point_slice_is_zero() {
        let spec = IntervalSpec::new(0.0, 1.0, 2).unwrap();
        let lone = spec.partition(3, 2).unwrap();
        let k = TrapezoidKernel::new(|x: Real| x * x + 1.0, QuadratureRule::Trapezoid);
        assert_eq!(k.reduce(&lone).unwrap(), 0.0);
    }

    #[test]
    fn arbitrary_integrand() {
        let spec = IntervalSpec::new(0.0, 1.0, 2001).unwrap();
        let k = TrapezoidKernel::new(|x: Real| 3.0 * x * x, QuadratureRule::Trapezoid);
        assert_abs_diff_eq!(k.reduce(&spec.whole()).unwrap(), 1.0, epsilon = 1e-6);
        assert_eq!(k.contribution(0.25, 4), 0.25);
    }
}
