//! Work specifications and the static partitioner.
//!
//! A [`WorkSpec`] is the whole job; [`WorkSpec::partition`] cuts the slice
//! belonging to one worker. Partitioning is pure arithmetic on the spec, the
//! worker count, and the worker index, so every rank derives its own slice
//! without talking to anyone.
//!
//! * [`IntervalSpec`]: `[xmin, xmax]` sampled on `num_points` grid points.
//!   The `num_points - 1` grid cells are dealt out as contiguous runs in
//!   worker order: `cells / w` each, with the first `cells % w` workers
//!   taking one extra. Neighbouring slices share their boundary point.
//! * [`TrialSpec`]: `N` Monte Carlo trials. Each worker draws `N / w`; the
//!   last worker also takes the remainder `N % w`.

use log::debug;
use pr_core::{ensure, Real, Result, Size};
use pr_math::grid_segment;

/// Stream id reserved for the unpartitioned reference computation.
pub const REFERENCE_STREAM: u64 = u64::MAX;

/// A unit of work that can be statically split across workers.
pub trait WorkSpec {
    /// The slice of work handed to a single worker.
    type Partition;

    /// The slice of worker `worker_index` out of `num_workers`.
    fn partition(&self, num_workers: Size, worker_index: Size) -> Result<Self::Partition>;

    /// The whole spec as a single partition.
    fn whole(&self) -> Self::Partition;

    /// Reject worker counts this spec cannot be run with.
    fn check_workers(&self, num_workers: Size) -> Result<()> {
        ensure!(num_workers >= 1, "at least one worker is required");
        Ok(())
    }
}

fn check_index(num_workers: Size, worker_index: Size) -> Result<()> {
    ensure!(num_workers >= 1, "at least one worker is required");
    ensure!(
        worker_index < num_workers,
        "worker index {worker_index} out of range [0, {num_workers})"
    );
    Ok(())
}

// ── Interval ──────────────────────────────────────────────────────────────────

/// `[xmin, xmax]` sampled on `num_points` evenly spaced points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalSpec {
    xmin: Real,
    xmax: Real,
    num_points: Size,
}

impl IntervalSpec {
    /// Create an interval spec.
    ///
    /// Bounds must be finite and at least two points are required.
    pub fn new(xmin: Real, xmax: Real, num_points: Size) -> Result<Self> {
        ensure!(
            xmin.is_finite() && xmax.is_finite(),
            "interval bounds must be finite, got [{xmin}, {xmax}]"
        );
        ensure!(num_points >= 2, "need at least 2 points, got {num_points}");
        Ok(Self {
            xmin,
            xmax,
            num_points,
        })
    }

    /// Lower bound.
    pub fn xmin(&self) -> Real {
        self.xmin
    }

    /// Upper bound.
    pub fn xmax(&self) -> Real {
        self.xmax
    }

    /// Number of grid points.
    pub fn num_points(&self) -> Size {
        self.num_points
    }

    /// Number of grid cells (`num_points - 1`).
    pub fn cells(&self) -> Size {
        self.num_points - 1
    }

    fn slice(&self, first_point: Size, last_point: Size) -> IntervalPartition {
        IntervalPartition {
            first_point,
            last_point,
            spec: *self,
        }
    }
}

impl WorkSpec for IntervalSpec {
    type Partition = IntervalPartition;

    fn partition(&self, num_workers: Size, worker_index: Size) -> Result<IntervalPartition> {
        check_index(num_workers, worker_index)?;
        let cells = self.cells();
        let base = cells / num_workers;
        let extra = cells % num_workers;
        let first = worker_index * base + worker_index.min(extra);
        let width = base + usize::from(worker_index < extra);
        let part = self.slice(first, first + width);
        debug!(
            "worker {worker_index}/{num_workers}: points {}..={} over [{}, {}]",
            part.first_point,
            part.last_point,
            part.lower(),
            part.upper()
        );
        Ok(part)
    }

    fn whole(&self) -> IntervalPartition {
        self.slice(0, self.cells())
    }
}

/// A contiguous run of grid points of an [`IntervalSpec`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalPartition {
    first_point: Size,
    last_point: Size,
    spec: IntervalSpec,
}

impl IntervalPartition {
    /// Global index of the first grid point.
    pub fn first_point(&self) -> Size {
        self.first_point
    }

    /// Global index of the last grid point (inclusive).
    pub fn last_point(&self) -> Size {
        self.last_point
    }

    /// Number of grid points in the slice, boundaries included.
    pub fn num_points(&self) -> Size {
        self.last_point - self.first_point + 1
    }

    /// Left end of the sub-interval.
    pub fn lower(&self) -> Real {
        self.point(self.first_point)
    }

    /// Right end of the sub-interval.
    pub fn upper(&self) -> Real {
        self.point(self.last_point)
    }

    /// The slice's grid points, in increasing index order.
    pub fn abscissas(&self) -> Vec<Real> {
        grid_segment(
            self.spec.xmin,
            self.spec.xmax,
            self.spec.cells(),
            self.first_point,
            self.last_point,
        )
    }

    fn point(&self, k: Size) -> Real {
        grid_segment(self.spec.xmin, self.spec.xmax, self.spec.cells(), k, k)[0]
    }
}

// ── Trials ────────────────────────────────────────────────────────────────────

/// A total number of Monte Carlo trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialSpec {
    total: u64,
}

impl TrialSpec {
    /// Create a trial spec. At least one trial is required.
    pub fn new(total: u64) -> Result<Self> {
        ensure!(total >= 1, "need at least 1 trial, got {total}");
        Ok(Self { total })
    }
}

impl WorkSpec for TrialSpec {
    type Partition = TrialShare;

    fn partition(&self, num_workers: Size, worker_index: Size) -> Result<TrialShare> {
        check_index(num_workers, worker_index)?;
        let w = num_workers as u64;
        let mut trials = self.total / w;
        if worker_index == num_workers - 1 {
            trials += self.total % w;
        }
        debug!("worker {worker_index}/{num_workers}: {trials} trials");
        Ok(TrialShare {
            worker_index,
            stream: worker_index as u64,
            trials,
        })
    }

    fn whole(&self) -> TrialShare {
        TrialShare {
            worker_index: 0,
            stream: REFERENCE_STREAM,
            trials: self.total,
        }
    }

    fn check_workers(&self, num_workers: Size) -> Result<()> {
        ensure!(num_workers >= 1, "at least one worker is required");
        ensure!(
            self.total >= num_workers as u64,
            "{} trials cannot give each of {num_workers} workers a non-empty share",
            self.total
        );
        Ok(())
    }
}

/// One worker's share of a [`TrialSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialShare {
    /// Index of the worker owning this share.
    pub worker_index: Size,
    /// Random stream the share draws from.
    pub stream: u64,
    /// Number of trials.
    pub trials: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn interval_spec_validation() {
        assert!(IntervalSpec::new(0.0, 1.0, 1).is_err());
        assert!(IntervalSpec::new(0.0, f64::NAN, 10).is_err());
        assert!(IntervalSpec::new(0.0, f64::INFINITY, 10).is_err());
        assert!(IntervalSpec::new(0.0, 1.0, 2).is_ok());
    }

    #[test]
    fn even_split_lands_on_midpoint() {
        let spec = IntervalSpec::new(0.0, 3.0 * PI / 2.0, 81).unwrap();
        let left = spec.partition(2, 0).unwrap();
        let right = spec.partition(2, 1).unwrap();
        assert_eq!(left.num_points(), 41);
        assert_eq!(right.num_points(), 41);
        assert!((left.upper() - 3.0 * PI / 4.0).abs() < 1e-12);
        assert_eq!(left.upper(), right.lower());
        assert_eq!(right.upper(), 3.0 * PI / 2.0);
    }

    #[test]
    fn leftover_cells_go_to_leading_workers() {
        // 79 cells over 3 workers: 27, 26, 26
        let spec = IntervalSpec::new(0.0, 1.0, 80).unwrap();
        let cells: Vec<usize> = (0..3)
            .map(|i| spec.partition(3, i).unwrap().num_points() - 1)
            .collect();
        assert_eq!(cells, vec![27, 26, 26]);
    }

    #[test]
    fn surplus_workers_get_a_single_point() {
        let spec = IntervalSpec::new(0.0, 1.0, 2).unwrap();
        let p0 = spec.partition(3, 0).unwrap();
        let p2 = spec.partition(3, 2).unwrap();
        assert_eq!(p0.num_points(), 2);
        assert_eq!(p2.num_points(), 1);
        assert_eq!(p2.abscissas(), vec![1.0]);
    }

    #[test]
    fn bad_worker_indices_are_rejected() {
        let spec = IntervalSpec::new(0.0, 1.0, 10).unwrap();
        assert!(spec.partition(0, 0).is_err());
        assert!(spec.partition(2, 2).is_err());
        let trials = TrialSpec::new(10).unwrap();
        assert!(trials.partition(3, 3).is_err());
    }

    #[test]
    fn remainder_goes_to_last_worker() {
        let spec = TrialSpec::new(1_000_003).unwrap();
        let shares: Vec<u64> = (0..4).map(|i| spec.partition(4, i).unwrap().trials).collect();
        assert_eq!(shares, vec![250_000, 250_000, 250_000, 250_003]);
    }

    #[test]
    fn trial_shares_use_distinct_streams() {
        let spec = TrialSpec::new(100).unwrap();
        let a = spec.partition(3, 0).unwrap();
        let b = spec.partition(3, 1).unwrap();
        assert_ne!(a.stream, b.stream);
        assert_ne!(spec.whole().stream, a.stream);
    }

    #[test]
    fn trial_validation() {
        assert!(TrialSpec::new(0).is_err());
        let spec = TrialSpec::new(3).unwrap();
        assert!(spec.check_workers(3).is_ok());
        assert!(spec.check_workers(4).is_err());
        assert!(spec.check_workers(0).is_err());
    }
}
