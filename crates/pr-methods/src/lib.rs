//! # pr-methods
//!
//! Statically partitioned reductions on a fixed process group.
//!
//! # Modules
//!
//! * [`partition`]: work specs and the arithmetic partitioner
//! * [`roles`]: rank → role table
//! * [`kernels`]: local kernels (quadrature, Monte Carlo π)
//! * [`job`]: the partitioned reduction job and its transports
//! * [`report`]: phase timing and the coordinator's report

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Work specs and the static partitioner.
pub mod partition;

/// Rank → role table.
pub mod roles;

/// Local kernels reducing a partition to a scalar.
pub mod kernels;

/// The partitioned reduction job.
pub mod job;

/// Phase timing and reports.
pub mod report;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use job::{
    integral_job, pi_job, IntegralJob, JobConfig, PartitionedReductionJob, PiJob, Transport,
    PARTIAL_TAG,
};
pub use kernels::{
    count_unit_circle_hits, FnTrapezoidKernel, LocalKernel, MonteCarloKernel, TrapezoidKernel,
};
pub use partition::{IntervalPartition, IntervalSpec, TrialShare, TrialSpec, WorkSpec};
pub use report::{JobReport, PhaseReport, Stopwatch};
pub use roles::{Assignment, Layout, Role, RoleTable};
