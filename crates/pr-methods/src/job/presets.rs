//! The two shipped jobs.

use pr_math::QuadratureRule;

use super::{JobConfig, PartitionedReductionJob, Transport};
use crate::kernels::{FnTrapezoidKernel, MonteCarloKernel};
use crate::partition::{IntervalSpec, TrialSpec};
use crate::roles::Layout;

/// Integral of `cos` over an interval; rank 0 only collects.
pub type IntegralJob = PartitionedReductionJob<IntervalSpec, FnTrapezoidKernel>;

/// Monte Carlo π; every rank draws trials.
pub type PiJob = PartitionedReductionJob<TrialSpec, MonteCarloKernel>;

/// Integrate `cos` over `spec` with `rule`, combining over `transport`.
pub fn integral_job(spec: IntervalSpec, rule: QuadratureRule, transport: Transport) -> IntegralJob {
    PartitionedReductionJob::new(
        spec,
        FnTrapezoidKernel::cosine(rule),
        JobConfig::default()
            .with_layout(Layout::DedicatedCoordinator)
            .with_transport(transport),
    )
}

/// Estimate π from `spec` trials with streams of `seed`, combining over
/// `transport`.
pub fn pi_job(spec: TrialSpec, seed: u64, transport: Transport) -> PiJob {
    PartitionedReductionJob::new(
        spec,
        MonteCarloKernel::new(seed),
        JobConfig::default()
            .with_layout(Layout::ParticipatingCoordinator)
            .with_transport(transport),
    )
}
