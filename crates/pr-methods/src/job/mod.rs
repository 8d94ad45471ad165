//! The partitioned reduction job.
//!
//! [`PartitionedReductionJob::run`] is the single entry point every rank
//! calls with its own communicator. The rank looks up its assignment in the
//! [`RoleTable`], and then:
//!
//! 1. the coordinator times the sequential reference over the whole spec;
//! 2. all ranks meet at a barrier;
//! 3. computing ranks reduce their own partition and scale the partial into
//!    a contribution;
//! 4. contributions are combined at the coordinator, either by blocking
//!    receives from each source rank in ascending order or by a
//!    reduce-to-root;
//! 5. the coordinator returns a [`JobReport`], every other rank `None`.

mod presets;

pub use presets::{integral_job, pi_job, IntegralJob, PiJob};

use log::{debug, info};
use pr_comm::{Communicator, RESERVED_TAG_BASE};
use pr_core::{ensure, Real, Result, Size, Tag, COORDINATOR};

use crate::kernels::LocalKernel;
use crate::partition::WorkSpec;
use crate::report::{JobReport, PhaseReport, Stopwatch};
use crate::roles::{Assignment, Layout, RoleTable};

/// Tag carried by partial results sent point-to-point.
pub const PARTIAL_TAG: Tag = 1;

/// How partial results reach the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// Each worker sends; the coordinator receives from each source in
    /// ascending rank order.
    #[default]
    PointToPoint,
    /// A sum reduce-to-root over all ranks.
    Collective,
}

impl Transport {
    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Transport::PointToPoint => "point-to-point",
            Transport::Collective => "collective",
        }
    }
}

/// Job configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobConfig {
    /// How partials are combined.
    pub transport: Transport,
    /// Tag of point-to-point partials.
    pub tag: Tag,
    /// Rank → role layout.
    pub layout: Layout,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            tag: PARTIAL_TAG,
            layout: Layout::default(),
        }
    }
}

impl JobConfig {
    /// Use `transport`.
    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Tag point-to-point partials with `tag`.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    /// Use `layout`.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

/// A work spec, the kernel that reduces its partitions, and how the
/// partials are combined.
pub struct PartitionedReductionJob<S, K> {
    spec: S,
    kernel: K,
    config: JobConfig,
}

impl<S, K> PartitionedReductionJob<S, K>
where
    S: WorkSpec,
    K: LocalKernel<S::Partition>,
{
    /// Assemble a job.
    pub fn new(spec: S, kernel: K, config: JobConfig) -> Self {
        Self {
            spec,
            kernel,
            config,
        }
    }

    /// The work spec.
    pub fn spec(&self) -> &S {
        &self.spec
    }

    /// Run this rank's part of the job.
    ///
    /// Returns `Some(report)` on the coordinator and `None` on every other
    /// rank. Every rank of the group must call this with the same job.
    pub fn run<C: Communicator>(&self, comm: &C) -> Result<Option<JobReport>> {
        ensure!(
            self.config.tag < RESERVED_TAG_BASE,
            "tag {} is reserved for collectives",
            self.config.tag
        );
        let table = RoleTable::new(self.config.layout, comm.size())?;
        let num_workers = table.num_workers();
        self.spec.check_workers(num_workers)?;
        let assignment = table.assignment(comm.rank())?;

        let sequential = if assignment.collects() {
            Some(self.run_sequential()?)
        } else {
            None
        };

        comm.barrier()?;

        let clock = Stopwatch::start();
        let contribution = match assignment.worker_index {
            Some(index) => Some(self.contribution(index, num_workers)?),
            None => None,
        };
        let combined = self.combine(comm, &table, assignment, contribution)?;
        let elapsed = clock.elapsed();

        match (sequential, combined) {
            (Some(sequential), Some(result)) => {
                let partitioned = PhaseReport {
                    description: format!(
                        "partitioned {} ({num_workers} workers, {})",
                        self.kernel.name(),
                        self.config.transport.name()
                    ),
                    result,
                    elapsed,
                };
                info!("{partitioned}");
                Ok(Some(JobReport {
                    sequential,
                    partitioned,
                    num_workers,
                }))
            }
            _ => Ok(None),
        }
    }

    /// Reduce the whole spec as one partition and time it.
    pub fn run_sequential(&self) -> Result<PhaseReport> {
        let clock = Stopwatch::start();
        let result = self.kernel.reduce(&self.spec.whole())?;
        let report = PhaseReport {
            description: format!("sequential {}", self.kernel.name()),
            result,
            elapsed: clock.elapsed(),
        };
        info!("{report}");
        Ok(report)
    }

    fn contribution(&self, worker_index: Size, num_workers: Size) -> Result<Real> {
        let partition = self.spec.partition(num_workers, worker_index)?;
        let partial = self.kernel.reduce(&partition)?;
        debug!("worker {worker_index}: partial {partial}");
        Ok(self.kernel.contribution(partial, num_workers))
    }

    fn combine<C: Communicator>(
        &self,
        comm: &C,
        table: &RoleTable,
        assignment: Assignment,
        contribution: Option<Real>,
    ) -> Result<Option<Real>> {
        match self.config.transport {
            Transport::Collective => {
                comm.reduce_sum(contribution.unwrap_or(0.0), COORDINATOR)
            }
            Transport::PointToPoint if assignment.collects() => {
                let mut sum = contribution.unwrap_or(0.0);
                for source in table.sources() {
                    sum += comm.recv_result(source, self.config.tag)?;
                }
                Ok(Some(sum))
            }
            Transport::PointToPoint => {
                if let Some(value) = contribution {
                    comm.send(value, COORDINATOR, self.config.tag)?;
                }
                Ok(None)
            }
        }
    }
}
