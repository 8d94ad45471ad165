use pr_core::{ensure, Real, Result, Size};
use pr_math::MersenneTwisterUniformRng;

use super::LocalKernel;
use crate::partition::TrialShare;

/// Draw `trials` points uniformly in `[-1, 1]²` and count those with
/// `x² + y² ≤ 1`.
pub fn count_unit_circle_hits(rng: &mut MersenneTwisterUniformRng, trials: u64) -> u64 {
    let mut hits = 0;
    for _ in 0..trials {
        let x = rng.next_in(-1.0, 1.0);
        let y = rng.next_in(-1.0, 1.0);
        if x * x + y * y <= 1.0 {
            hits += 1;
        }
    }
    hits
}

/// Estimates π as `4 · hits / trials` over a share of trials.
///
/// Each share draws from its own stream of the kernel's base seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloKernel {
    seed: u64,
}

impl MonteCarloKernel {
    /// Create a kernel whose streams derive from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LocalKernel<TrialShare> for MonteCarloKernel {
    fn reduce(&self, share: &TrialShare) -> Result<Real> {
        ensure!(
            share.trials > 0,
            "worker {} has an empty trial share",
            share.worker_index
        );
        let mut rng = MersenneTwisterUniformRng::for_stream(self.seed, share.stream);
        let hits = count_unit_circle_hits(&mut rng, share.trials);
        Ok(4.0 * hits as Real / share.trials as Real)
    }

    /// Local estimates are pre-divided by the worker count so the
    /// coordinator's plain sum is their average.
    fn contribution(&self, partial: Real, num_workers: Size) -> Real {
        partial / num_workers as Real
    }

    fn name(&self) -> String {
        "monte carlo pi".into()
    }
}
