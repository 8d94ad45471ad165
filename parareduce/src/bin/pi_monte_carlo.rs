//! Monte Carlo estimate of π with every rank drawing its share of the
//! trials.
//!
//! ```bash
//! cargo run --release --bin pi_monte_carlo -- --ranks 4 --trials 1000000
//! ```

use std::process::ExitCode;

use clap::Parser;
use log::info;
use parareduce::launch::{exit_code, init_logging, GroupArgs};
use pr_core::formatting::format_real;
use pr_core::Result;
use pr_math::Statistics;
use pr_methods::{pi_job, TrialSpec};

/// Partitioned Monte Carlo estimation of pi
#[derive(Parser, Debug, Clone)]
#[command(name = "pi_monte_carlo")]
#[command(about = "Estimate pi across a group of ranks", long_about = None)]
struct Args {
    /// Number of ranks; all of them draw trials
    #[arg(short = 'n', long, default_value_t = 4)]
    ranks: usize,

    /// Total number of trials
    #[arg(short, long, default_value_t = 1_000_000)]
    trials: u64,

    /// Base seed of the per-rank random streams (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Run the job this many times with consecutive seeds
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    #[command(flatten)]
    group: GroupArgs,
}

fn run(args: &Args) -> Result<()> {
    let spec = TrialSpec::new(args.trials)?;
    let world = args.group.world(args.ranks)?;
    let base_seed = args.seed.unwrap_or_else(rand::random);
    info!("base seed {base_seed}");

    let mut estimates = Statistics::new();
    for run in 0..args.repeat {
        let job = pi_job(spec, base_seed.wrapping_add(run.into()), args.group.transport.into());
        let reports = world.run(|comm| job.run(comm))?;
        if let Some(report) = reports.into_iter().flatten().next() {
            println!("{report}");
            estimates.add(report.partitioned.result);
        }
    }

    if let (true, Some(mean), Some(sd), Some(se)) = (
        args.repeat > 1,
        estimates.mean(),
        estimates.std_dev(),
        estimates.error_estimate(),
    ) {
        println!(
            "pi over {} runs: mean={} std_dev={} std_error={} min={} max={}",
            estimates.samples(),
            format_real(mean, 8),
            format_real(sd, 8),
            format_real(se, 8),
            format_real(estimates.minimum().unwrap_or(mean), 8),
            format_real(estimates.maximum().unwrap_or(mean), 8),
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    exit_code(run(&args))
}
