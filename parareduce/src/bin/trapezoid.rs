//! Integral of `cos` over `[xmin, xmax]`, computed once sequentially on rank
//! 0 and once split across ranks `1..ranks`.
//!
//! ```bash
//! cargo run --release --bin trapezoid -- --ranks 3 --points 80
//! ```

use std::process::ExitCode;

use clap::Parser;
use parareduce::launch::{exit_code, init_logging, GroupArgs, RuleArg};
use pr_core::Result;
use pr_methods::{integral_job, IntervalSpec};

/// Largest acceptable gap between the partitioned and sequential results.
const AGREEMENT: f64 = 1e-6;

/// Partitioned trapezoidal integration of cos(x)
#[derive(Parser, Debug, Clone)]
#[command(name = "trapezoid")]
#[command(about = "Integrate cos(x) across a group of ranks", long_about = None)]
struct Args {
    /// Number of ranks; rank 0 collects, the others integrate
    #[arg(short = 'n', long, default_value_t = 3)]
    ranks: usize,

    /// Lower bound of the interval
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    xmin: f64,

    /// Upper bound of the interval
    #[arg(long, default_value_t = 3.0 * std::f64::consts::PI / 2.0, allow_negative_numbers = true)]
    xmax: f64,

    /// Number of grid points. The cells are dealt out in contiguous runs,
    /// so with two workers the cut lands on the midpoint only for an odd
    /// count: 80 points cut half a cell past it, 81 cut exactly at it
    #[arg(short, long, default_value_t = 80)]
    points: usize,

    /// Quadrature rule applied by each worker
    #[arg(long, value_enum, default_value_t = RuleArg::Trapezoid)]
    rule: RuleArg,

    #[command(flatten)]
    group: GroupArgs,
}

fn run(args: &Args) -> Result<()> {
    let spec = IntervalSpec::new(args.xmin, args.xmax, args.points)?;
    let job = integral_job(spec, args.rule.into(), args.group.transport.into());
    let world = args.group.world(args.ranks)?;

    let reports = world.run(|comm| job.run(comm))?;
    if let Some(report) = reports.into_iter().flatten().next() {
        println!("{report}");
        println!(
            "exact: {}  |partitioned - sequential| = {:e}",
            job.spec().xmax().sin() - job.spec().xmin().sin(),
            report.discrepancy()
        );
        if !report.agrees_within(AGREEMENT) {
            log::warn!("partitioned result drifted more than {AGREEMENT:e} from the sequential one");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    exit_code(run(&args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn points_help_explains_where_the_cut_lands() {
        let cmd = Args::command();
        let points = cmd
            .get_arguments()
            .find(|a| a.get_id() == "points")
            .unwrap();
        let help = points.get_help().unwrap().to_string();
        assert!(help.contains("81 cut exactly"), "{help}");
    }

    #[test]
    fn defaults_follow_the_reference_run() {
        let args = Args::parse_from(["trapezoid"]);
        assert_eq!(args.ranks, 3);
        assert_eq!(args.points, 80);
        assert_eq!(args.xmin, 0.0);
        assert_eq!(args.rule, RuleArg::Trapezoid);
    }
}
