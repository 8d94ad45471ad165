//! Command-line plumbing shared by the binaries: logging setup, the
//! process-group options, and the exit path.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, ValueEnum};
use pr_comm::LocalWorld;
use pr_core::Result;
use pr_math::QuadratureRule;
use pr_methods::Transport;

/// Install `env_logger`, reading the filter from `RUST_LOG` (default
/// `info`).
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// How partials reach the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportArg {
    /// Blocking receive from each worker rank in turn.
    PointToPoint,
    /// Sum reduce-to-root.
    Collective,
}

impl From<TransportArg> for Transport {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::PointToPoint => Transport::PointToPoint,
            TransportArg::Collective => Transport::Collective,
        }
    }
}

/// Quadrature rule applied by each worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuleArg {
    /// `Σ f(x_i)·(x_{i+1} - x_i)`.
    Rectangle,
    /// `Σ ½·(x_{i+1} - x_i)·(f_i + f_{i+1})`.
    Trapezoid,
}

impl From<RuleArg> for QuadratureRule {
    fn from(arg: RuleArg) -> Self {
        match arg {
            RuleArg::Rectangle => QuadratureRule::LeftRectangle,
            RuleArg::Trapezoid => QuadratureRule::Trapezoid,
        }
    }
}

/// Options of the process group and the combine step.
#[derive(Debug, Clone, Args)]
pub struct GroupArgs {
    /// How partial results are combined at rank 0
    #[arg(long, value_enum, default_value_t = TransportArg::PointToPoint)]
    pub transport: TransportArg,

    /// Give up on a worker whose result has not arrived after this many
    /// milliseconds instead of waiting forever
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl GroupArgs {
    /// Build a process group of `ranks` ranks with these options.
    pub fn world(&self, ranks: usize) -> Result<LocalWorld> {
        let world = LocalWorld::new(ranks)?;
        Ok(match self.timeout_ms {
            Some(ms) => world.with_recv_timeout(Duration::from_millis(ms)),
            None => world,
        })
    }
}

/// Map the outcome of a binary's body to its exit code.
pub fn exit_code(outcome: Result<()>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
