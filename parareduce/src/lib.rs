//! # parareduce
//!
//! Statically partitioned reductions over a fixed group of ranks: the
//! trapezoidal integral of `cos` and the Monte Carlo estimate of π, each
//! timed against a sequential reference.
//!
//! This crate is a **façade** that re-exports the workspace crates and hosts
//! the `trapezoid` and `pi_monte_carlo` binaries.
//!
//! ## Quick start
//!
//! ```rust
//! use parareduce::comm::LocalWorld;
//! use parareduce::math::QuadratureRule;
//! use parareduce::methods::{integral_job, IntervalSpec, Transport};
//!
//! let spec = IntervalSpec::new(0.0, 3.0 * std::f64::consts::PI / 2.0, 80).unwrap();
//! let job = integral_job(spec, QuadratureRule::Trapezoid, Transport::PointToPoint);
//! let reports = LocalWorld::new(3).unwrap().run(|comm| job.run(comm)).unwrap();
//! let report = reports[0].as_ref().unwrap();
//! assert!((report.partitioned.result + 1.0).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use pr_core as core;

/// Quadrature, RNG streams, statistics.
pub use pr_math as math;

/// Communicator trait and the thread-backed process group.
pub use pr_comm as comm;

/// Partitioners, kernels, and the partitioned reduction job.
pub use pr_methods as methods;

/// Shared plumbing of the binaries.
pub mod launch;
