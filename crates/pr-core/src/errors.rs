//! Error types for parareduce.
//!
//! A single `thiserror`-derived enum covers validation failures, numeric
//! failures, and the failure modes of the process group (bad ranks, workers
//! that never report, ranks that panic). [`ensure!`] is the shorthand for
//! the validation early return.

use thiserror::Error;

use crate::Rank;

/// The top-level error type used throughout parareduce.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A rank outside the process group was addressed.
    #[error("rank ({rank}) out of range [0, {size})")]
    InvalidRank {
        /// The rank that was addressed.
        rank: Rank,
        /// The size of the process group.
        size: usize,
    },

    /// A bounded receive expired before the expected sender reported.
    #[error("worker {rank} unreachable: no message after {waited_ms} ms")]
    WorkerUnreachable {
        /// Rank the receive was waiting on.
        rank: Rank,
        /// How long the receive waited, in milliseconds.
        waited_ms: u128,
    },

    /// A rank left the process group before delivering what was expected
    /// of it.
    #[error("rank {rank} is disconnected from the process group")]
    Disconnected {
        /// Rank that left.
        rank: Rank,
    },

    /// A rank terminated by panicking.
    #[error("rank {rank} panicked")]
    RankPanicked {
        /// Rank that panicked.
        rank: Rank,
    },
}

/// Shorthand `Result` type used throughout parareduce.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use pr_core::{ensure, errors::Error};
/// fn positive(x: f64) -> pr_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}
