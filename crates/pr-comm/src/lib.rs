//! # pr-comm
//!
//! The process group a partitioned job runs on.
//!
//! * [`Communicator`]: rank, size, blocking point-to-point messages, and
//!   the collectives built on them (barrier, reduce-to-root)
//! * [`LocalWorld`]: a process group whose ranks are OS threads that share
//!   nothing but their channels
//!
//! Every rank runs the same program and is handed its communicator
//! explicitly; there is no global world handle.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// The communicator trait and its collective operations.
pub mod communicator;

/// Thread-backed process group.
pub mod local;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use communicator::{Communicator, BARRIER_TAG, REDUCE_TAG, RELEASE_TAG, RESERVED_TAG_BASE};
pub use local::{LocalComm, LocalWorld};
