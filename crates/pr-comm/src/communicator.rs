//! The communicator trait.
//!
//! Implementors supply the two blocking primitives, [`Communicator::send_bits`]
//! and [`Communicator::recv_bits`], which move one 64-bit word between ranks.
//! Everything else (typed sends, barrier, reduce-to-root) is provided on top
//! of them.
//!
//! Receives of a result a worker owes the caller go through
//! [`Communicator::recv_result_bits`], which an implementation may bound in
//! time. Synchronisation receives (the barrier) always block.
//!
//! Tags at or above [`RESERVED_TAG_BASE`] belong to the collectives.

use pr_core::{Rank, Real, Result, Tag, COORDINATOR};

/// First tag reserved for collective operations.
pub const RESERVED_TAG_BASE: Tag = u32::MAX - 15;

/// Tag of the "arrived" message a rank sends into a barrier.
pub const BARRIER_TAG: Tag = RESERVED_TAG_BASE;

/// Tag of the "release" message the root sends out of a barrier.
pub const RELEASE_TAG: Tag = RESERVED_TAG_BASE + 1;

/// Tag of reduce-to-root contributions.
pub const REDUCE_TAG: Tag = RESERVED_TAG_BASE + 2;

/// A handle on a fixed-size process group, seen from one rank.
pub trait Communicator {
    /// This rank, in `[0, size)`.
    fn rank(&self) -> Rank;

    /// Number of ranks in the group.
    fn size(&self) -> usize;

    /// Send one word to `dest`. May block until the receiver is ready.
    fn send_bits(&self, word: u64, dest: Rank, tag: Tag) -> Result<()>;

    /// Receive one word from `source` carrying `tag`, blocking until it
    /// arrives. Messages from the same source with the same tag are
    /// delivered in the order they were sent.
    fn recv_bits(&self, source: Rank, tag: Tag) -> Result<u64>;

    /// Receive a result that `source` owes this rank.
    ///
    /// Same matching as [`Communicator::recv_bits`]; an implementation may
    /// give up after a bounded wait and report `source` as unreachable.
    fn recv_result_bits(&self, source: Rank, tag: Tag) -> Result<u64> {
        self.recv_bits(source, tag)
    }

    /// Whether this rank is the coordinator (rank 0).
    fn is_coordinator(&self) -> bool {
        self.rank() == COORDINATOR
    }

    /// Send a real value to `dest`.
    fn send(&self, value: Real, dest: Rank, tag: Tag) -> Result<()> {
        self.send_bits(value.to_bits(), dest, tag)
    }

    /// Receive a real value from `source`.
    fn recv(&self, source: Rank, tag: Tag) -> Result<Real> {
        self.recv_bits(source, tag).map(Real::from_bits)
    }

    /// Receive a real result owed by `source`.
    fn recv_result(&self, source: Rank, tag: Tag) -> Result<Real> {
        self.recv_result_bits(source, tag).map(Real::from_bits)
    }

    /// Block until every rank has entered the barrier.
    ///
    /// Every rank reports to the coordinator, which releases all of them
    /// once the last report is in.
    fn barrier(&self) -> Result<()> {
        if self.is_coordinator() {
            for source in (0..self.size()).filter(|&r| r != COORDINATOR) {
                self.recv_bits(source, BARRIER_TAG)?;
            }
            for dest in (0..self.size()).filter(|&r| r != COORDINATOR) {
                self.send_bits(0, dest, RELEASE_TAG)?;
            }
        } else {
            self.send_bits(0, COORDINATOR, BARRIER_TAG)?;
            self.recv_bits(COORDINATOR, RELEASE_TAG)?;
        }
        Ok(())
    }

    /// Sum `value` over all ranks at `root`.
    ///
    /// Returns `Some(sum)` at the root and `None` elsewhere. The root adds
    /// the contributions in ascending rank order whatever order they arrive
    /// in, so the result is bit-for-bit reproducible.
    fn reduce_sum(&self, value: Real, root: Rank) -> Result<Option<Real>> {
        if self.rank() != root {
            self.send(value, root, REDUCE_TAG)?;
            return Ok(None);
        }
        let mut sum = 0.0;
        for source in 0..self.size() {
            sum += if source == root {
                value
            } else {
                self.recv_result(source, REDUCE_TAG)?
            };
        }
        Ok(Some(sum))
    }
}
