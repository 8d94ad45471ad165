//! Thread-backed process group.
//!
//! [`LocalWorld::run`] starts one OS thread per rank and hands each its own
//! [`LocalComm`]. A rank owns its inbox and a sender into every other
//! rank's inbox; ranks share no other state. Messages that arrive ahead of
//! the receive that wants them are parked in a per-rank pending queue, so a
//! receive from source 1 is never satisfied by a message from source 2.
//!
//! A rank that fails (returns an error, panics, or cannot be started)
//! leaves the group: every other rank is sent a leave notice, and their
//! receives from then on fail with [`Error::Disconnected`] naming it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, warn};
use pr_core::{ensure, Error, Rank, Result, Tag};

use crate::communicator::{Communicator, RESERVED_TAG_BASE};

/// Tag of the notice a failed rank leaves behind.
const LEAVE_TAG: Tag = RESERVED_TAG_BASE + 15;

#[derive(Debug, Clone, Copy)]
struct Envelope {
    source: Rank,
    tag: Tag,
    word: u64,
}

/// Tell every rank but `source` that `source` has left the group.
fn announce_leave<'a>(lines: impl IntoIterator<Item = &'a Sender<Envelope>>, source: Rank) {
    for line in lines {
        // A peer that is already gone needs no notice.
        let _ = line.send(Envelope {
            source,
            tag: LEAVE_TAG,
            word: 0,
        });
    }
}

/// Announces the rank's departure if its thread unwinds.
struct LeaveOnPanic<'a>(&'a LocalComm);

impl Drop for LeaveOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.leave();
        }
    }
}

/// A fixed-size group of ranks run as threads of the current process.
#[derive(Debug, Clone)]
pub struct LocalWorld {
    size: usize,
    recv_timeout: Option<Duration>,
}

impl LocalWorld {
    /// Create a group of `size` ranks. Receives block indefinitely.
    pub fn new(size: usize) -> Result<Self> {
        ensure!(size >= 1, "a process group needs at least one rank");
        Ok(Self {
            size,
            recv_timeout: None,
        })
    }

    /// Bound the wait for results owed by workers: after `timeout` without
    /// the expected result, [`Communicator::recv_result_bits`] fails with
    /// [`Error::WorkerUnreachable`]. Barrier receives stay unbounded.
    pub fn with_recv_timeout(mut self, timeout: Duration) -> Self {
        self.recv_timeout = Some(timeout);
        self
    }

    /// Number of ranks.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The configured bound on result receives, if any.
    pub fn recv_timeout(&self) -> Option<Duration> {
        self.recv_timeout
    }

    /// Build the communicators of a fresh group, indexed by rank.
    pub fn communicators(&self) -> Vec<LocalComm> {
        self.wire().0
    }

    /// Communicators plus one extra sender into every inbox, used to
    /// announce a rank that never started.
    fn wire(&self) -> (Vec<LocalComm>, Vec<Sender<Envelope>>) {
        let (senders, receivers): (Vec<Sender<Envelope>>, Vec<Receiver<Envelope>>) =
            (0..self.size).map(|_| unbounded()).unzip();
        let comms = receivers
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| LocalComm {
                rank,
                outboxes: senders
                    .iter()
                    .enumerate()
                    .map(|(dest, s)| (dest != rank).then(|| s.clone()))
                    .collect(),
                inbox,
                pending: RefCell::new(VecDeque::new()),
                recv_timeout: self.recv_timeout,
            })
            .collect();
        (comms, senders)
    }

    /// Run `program` on every rank concurrently and collect the per-rank
    /// outputs in rank order.
    ///
    /// On failure the root cause is returned: [`Error::RankPanicked`] if a
    /// rank panicked, otherwise the lowest-ranked error that is not an
    /// [`Error::Disconnected`] seen as a consequence of another rank
    /// leaving.
    pub fn run<T, F>(&self, program: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&LocalComm) -> Result<T> + Sync,
    {
        self.run_with(program, |rank| {
            thread::Builder::new().name(format!("rank-{rank}"))
        })
    }

    fn run_with<T, F, B>(&self, program: F, builder: B) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&LocalComm) -> Result<T> + Sync,
        B: Fn(Rank) -> thread::Builder,
    {
        let program = &program;
        let (comms, lines) = self.wire();
        let outcomes: Vec<Result<T>> = thread::scope(|scope| {
            let lines = lines;
            let mut handles = Vec::with_capacity(self.size);
            for comm in comms {
                let rank = comm.rank;
                let spawned = builder(rank).spawn_scoped(scope, move || {
                    let _guard = LeaveOnPanic(&comm);
                    let outcome = program(&comm);
                    if outcome.is_err() {
                        comm.leave();
                    }
                    outcome
                });
                match spawned {
                    Ok(handle) => handles.push((rank, Ok(handle))),
                    Err(e) => {
                        warn!("failed to start rank {rank}: {e}");
                        let others = lines
                            .iter()
                            .enumerate()
                            .filter(|&(dest, _)| dest != rank)
                            .map(|(_, line)| line);
                        announce_leave(others, rank);
                        handles.push((
                            rank,
                            Err(Error::Runtime(format!("failed to start rank {rank}: {e}"))),
                        ));
                        break;
                    }
                }
            }
            drop(lines);
            handles
                .into_iter()
                .map(|(rank, handle)| match handle {
                    Ok(handle) => handle.join().unwrap_or(Err(Error::RankPanicked { rank })),
                    Err(e) => Err(e),
                })
                .collect()
        });
        root_cause(outcomes)
    }
}

fn root_cause<T>(outcomes: Vec<Result<T>>) -> Result<Vec<T>> {
    let cause = {
        let errors: Vec<&Error> = outcomes.iter().filter_map(|o| o.as_ref().err()).collect();
        errors
            .iter()
            .find(|e| matches!(e, Error::RankPanicked { .. }))
            .or_else(|| {
                errors
                    .iter()
                    .find(|e| !matches!(e, Error::Disconnected { .. }))
            })
            .or_else(|| errors.first())
            .map(|e| (*e).clone())
    };
    match cause {
        Some(e) => Err(e),
        None => outcomes.into_iter().collect(),
    }
}

/// One rank's view of a [`LocalWorld`].
#[derive(Debug)]
pub struct LocalComm {
    rank: Rank,
    outboxes: Vec<Option<Sender<Envelope>>>,
    inbox: Receiver<Envelope>,
    pending: RefCell<VecDeque<Envelope>>,
    recv_timeout: Option<Duration>,
}

impl LocalComm {
    fn check_rank(&self, rank: Rank) -> Result<()> {
        if rank >= self.size() {
            return Err(Error::InvalidRank {
                rank,
                size: self.size(),
            });
        }
        Ok(())
    }

    /// Announce to every other rank that this one has left the group.
    fn leave(&self) {
        debug!("rank {} leaves the group", self.rank);
        announce_leave(self.outboxes.iter().flatten(), self.rank);
    }

    fn take_pending(&self, source: Rank, tag: Tag) -> Option<Envelope> {
        let mut pending = self.pending.borrow_mut();
        let pos = pending
            .iter()
            .position(|e| e.source == source && e.tag == tag)?;
        pending.remove(pos)
    }

    fn departed(&self) -> Option<Rank> {
        self.pending
            .borrow()
            .iter()
            .find(|e| e.tag == LEAVE_TAG)
            .map(|e| e.source)
    }

    fn next_envelope(
        &self,
        source: Rank,
        bound: Option<(Duration, Instant)>,
    ) -> Result<Envelope> {
        match bound {
            None => self
                .inbox
                .recv()
                .map_err(|_| Error::Disconnected { rank: source }),
            Some((timeout, deadline)) => self.inbox.recv_deadline(deadline).map_err(|e| match e {
                RecvTimeoutError::Timeout => {
                    let waited_ms = timeout.as_millis();
                    warn!(
                        "rank {}: no message from rank {source} after {waited_ms} ms",
                        self.rank
                    );
                    Error::WorkerUnreachable {
                        rank: source,
                        waited_ms,
                    }
                }
                RecvTimeoutError::Disconnected => Error::Disconnected { rank: source },
            }),
        }
    }

    fn receive(&self, source: Rank, tag: Tag, timeout: Option<Duration>) -> Result<u64> {
        self.check_rank(source)?;
        if let Some(envelope) = self.take_pending(source, tag) {
            return Ok(envelope.word);
        }
        if let Some(rank) = self.departed() {
            return Err(Error::Disconnected { rank });
        }
        let bound = timeout.map(|t| (t, Instant::now() + t));
        loop {
            let envelope = self.next_envelope(source, bound)?;
            if envelope.tag == LEAVE_TAG {
                let rank = envelope.source;
                warn!("rank {}: rank {rank} left the group", self.rank);
                self.pending.borrow_mut().push_back(envelope);
                return Err(Error::Disconnected { rank });
            }
            if envelope.source == source && envelope.tag == tag {
                debug!("rank {} <- rank {source} (tag {tag})", self.rank);
                return Ok(envelope.word);
            }
            self.pending.borrow_mut().push_back(envelope);
        }
    }
}

impl Communicator for LocalComm {
    fn rank(&self) -> Rank {
        self.rank
    }

    fn size(&self) -> usize {
        self.outboxes.len()
    }

    fn send_bits(&self, word: u64, dest: Rank, tag: Tag) -> Result<()> {
        self.check_rank(dest)?;
        debug!("rank {} -> rank {dest} (tag {tag})", self.rank);
        let envelope = Envelope {
            source: self.rank,
            tag,
            word,
        };
        match &self.outboxes[dest] {
            Some(outbox) => outbox
                .send(envelope)
                .map_err(|_| Error::Disconnected { rank: dest }),
            None => {
                self.pending.borrow_mut().push_back(envelope);
                Ok(())
            }
        }
    }

    fn recv_bits(&self, source: Rank, tag: Tag) -> Result<u64> {
        self.receive(source, tag, None)
    }

    fn recv_result_bits(&self, source: Rank, tag: Tag) -> Result<u64> {
        self.receive(source, tag, self.recv_timeout)
    }
}
