//! Collective operations over a thread-backed process group.

use std::thread;
use std::time::Duration;

use pr_comm::{Communicator, LocalWorld};
use pr_core::{Error, COORDINATOR};

fn world(size: usize) -> LocalWorld {
    LocalWorld::new(size)
        .unwrap()
        .with_recv_timeout(Duration::from_secs(10))
}

// ─── reduce ───────────────────────────────────────────────────────────────────

#[test]
fn reduce_sum_arrives_only_at_root() {
    let results = world(4)
        .run(|comm| comm.reduce_sum(comm.rank() as f64 + 1.0, COORDINATOR))
        .unwrap();
    assert_eq!(results[0], Some(10.0));
    assert!(results[1..].iter().all(Option::is_none));
}

#[test]
fn reduce_sum_is_independent_of_arrival_order() {
    // Identical partials, so the comparison is immune to float reassociation.
    let partial = 0.1_f64;
    let mut sums = Vec::new();
    for delays in [[0u64, 30, 60], [60, 30, 0], [30, 0, 60]] {
        let results = world(4)
            .run(|comm| {
                if comm.rank() > 0 {
                    thread::sleep(Duration::from_millis(delays[comm.rank() - 1]));
                }
                comm.reduce_sum(partial, COORDINATOR)
            })
            .unwrap();
        sums.push(results[0].unwrap());
    }
    assert!(sums.iter().all(|s| s.to_bits() == sums[0].to_bits()));
}

#[test]
fn reduce_sum_to_non_zero_root() {
    let results = world(3)
        .run(|comm| comm.reduce_sum(2.0, 2))
        .unwrap();
    assert_eq!(results, vec![None, None, Some(6.0)]);
}

// ─── barrier ──────────────────────────────────────────────────────────────────

#[test]
fn barrier_releases_every_rank() {
    let results = world(5)
        .run(|comm| {
            comm.barrier()?;
            comm.barrier()?;
            Ok(comm.rank())
        })
        .unwrap();
    assert_eq!(results, vec![0, 1, 2, 3, 4]);
}

#[test]
fn single_rank_world_reduces_to_itself() {
    let results = world(1)
        .run(|comm| {
            comm.barrier()?;
            comm.reduce_sum(4.5, COORDINATOR)
        })
        .unwrap();
    assert_eq!(results, vec![Some(4.5)]);
}

// ─── failure modes ───────────────────────────────────────────────────────────

#[test]
fn silent_worker_times_out_the_coordinator() {
    let world = LocalWorld::new(2)
        .unwrap()
        .with_recv_timeout(Duration::from_millis(50));
    let outcome = world.run(|comm| {
        if comm.is_coordinator() {
            comm.recv_result(1, 1).map(Some)
        } else {
            thread::sleep(Duration::from_millis(300));
            Ok(None)
        }
    });
    assert_eq!(
        outcome,
        Err(Error::WorkerUnreachable {
            rank: 1,
            waited_ms: 50
        })
    );
}

#[test]
fn worker_that_exits_without_reporting_is_named() {
    let outcome = LocalWorld::new(3).unwrap().run(|comm| match comm.rank() {
        0 => comm.reduce_sum(0.0, COORDINATOR),
        1 => Ok(None),
        _ => comm.reduce_sum(1.0, COORDINATOR),
    });
    assert_eq!(outcome, Err(Error::Disconnected { rank: 1 }));
}

#[test]
fn long_coordinator_phase_does_not_trip_the_result_bound() {
    let world = LocalWorld::new(4)
        .unwrap()
        .with_recv_timeout(Duration::from_millis(50));
    let results = world
        .run(|comm| {
            if comm.is_coordinator() {
                // Workers wait in the barrier far longer than the bound.
                thread::sleep(Duration::from_millis(400));
            }
            comm.barrier()?;
            comm.reduce_sum(1.0, COORDINATOR)
        })
        .unwrap();
    assert_eq!(results[0], Some(4.0));
}
