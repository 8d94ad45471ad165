//! Rank → role table.
//!
//! Every rank runs the same job and looks its duties up here instead of
//! branching on its rank number. A [`Layout`] fills the table for a given
//! group size; each entry says whether the rank computes a partial (and as
//! which worker) and whether it collects the partials of the others.

use pr_core::{ensure, Error, Rank, Result, Size, COORDINATOR};

/// How the ranks of a group are assigned to work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Rank 0 only collects; ranks `1..size` are workers `0..size-1`.
    DedicatedCoordinator,
    /// Every rank is a worker, rank `r` being worker `r`; rank 0 also
    /// collects.
    #[default]
    ParticipatingCoordinator,
}

/// The part a rank plays in a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Aggregates the partial results.
    Coordinator,
    /// Computes a partial result and sends it to the coordinator.
    Worker,
}

/// What one rank does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// The rank's role.
    pub role: Role,
    /// The worker index the rank computes as, if it computes.
    pub worker_index: Option<Size>,
}

impl Assignment {
    /// Whether the rank collects partials.
    pub fn collects(&self) -> bool {
        self.role == Role::Coordinator
    }
}

/// Assignments of every rank of a group, indexed by rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTable {
    assignments: Vec<Assignment>,
}

impl RoleTable {
    /// Fill the table for a group of `size` ranks.
    pub fn new(layout: Layout, size: usize) -> Result<Self> {
        let assignments = match layout {
            Layout::DedicatedCoordinator => {
                ensure!(
                    size >= 2,
                    "a dedicated coordinator needs at least 2 ranks, got {size}"
                );
                std::iter::once(Assignment {
                    role: Role::Coordinator,
                    worker_index: None,
                })
                .chain((1..size).map(|rank| Assignment {
                    role: Role::Worker,
                    worker_index: Some(rank - 1),
                }))
                .collect()
            }
            Layout::ParticipatingCoordinator => {
                ensure!(size >= 1, "a process group needs at least one rank");
                (0..size)
                    .map(|rank| Assignment {
                        role: if rank == COORDINATOR {
                            Role::Coordinator
                        } else {
                            Role::Worker
                        },
                        worker_index: Some(rank),
                    })
                    .collect()
            }
        };
        Ok(Self { assignments })
    }

    /// The assignment of `rank`.
    pub fn assignment(&self, rank: Rank) -> Result<Assignment> {
        self.assignments
            .get(rank)
            .copied()
            .ok_or(Error::InvalidRank {
                rank,
                size: self.assignments.len(),
            })
    }

    /// Number of ranks that compute a partial.
    pub fn num_workers(&self) -> Size {
        self.assignments
            .iter()
            .filter(|a| a.worker_index.is_some())
            .count()
    }

    /// Ranks whose partials the coordinator receives, in ascending order.
    pub fn sources(&self) -> impl Iterator<Item = Rank> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.role == Role::Worker)
            .map(|(rank, _)| rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedicated_layout_matches_three_rank_integral() {
        let table = RoleTable::new(Layout::DedicatedCoordinator, 3).unwrap();
        assert_eq!(table.num_workers(), 2);
        let coord = table.assignment(0).unwrap();
        assert!(coord.collects());
        assert_eq!(coord.worker_index, None);
        assert_eq!(table.assignment(1).unwrap().worker_index, Some(0));
        assert_eq!(table.assignment(2).unwrap().worker_index, Some(1));
        assert_eq!(table.sources().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn participating_layout_puts_everyone_to_work() {
        let table = RoleTable::new(Layout::ParticipatingCoordinator, 4).unwrap();
        assert_eq!(table.num_workers(), 4);
        assert_eq!(table.assignment(0).unwrap().worker_index, Some(0));
        assert!(table.assignment(0).unwrap().collects());
        assert!(!table.assignment(3).unwrap().collects());
        assert_eq!(table.sources().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn degenerate_groups() {
        assert!(RoleTable::new(Layout::DedicatedCoordinator, 1).is_err());
        let solo = RoleTable::new(Layout::ParticipatingCoordinator, 1).unwrap();
        assert_eq!(solo.num_workers(), 1);
        assert_eq!(solo.sources().count(), 0);
        assert_eq!(
            solo.assignment(1),
            Err(Error::InvalidRank { rank: 1, size: 1 })
        );
    }
}
