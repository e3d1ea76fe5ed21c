//! Overlap detection and conflict resolution between tasks.
//!
//! Two ranges only conflict when they share more than the overlap tolerance,
//! so tasks that touch at a boundary (09:00 end, 09:00 start) or differ by
//! rounding noise never register as conflicting.
//!
//! Resolution is always local:
//! - edge drags nudge the adjacent boundary of the neighbours they run into;
//! - whole-arc drags relocate the dragged task itself on commit, via a
//!   quantized linear scan for a free slot.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::ring::{latest_instant, meets_minimum_duration, start_of_day, RingRules};
use crate::task::{Boundary, Task, TaskId, TimeRange};

/// Whether `a` and `b` share more than `tolerance` of time.
///
/// Symmetric in its arguments.
pub fn overlaps(a: TimeRange, b: TimeRange, tolerance: Duration) -> bool {
    a.start + tolerance < b.end && a.end - tolerance > b.start
}

/// Result of adjusting neighbours after an edge move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NeighborAdjustment {
    /// Neighbours with their nudged boundary; empty when nothing collided.
    Adjusted(Vec<Task>),
    /// Nudging this neighbour would push it below the minimum duration.
    Blocked { neighbor: TaskId },
}

/// Result of the collision pass that runs when a whole-arc drag commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
    /// No collision; the live position stands.
    Unchanged,
    /// The task moved to the first free slot at or after its position.
    Relocated(Task),
    /// No free slot exists later on the day.
    NoFreeSlot,
}

/// Overlap checks and conflict resolution parameterised by [`RingRules`].
#[derive(Debug, Clone, Copy)]
pub struct OverlapResolver {
    tolerance: Duration,
    quantum: Duration,
    min_duration: Duration,
}

impl OverlapResolver {
    pub fn new(rules: &RingRules) -> Self {
        Self {
            tolerance: rules.overlap_tolerance,
            quantum: rules.slot_quantum,
            min_duration: rules.min_duration,
        }
    }

    pub fn tolerance(&self) -> Duration {
        self.tolerance
    }

    pub fn quantum(&self) -> Duration {
        self.quantum
    }

    /// Whether two distinct tasks overlap. A task never conflicts with itself.
    pub fn conflicts(&self, a: &Task, b: &Task) -> bool {
        a.id != b.id && overlaps(a.range(), b.range(), self.tolerance)
    }

    /// First task in `others` that conflicts with `task`.
    pub fn first_conflict<'a>(&self, task: &Task, others: &'a [Task]) -> Option<&'a Task> {
        others.iter().find(|other| self.conflicts(task, other))
    }

    /// Every conflicting pair in `tasks`, by id.
    pub fn conflicting_pairs(&self, tasks: &[Task]) -> Vec<(TaskId, TaskId)> {
        let mut pairs = Vec::new();
        for (i, a) in tasks.iter().enumerate() {
            for b in &tasks[i + 1..] {
                if self.conflicts(a, b) {
                    pairs.push((a.id.clone(), b.id.clone()));
                }
            }
        }
        pairs
    }

    /// First start at or after `preferred_start` where `duration` fits.
    ///
    /// Candidates are scanned every quantum from midnight of `day`. A
    /// candidate fits when its end stays within the day and it overlaps no
    /// task in `others` other than `excluding`. Bounded by
    /// `1440 / quantum` iterations.
    pub fn find_free_slot(
        &self,
        duration: Duration,
        preferred_start: NaiveDateTime,
        day: NaiveDate,
        excluding: &TaskId,
        others: &[Task],
    ) -> Option<NaiveDateTime> {
        if self.quantum <= Duration::zero() {
            return None;
        }

        let latest = latest_instant(day);
        let mut candidate = start_of_day(day);
        while candidate + duration <= latest {
            if candidate >= preferred_start {
                let range = TimeRange::new(candidate, candidate + duration);
                let blocked = others
                    .iter()
                    .filter(|other| &other.id != excluding)
                    .any(|other| overlaps(range, other.range(), self.tolerance));
                if !blocked {
                    return Some(candidate);
                }
            }
            candidate += self.quantum;
        }
        None
    }

    /// Nudge the neighbours that `moved` now runs into.
    ///
    /// With [`Boundary::End`] moving, each overlapping task that starts at or
    /// after `moved` has its start pushed to `moved.end_time`. With
    /// [`Boundary::Start`] moving, each overlapping task that ends at or
    /// before `moved` has its end pulled to `moved.start_time`. Tasks on the
    /// stationary side are left alone.
    pub fn adjust_neighbors_on_edge_move(
        &self,
        moved: &Task,
        boundary: Boundary,
        others: &[Task],
    ) -> NeighborAdjustment {
        let mut adjusted = Vec::new();
        for other in others {
            if !self.conflicts(moved, other) {
                continue;
            }
            let nudged = match boundary {
                Boundary::End if other.start_time >= moved.start_time => {
                    other.with_times(moved.end_time, other.end_time)
                }
                Boundary::Start if other.end_time <= moved.end_time => {
                    other.with_times(other.start_time, moved.start_time)
                }
                _ => continue,
            };
            if !meets_minimum_duration(nudged.start_time, nudged.end_time, self.min_duration) {
                debug!(
                    task = %moved.id,
                    neighbor = %other.id,
                    "neighbor adjustment blocked by minimum duration"
                );
                return NeighborAdjustment::Blocked {
                    neighbor: other.id.clone(),
                };
            }
            adjusted.push(nudged);
        }
        NeighborAdjustment::Adjusted(adjusted)
    }

    /// Resolve a collision left behind by a whole-arc drag.
    ///
    /// Only the moved task is repositioned; its duration is preserved and the
    /// search starts at its current, possibly colliding, start.
    pub fn relocate_on_whole_arc_commit(
        &self,
        moved: &Task,
        others: &[Task],
        day: NaiveDate,
    ) -> Relocation {
        let Some(conflict) = self.first_conflict(moved, others) else {
            return Relocation::Unchanged;
        };
        debug!(task = %moved.id, conflict = %conflict.id, "whole-arc commit collides");

        match self.find_free_slot(moved.duration(), moved.start_time, day, &moved.id, others) {
            Some(start) => Relocation::Relocated(moved.shifted_to(start)),
            None => Relocation::NoFreeSlot,
        }
    }
}

impl Default for OverlapResolver {
    fn default() -> Self {
        Self::new(&RingRules::default())
    }
}
