//! Dragging a single boundary of a task.
//!
//! The moving boundary follows the pointer; the other one stays fixed.
//! Candidates that would break the minimum duration, or squeeze a
//! neighbour below it, are dropped, so the boundary sticks at the limit
//! while the pointer keeps moving. Neighbour adjustment runs on every
//! accepted change, so drag end needs no extra collision pass.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::session::{DragKind, DragSession};
use super::{DragUpdate, FeedbackKind, FeedbackSink, RejectReason, TaskRepository};
use crate::overlap::{NeighborAdjustment, OverlapResolver};
use crate::ring::{meets_minimum_duration, Point, RingContext};
use crate::task::{ArcPhase, Boundary, Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDragState {
    Idle,
    DraggingStart,
    DraggingEnd,
}

#[derive(Debug, Clone)]
pub struct EdgeDragController {
    ring: RingContext,
    resolver: OverlapResolver,
    session: Option<DragSession>,
}

impl EdgeDragController {
    pub fn new(ring: RingContext) -> Self {
        Self {
            ring,
            resolver: OverlapResolver::new(&ring.rules),
            session: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> EdgeDragState {
        match self.session.as_ref().map(|s| s.kind) {
            Some(DragKind::EditingStart) => EdgeDragState::DraggingStart,
            Some(DragKind::EditingEnd) => EdgeDragState::DraggingEnd,
            _ => EdgeDragState::Idle,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn ring(&self) -> &RingContext {
        &self.ring
    }

    /// Swap the ring context; takes effect on the next drag change.
    pub fn set_ring(&mut self, ring: RingContext) {
        self.ring = ring;
        self.resolver = OverlapResolver::new(&ring.rules);
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Grab `boundary` of `task_id`. Nothing is published yet.
    ///
    /// Returns false (and stays idle) when the task is unknown or does not
    /// lie on the ring's selected day.
    pub fn on_drag_start<R: TaskRepository>(
        &mut self,
        task_id: &TaskId,
        pointer: Point,
        boundary: Boundary,
        repo: &R,
    ) -> bool {
        let Some(task) = repo.task(task_id) else {
            debug!(task = %task_id, "edge drag on unknown task ignored");
            self.session = None;
            return false;
        };
        if let Err(e) = task.ensure_within_day(self.ring.config.selected_date) {
            debug!(task = %task_id, error = %e, "edge drag on task off the ring ignored");
            self.session = None;
            return false;
        }
        let kind = match boundary {
            Boundary::Start => DragKind::EditingStart,
            Boundary::End => DragKind::EditingEnd,
        };
        self.session = Some(DragSession::begin(&task, kind, pointer));
        true
    }

    /// Move the grabbed boundary under `pointer`.
    pub fn on_drag_changed<R, F>(
        &mut self,
        pointer: Point,
        repo: &mut R,
        feedback: &mut F,
    ) -> DragUpdate
    where
        R: TaskRepository,
        F: FeedbackSink,
    {
        let Some(session) = self.session.as_mut() else {
            return DragUpdate::Ignored;
        };
        let boundary = match session.kind {
            DragKind::EditingStart => Boundary::Start,
            DragKind::EditingEnd => Boundary::End,
            DragKind::TranslatingWhole => return DragUpdate::Ignored,
        };
        let Some(task) = repo.task(&session.task_id) else {
            return DragUpdate::Rejected(RejectReason::TaskMissing);
        };

        let time = self.ring.time_under(pointer);
        let (start, end) = match boundary {
            Boundary::Start => (time, task.end_time),
            Boundary::End => (task.start_time, time),
        };
        if !meets_minimum_duration(start, end, self.ring.rules.min_duration) {
            trace!(task = %task.id, %start, %end, "edge candidate below minimum duration");
            return DragUpdate::Rejected(RejectReason::BelowMinimumDuration);
        }
        if start == task.start_time && end == task.end_time {
            return DragUpdate::Unchanged;
        }

        let candidate = task.with_times(start, end);
        let others = repo.other_tasks_excluding(&task.id);
        let adjustment = self
            .resolver
            .adjust_neighbors_on_edge_move(&candidate, boundary, &others);
        let neighbors = match adjustment {
            NeighborAdjustment::Adjusted(neighbors) => neighbors,
            NeighborAdjustment::Blocked { neighbor } => {
                return DragUpdate::Rejected(RejectReason::NeighborBlocked { neighbor });
            }
        };

        repo.publish(candidate.clone(), ArcPhase::Preview);
        for neighbor in &neighbors {
            repo.publish(neighbor.clone(), ArcPhase::Committed);
        }
        if session.cross_hour(time) {
            feedback.emit_feedback(FeedbackKind::Tick);
        }
        trace!(
            task = %candidate.id,
            start = %candidate.start_time,
            end = %candidate.end_time,
            "edge drag published"
        );

        DragUpdate::Published {
            task: candidate,
            neighbors,
        }
    }

    /// Finish the gesture: commit the preview and tear the session down.
    ///
    /// Also the cleanup path for interrupted gestures. Returns the final
    /// task, or `None` when no drag was active.
    pub fn on_drag_ended<R, F>(&mut self, repo: &mut R, feedback: &mut F) -> Option<Task>
    where
        R: TaskRepository,
        F: FeedbackSink,
    {
        let session = self.session.take()?;
        let task = repo.task(&session.task_id);
        if let Some(task) = &task {
            repo.publish(task.clone(), ArcPhase::Committed);
            debug!(
                task = %task.id,
                start = %task.start_time,
                end = %task.end_time,
                "edge drag ended"
            );
        }
        feedback.emit_feedback(FeedbackKind::Soft);
        task
    }
}
