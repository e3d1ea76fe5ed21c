//! Translating a whole task around the ring.
//!
//! Two phases:
//! - **live**: the task follows the pointer's angular delta from where it was
//!   grabbed, clamped to the day and published without any collision check,
//!   so it may transiently overlap its neighbours;
//! - **commit**: on drag end the final position is checked once against every
//!   other task and, if it collides, the dragged task is relocated to the
//!   next free slot.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::session::{DragKind, DragSession};
use super::{DragUpdate, FeedbackKind, FeedbackSink, RejectReason, TaskRepository};
use crate::overlap::{OverlapResolver, Relocation};
use crate::ring::{
    clamp_interval_start, pointer_angle, signed_angle_delta, Point, RingContext,
    MINUTES_PER_DEGREE,
};
use crate::task::{ArcPhase, Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WholeArcState {
    Idle,
    Translating,
}

/// How a whole-arc drag came to rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// No collision; the live position became final.
    Kept(Task),
    /// Collided and snapped forward to a free slot.
    Relocated(Task),
    /// Collided with no free slot left; returned to where it was grabbed.
    Restored(Task),
}

impl CommitOutcome {
    pub fn task(&self) -> &Task {
        match self {
            CommitOutcome::Kept(task)
            | CommitOutcome::Relocated(task)
            | CommitOutcome::Restored(task) => task,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WholeArcDragController {
    ring: RingContext,
    resolver: OverlapResolver,
    session: Option<DragSession>,
}

impl WholeArcDragController {
    pub fn new(ring: RingContext) -> Self {
        Self {
            ring,
            resolver: OverlapResolver::new(&ring.rules),
            session: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> WholeArcState {
        if self.session.is_some() {
            WholeArcState::Translating
        } else {
            WholeArcState::Idle
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

    /// Anchor the drag at `pointer` so later motion is applied as a relative
    /// delta and the task does not jump under the finger.
    pub fn on_drag_start<R: TaskRepository>(
        &mut self,
        task_id: &TaskId,
        pointer: Point,
        repo: &R,
    ) -> bool {
        let Some(task) = repo.task(task_id) else {
            debug!(task = %task_id, "whole-arc drag on unknown task ignored");
            self.session = None;
            return false;
        };
        if let Err(e) = task.ensure_within_day(self.ring.config.selected_date) {
            debug!(task = %task_id, error = %e, "whole-arc drag on task off the ring ignored");
            self.session = None;
            return false;
        }
        self.session = Some(DragSession::begin(&task, DragKind::TranslatingWhole, pointer));
        true
    }

    /// Live phase: follow the pointer without collision checks.
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
        if session.kind != DragKind::TranslatingWhole {
            return DragUpdate::Ignored;
        }
        let Some(task) = repo.task(&session.task_id) else {
            return DragUpdate::Rejected(RejectReason::TaskMissing);
        };

        let initial_angle = pointer_angle(session.initial_pointer_location, self.ring.center);
        let current_angle = pointer_angle(pointer, self.ring.center);
        let delta = signed_angle_delta(current_angle, initial_angle);
        let offset = Duration::minutes((delta * MINUTES_PER_DEGREE).round() as i64);

        let duration = session.initial_task_end_time - session.initial_task_start_time;
        let start = clamp_interval_start(
            session.initial_task_start_time + offset,
            duration,
            self.ring.config.selected_date,
        );
        if start == task.start_time && start + duration == task.end_time {
            return DragUpdate::Unchanged;
        }

        let moved = task.with_times(start, start + duration);
        repo.publish(moved.clone(), ArcPhase::Preview);
        if session.cross_hour(start) {
            feedback.emit_feedback(FeedbackKind::Tick);
        }
        trace!(task = %moved.id, start = %moved.start_time, delta, "whole-arc preview");

        DragUpdate::Published {
            task: moved,
            neighbors: Vec::new(),
        }
    }

    /// Commit phase: resolve any collision left by the live phase.
    ///
    /// Also the cleanup path for interrupted gestures. Returns `None` when no
    /// drag was active or the task vanished.
    pub fn on_drag_ended<R, F>(&mut self, repo: &mut R, feedback: &mut F) -> Option<CommitOutcome>
    where
        R: TaskRepository,
        F: FeedbackSink,
    {
        let session = self.session.take()?;
        let Some(task) = repo.task(&session.task_id) else {
            debug!(task = %session.task_id, "whole-arc task vanished before commit");
            return None;
        };
        let others = repo.other_tasks_excluding(&task.id);

        let outcome = match self
            .resolver
            .relocate_on_whole_arc_commit(&task, &others, self.ring.config.selected_date)
        {
            Relocation::Unchanged => CommitOutcome::Kept(task),
            Relocation::Relocated(relocated) => {
                info!(
                    task = %relocated.id,
                    from = %task.start_time,
                    to = %relocated.start_time,
                    "whole-arc commit relocated task"
                );
                CommitOutcome::Relocated(relocated)
            }
            Relocation::NoFreeSlot => {
                let restored = task.with_times(
                    session.initial_task_start_time,
                    session.initial_task_end_time,
                );
                info!(
                    task = %restored.id,
                    start = %restored.start_time,
                    "no free slot; restoring grab position"
                );
                CommitOutcome::Restored(restored)
            }
        };

        repo.publish(outcome.task().clone(), ArcPhase::Committed);
        feedback.emit_feedback(match &outcome {
            CommitOutcome::Kept(_) => FeedbackKind::Soft,
            CommitOutcome::Relocated(_) | CommitOutcome::Restored(_) => FeedbackKind::Snap,
        });
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::{RingConfig, RingRules};
    use crate::store::InMemoryTaskStore;
    use chrono::{NaiveDate, NaiveDateTime};

    const RADIUS: f64 = 100.0;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn ring() -> RingContext {
        RingContext::new(
            RingConfig::new(0.0, day()),
            RingRules::default(),
            Point::new(200.0, 200.0),
        )
    }

    fn store(tasks: &[(&str, NaiveDateTime, NaiveDateTime)]) -> InMemoryTaskStore {
        InMemoryTaskStore::from_tasks(
            tasks
                .iter()
                .map(|(id, s, e)| Task::with_id(*id, *id, *s, *e).unwrap()),
        )
    }

    fn rotate(p: Point, degrees: f64) -> Point {
        let r = ring();
        let angle = pointer_angle(p, r.center) + degrees;
        crate::ring::point_at_angle(angle, r.center, RADIUS)
    }

    #[test]
    fn grab_anywhere_does_not_jump() {
        let mut store = store(&[("a", at(9, 0), at(10, 0))]);
        let mut ctl = WholeArcDragController::new(ring());
        let grab = ring().point_for(at(9, 40), RADIUS);
        ctl.on_drag_start(&"a".into(), grab, &store);

        assert_eq!(ctl.on_drag_changed(grab, &mut store, &mut ()), DragUpdate::Unchanged);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn task_on_another_day_is_not_grabbed() {
        let prev = day().pred_opt().unwrap();
        let mut store = store(&[(
            "a",
            prev.and_hms_opt(9, 0, 0).unwrap(),
            prev.and_hms_opt(10, 0, 0).unwrap(),
        )]);
        let mut ctl = WholeArcDragController::new(ring());
        let grab = ring().point_for(at(9, 30), RADIUS);

        assert!(!ctl.on_drag_start(&"a".into(), grab, &store));
        assert_eq!(ctl.state(), WholeArcState::Idle);
        assert_eq!(
            ctl.on_drag_changed(rotate(grab, 4.0), &mut store, &mut ()),
            DragUpdate::Ignored
        );
        assert_eq!(store.task(&"a".into()).unwrap().start_time, prev.and_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn four_degrees_is_sixteen_minutes() {
        let mut store = store(&[("a", at(9, 0), at(10, 0))]);
        let mut ctl = WholeArcDragController::new(ring());
        let grab = ring().point_for(at(9, 30), RADIUS);
        ctl.on_drag_start(&"a".into(), grab, &store);

        ctl.on_drag_changed(rotate(grab, 4.0), &mut store, &mut ());
        let a = store.task(&"a".into()).unwrap();
        assert_eq!((a.start_time, a.end_time), (at(9, 16), at(10, 16)));
        assert_eq!(store.phase(&"a".into()), Some(ArcPhase::Preview));
    }

    #[test]
    fn live_phase_allows_overlap() {
        let mut store = store(&[("a", at(9, 0), at(10, 0)), ("b", at(10, 0), at(11, 0))]);
        let mut ctl = WholeArcDragController::new(ring());
        let grab = ring().point_for(at(9, 30), RADIUS);
        ctl.on_drag_start(&"a".into(), grab, &store);

        ctl.on_drag_changed(rotate(grab, 7.5), &mut store, &mut ());
        let a = store.task(&"a".into()).unwrap();
        assert_eq!(a.start_time, at(9, 30));
        assert_eq!(store.task(&"b".into()).unwrap().start_time, at(10, 0));
    }

    #[test]
    fn clamps_to_day_end() {
        let mut store = store(&[("a", at(22, 0), at(23, 0))]);
        let mut ctl = WholeArcDragController::new(ring());
        let grab = ring().point_for(at(22, 30), RADIUS);
        ctl.on_drag_start(&"a".into(), grab, &store);

        ctl.on_drag_changed(rotate(grab, 30.0), &mut store, &mut ());
        let a = store.task(&"a".into()).unwrap();
        assert_eq!((a.start_time, a.end_time), (at(22, 59), at(23, 59)));
    }

    #[test]
    fn clamps_to_day_start() {
        let mut store = store(&[("a", at(1, 0), at(2, 0))]);
        let mut ctl = WholeArcDragController::new(ring());
        let grab = ring().point_for(at(1, 30), RADIUS);
        ctl.on_drag_start(&"a".into(), grab, &store);

        ctl.on_drag_changed(rotate(grab, -45.0), &mut store, &mut ());
        let a = store.task(&"a".into()).unwrap();
        assert_eq!((a.start_time, a.end_time), (at(0, 0), at(1, 0)));
    }

    #[test]
    fn commit_relocates_colliding_task() {
        let mut store = store(&[("a", at(9, 0), at(10, 0)), ("b", at(10, 0), at(11, 0))]);
        let mut feedback = Vec::new();
        let mut ctl = WholeArcDragController::new(ring());
        let grab = ring().point_for(at(9, 30), RADIUS);
        ctl.on_drag_start(&"a".into(), grab, &store);
        ctl.on_drag_changed(rotate(grab, 4.0), &mut store, &mut feedback);

        let outcome = ctl.on_drag_ended(&mut store, &mut feedback).unwrap();
        let expected = Task::with_id("a", "a", at(11, 0), at(12, 0)).unwrap();
        assert_eq!(outcome, CommitOutcome::Relocated(expected.clone()));
        assert_eq!(store.task(&"a".into()), Some(expected));
        assert_eq!(store.phase(&"a".into()), Some(ArcPhase::Committed));
        assert_eq!(feedback.last(), Some(&FeedbackKind::Snap));
        assert_eq!(ctl.state(), WholeArcState::Idle);
    }

    #[test]
    fn commit_keeps_free_position() {
        let mut store = store(&[("a", at(9, 0), at(10, 0)), ("b", at(12, 0), at(13, 0))]);
        let mut feedback = Vec::new();
        let mut ctl = WholeArcDragController::new(ring());
        let grab = ring().point_for(at(9, 30), RADIUS);
        ctl.on_drag_start(&"a".into(), grab, &store);
        ctl.on_drag_changed(rotate(grab, 4.0), &mut store, &mut feedback);

        let outcome = ctl.on_drag_ended(&mut store, &mut feedback).unwrap();
        assert_eq!(outcome.task().start_time, at(9, 16));
        assert!(matches!(outcome, CommitOutcome::Kept(_)));
        assert_eq!(feedback.last(), Some(&FeedbackKind::Soft));
    }

    #[test]
    fn commit_without_free_slot_restores_grab_position() {
        let mut store = store(&[("a", at(20, 0), at(21, 0)), ("b", at(21, 0), at(23, 59))]);
        let mut ctl = WholeArcDragController::new(ring());
        let grab = ring().point_for(at(20, 30), RADIUS);
        ctl.on_drag_start(&"a".into(), grab, &store);
        ctl.on_drag_changed(rotate(grab, 30.0), &mut store, &mut ());

        let outcome = ctl.on_drag_ended(&mut store, &mut ()).unwrap();
        let restored = Task::with_id("a", "a", at(20, 0), at(21, 0)).unwrap();
        assert_eq!(outcome, CommitOutcome::Restored(restored.clone()));
        assert_eq!(store.task(&"a".into()), Some(restored));
    }

    #[test]
    fn hour_tick_follows_start_time() {
        let mut store = store(&[("a", at(9, 0), at(10, 0))]);
        let mut feedback = Vec::new();
        let mut ctl = WholeArcDragController::new(ring());
        let grab = ring().point_for(at(9, 30), RADIUS);
        ctl.on_drag_start(&"a".into(), grab, &store);

        ctl.on_drag_changed(rotate(grab, 5.0), &mut store, &mut feedback);
        assert!(feedback.is_empty());
        ctl.on_drag_changed(rotate(grab, 16.0), &mut store, &mut feedback);
        assert_eq!(feedback, vec![FeedbackKind::Tick]);
    }
}
