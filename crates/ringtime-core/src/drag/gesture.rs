//! Single entry point for ring gestures.
//!
//! Owns the injected repository and feedback sink and routes each callback
//! to the edge or whole-arc controller. At most one drag is active at a
//! time; a new drag start first ends the previous one so no anchor state
//! leaks between gestures.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::edge::EdgeDragController;
use super::whole_arc::{CommitOutcome, WholeArcDragController};
use super::{DragUpdate, FeedbackSink, TaskRepository};
use crate::ring::{Point, RingConfig, RingContext};
use crate::task::{Boundary, Task, TaskId};

/// Which part of a task the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Start,
    End,
    Whole,
}

impl Handle {
    /// The boundary an edge handle moves, or `None` for the whole arc.
    pub fn boundary(self) -> Option<Boundary> {
        match self {
            Handle::Start => Some(Boundary::Start),
            Handle::End => Some(Boundary::End),
            Handle::Whole => None,
        }
    }
}

/// How a finished gesture left its task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    Edge(Task),
    WholeArc(CommitOutcome),
}

impl DragOutcome {
    pub fn task(&self) -> &Task {
        match self {
            DragOutcome::Edge(task) => task,
            DragOutcome::WholeArc(outcome) => outcome.task(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveDrag {
    Edge,
    WholeArc,
}

pub struct RingGestureController<R, F> {
    repo: R,
    feedback: F,
    edge: EdgeDragController,
    whole_arc: WholeArcDragController,
    active: Option<ActiveDrag>,
}

impl<R, F> RingGestureController<R, F>
where
    R: TaskRepository,
    F: FeedbackSink,
{
    pub fn new(ring: RingContext, repo: R, feedback: F) -> Self {
        Self {
            repo,
            feedback,
            edge: EdgeDragController::new(ring),
            whole_arc: WholeArcDragController::new(ring),
            active: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn ring(&self) -> &RingContext {
        self.edge.ring()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Task owned by the active drag session, if any.
    pub fn active_task(&self) -> Option<&TaskId> {
        match self.active? {
            ActiveDrag::Edge => self.edge.session().map(|s| &s.task_id),
            ActiveDrag::WholeArc => self.whole_arc.session().map(|s| &s.task_id),
        }
    }

    pub fn into_parts(self) -> (R, F) {
        (self.repo, self.feedback)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply new settings (zero position, selected date).
    pub fn set_ring_config(&mut self, config: RingConfig) {
        let ring = RingContext {
            config,
            ..*self.edge.ring()
        };
        self.set_ring(ring);
    }

    pub fn set_ring(&mut self, ring: RingContext) {
        self.edge.set_ring(ring);
        self.whole_arc.set_ring(ring);
    }

    /// Begin a drag on `task_id`. Returns false when the task is unknown.
    pub fn on_drag_start(&mut self, task_id: &TaskId, pointer: Point, handle: Handle) -> bool {
        if self.active.is_some() {
            debug!(task = %task_id, "drag started while another was active; ending it first");
            self.on_drag_ended();
        }

        let started = match handle.boundary() {
            Some(boundary) => self.edge.on_drag_start(task_id, pointer, boundary, &self.repo),
            None => self.whole_arc.on_drag_start(task_id, pointer, &self.repo),
        };
        if started {
            self.active = Some(if handle == Handle::Whole {
                ActiveDrag::WholeArc
            } else {
                ActiveDrag::Edge
            });
        }
        started
    }

    pub fn on_drag_changed(&mut self, pointer: Point) -> DragUpdate {
        match self.active {
            Some(ActiveDrag::Edge) => {
                self.edge
                    .on_drag_changed(pointer, &mut self.repo, &mut self.feedback)
            }
            Some(ActiveDrag::WholeArc) => {
                self.whole_arc
                    .on_drag_changed(pointer, &mut self.repo, &mut self.feedback)
            }
            None => DragUpdate::Ignored,
        }
    }

    /// End (or cancel) the active drag.
    pub fn on_drag_ended(&mut self) -> Option<DragOutcome> {
        match self.active.take()? {
            ActiveDrag::Edge => self
                .edge
                .on_drag_ended(&mut self.repo, &mut self.feedback)
                .map(DragOutcome::Edge),
            ActiveDrag::WholeArc => self
                .whole_arc
                .on_drag_ended(&mut self.repo, &mut self.feedback)
                .map(DragOutcome::WholeArc),
        }
    }
}
