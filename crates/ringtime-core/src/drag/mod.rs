//! Drag gestures on the ring.
//!
//! ## State Machines
//!
//! ```text
//! Edge:      Idle -> DraggingStart | DraggingEnd -> Idle
//! Whole arc: Idle -> Translating -> (Committing) -> Idle
//! ```
//!
//! Controllers never reach for shared state: the task collection and the
//! feedback channel are passed in through [`TaskRepository`] and
//! [`FeedbackSink`]. Every callback runs synchronously and either publishes a
//! fully computed task or leaves the collection untouched.

mod edge;
mod feedback;
mod gesture;
mod session;
mod whole_arc;

use serde::{Deserialize, Serialize};

use crate::task::{ArcPhase, Task, TaskId};

pub use edge::{EdgeDragController, EdgeDragState};
pub use feedback::{FeedbackKind, FeedbackSink, TracingFeedback};
pub use gesture::{DragOutcome, Handle, RingGestureController};
pub use session::{DragKind, DragSession};
pub use whole_arc::{CommitOutcome, WholeArcDragController, WholeArcState};

/// Read/write access to the task collection.
pub trait TaskRepository {
    /// Snapshot of every task.
    fn current_tasks(&self) -> Vec<Task>;

    fn task(&self, id: &TaskId) -> Option<Task> {
        self.current_tasks().into_iter().find(|t| &t.id == id)
    }

    /// Every task except `id`.
    fn other_tasks_excluding(&self, id: &TaskId) -> Vec<Task> {
        self.current_tasks()
            .into_iter()
            .filter(|t| &t.id != id)
            .collect()
    }

    /// Commit a task mutation. Persisting it is the implementor's concern.
    fn publish(&mut self, task: Task, phase: ArcPhase);
}

/// Why a drag update was discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// The candidate would be shorter than the minimum duration.
    BelowMinimumDuration,
    /// A neighbour would be squeezed below the minimum duration.
    NeighborBlocked { neighbor: TaskId },
    /// The dragged task disappeared from the repository mid-drag.
    TaskMissing,
}

/// Result of one drag-change callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragUpdate {
    /// The task was published, together with any nudged neighbours.
    Published { task: Task, neighbors: Vec<Task> },
    /// The pointer moved but the task's times did not change.
    Unchanged,
    /// The candidate was discarded; the previous state stands.
    Rejected(RejectReason),
    /// No drag session is active.
    Ignored,
}

impl DragUpdate {
    pub fn is_published(&self) -> bool {
        matches!(self, DragUpdate::Published { .. })
    }
}
