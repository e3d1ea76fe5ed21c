use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ring::{hour_bucket, Point};
use crate::task::{Task, TaskId};

/// What the active gesture is doing to its task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    EditingStart,
    EditingEnd,
    TranslatingWhole,
}

/// Ephemeral state of one drag gesture.
///
/// Created on drag start, mutated on every drag change and dropped on drag
/// end. Never outlives its gesture and never spans two tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub task_id: TaskId,
    pub kind: DragKind,
    pub initial_pointer_location: Point,
    pub initial_task_start_time: NaiveDateTime,
    /// End time at grab; the resting position restored when a commit
    /// finds no free slot.
    pub initial_task_end_time: NaiveDateTime,
    /// Only throttles tick feedback; never feeds into scheduling.
    pub last_hour_bucket: Option<u32>,
}

impl DragSession {
    pub fn begin(task: &Task, kind: DragKind, pointer: Point) -> Self {
        let tracked = match kind {
            DragKind::EditingEnd => task.end_time,
            DragKind::EditingStart | DragKind::TranslatingWhole => task.start_time,
        };
        Self {
            task_id: task.id.clone(),
            kind,
            initial_pointer_location: pointer,
            initial_task_start_time: task.start_time,
            initial_task_end_time: task.end_time,
            last_hour_bucket: Some(hour_bucket(tracked)),
        }
    }

    /// Record the hour `time` falls into; true when it differs from the last.
    pub fn cross_hour(&mut self, time: NaiveDateTime) -> bool {
        let bucket = hour_bucket(time);
        if self.last_hour_bucket == Some(bucket) {
            return false;
        }
        self.last_hour_bucket = Some(bucket);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn cross_hour_fires_once_per_bucket() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let start = d.and_hms_opt(9, 0, 0).unwrap();
        let task = Task::with_id("a", "a", start, d.and_hms_opt(10, 0, 0).unwrap()).unwrap();
        let mut session = DragSession::begin(&task, DragKind::EditingEnd, Point::default());
        assert_eq!(session.last_hour_bucket, Some(10));

        assert!(!session.cross_hour(d.and_hms_opt(10, 30, 0).unwrap()));
        assert!(session.cross_hour(d.and_hms_opt(11, 5, 0).unwrap()));
        assert!(!session.cross_hour(d.and_hms_opt(11, 50, 0).unwrap()));
        assert!(session.cross_hour(d.and_hms_opt(10, 59, 0).unwrap()));
    }
}
