//! Task types placed on the ring.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::ring::within_day;

/// Stable unique identifier of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One boundary of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Start,
    End,
}

/// UI-facing phase of a published task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcPhase {
    /// At rest; guaranteed not to overlap any other committed task.
    #[default]
    Committed,
    /// Being dragged; may transiently overlap other tasks.
    Preview,
}

/// Half-open wall-clock interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A time-boxed task on the ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Display-only category reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Task {
    /// Create a task with a generated id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeRange`] unless `end > start`.
    pub fn new(
        title: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        Self::with_id(TaskId::generate(), title, start_time, end_time)
    }

    /// Create a task with a caller-provided id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeRange`] unless `end > start`.
    pub fn with_id(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        let task = Self {
            id: id.into(),
            title: title.into(),
            start_time,
            end_time,
            category: None,
        };
        task.validate()?;
        Ok(task)
    }

    /// Check that the task ends after it starts.
    ///
    /// Deserialized tasks bypass the constructors, so anything read from
    /// outside goes through this first.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeRange`] unless `end > start`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end_time <= self.start_time {
            return Err(ValidationError::InvalidTimeRange {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }

    /// Check that the task sits between 00:00 and 23:59 of `day`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutsideDay`] when either boundary falls
    /// off the day.
    pub fn ensure_within_day(&self, day: NaiveDate) -> Result<(), ValidationError> {
        if !within_day(self.start_time, self.end_time, day) {
            return Err(ValidationError::OutsideDay {
                start: self.start_time,
                end: self.end_time,
                day,
            });
        }
        Ok(())
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    /// Copy of this task with both boundaries replaced.
    pub fn with_times(&self, start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            end_time,
            ..self.clone()
        }
    }

    /// Copy of this task moved to `start_time`, keeping its duration.
    pub fn shifted_to(&self, start_time: NaiveDateTime) -> Self {
        self.with_times(start_time, start_time + self.duration())
    }

    pub fn boundary(&self, boundary: Boundary) -> NaiveDateTime {
        match boundary {
            Boundary::Start => self.start_time,
            Boundary::End => self.end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn new_rejects_inverted_range() {
        let err = Task::new("bad", at(10, 0), at(9, 0)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidTimeRange {
                start: at(10, 0),
                end: at(9, 0)
            }
        );
        assert!(Task::new("empty", at(9, 0), at(9, 0)).is_err());
    }

    #[test]
    fn validate_catches_deserialized_inverted_range() {
        let task: Task = serde_json::from_value(serde_json::json!({
            "id": "x",
            "start_time": "2026-05-01T10:00:00",
            "end_time": "2026-05-01T09:00:00",
        }))
        .unwrap();
        assert!(matches!(
            task.validate(),
            Err(ValidationError::InvalidTimeRange { .. })
        ));
    }

    #[test]
    fn ensure_within_day_rejects_other_dates() {
        let task = Task::with_id("a", "Plan", at(9, 0), at(10, 0)).unwrap();
        let day = at(0, 0).date();
        assert!(task.ensure_within_day(day).is_ok());

        let next = day.succ_opt().unwrap();
        assert_eq!(
            task.ensure_within_day(next),
            Err(ValidationError::OutsideDay {
                start: at(9, 0),
                end: at(10, 0),
                day: next,
            })
        );

        let spanning = task.with_times(at(23, 0), at(23, 30) + Duration::hours(1));
        assert!(spanning.ensure_within_day(day).is_err());
    }

    #[test]
    fn shifted_to_preserves_duration() {
        let task = Task::with_id("a", "Write", at(9, 0), at(10, 30)).unwrap();
        let moved = task.shifted_to(at(13, 15));
        assert_eq!(moved.end_time, at(14, 45));
        assert_eq!(moved.duration(), task.duration());
        assert_eq!(moved.id, task.id);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(TaskId::generate(), TaskId::generate());
    }

    #[test]
    fn task_json_uses_plain_id_and_wall_clock_times() {
        let task = Task::with_id("a", "Read", at(7, 0), at(7, 45))
            .unwrap()
            .with_category("study");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["start_time"], "2026-05-01T07:00:00");
        assert_eq!(json["category"], "study");
        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }
}
