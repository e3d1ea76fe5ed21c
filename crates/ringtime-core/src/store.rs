//! In-memory task collection.
//!
//! Keeps tasks in insertion order together with the phase they were last
//! published in. Used by the CLI simulator and by tests; a real host wires
//! its own persistence-backed [`TaskRepository`].

use serde::{Deserialize, Serialize};

use crate::drag::TaskRepository;
use crate::task::{ArcPhase, Task, TaskId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTask {
    #[serde(flatten)]
    pub task: Task,
    #[serde(default)]
    pub phase: ArcPhase,
}

/// Single-writer task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    entries: Vec<StoredTask>,
    revision: u64,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut store = Self::new();
        for task in tasks {
            store.insert(task);
        }
        store
    }

    /// Add or replace a committed task without counting it as a publish.
    pub fn insert(&mut self, task: Task) {
        self.upsert(task, ArcPhase::Committed);
    }

    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.entries.iter().position(|e| &e.task.id == id)?;
        Some(self.entries.remove(index).task)
    }

    pub fn phase(&self, id: &TaskId) -> Option<ArcPhase> {
        self.entries.iter().find(|e| &e.task.id == id).map(|e| e.phase)
    }

    pub fn entries(&self) -> &[StoredTask] {
        &self.entries
    }

    /// Number of publishes received so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn upsert(&mut self, task: Task, phase: ArcPhase) {
        match self.entries.iter_mut().find(|e| e.task.id == task.id) {
            Some(entry) => {
                entry.task = task;
                entry.phase = phase;
            }
            None => self.entries.push(StoredTask { task, phase }),
        }
    }
}

impl TaskRepository for InMemoryTaskStore {
    fn current_tasks(&self) -> Vec<Task> {
        self.entries.iter().map(|e| e.task.clone()).collect()
    }

    fn task(&self, id: &TaskId) -> Option<Task> {
        self.entries
            .iter()
            .find(|e| &e.task.id == id)
            .map(|e| e.task.clone())
    }

    fn publish(&mut self, task: Task, phase: ArcPhase) {
        self.upsert(task, phase);
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: &str, h: u32) -> Task {
        let d = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        Task::with_id(id, id, d.and_hms_opt(h, 0, 0).unwrap(), d.and_hms_opt(h + 1, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn publish_replaces_in_place_and_bumps_revision() {
        let mut store = InMemoryTaskStore::from_tasks([task("a", 8), task("b", 10)]);
        assert_eq!(store.revision(), 0);

        store.publish(task("a", 12), ArcPhase::Preview);
        assert_eq!(store.revision(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.current_tasks()[0], task("a", 12));
        assert_eq!(store.phase(&"a".into()), Some(ArcPhase::Preview));
    }

    #[test]
    fn other_tasks_excluding_drops_only_that_id() {
        let store = InMemoryTaskStore::from_tasks([task("a", 8), task("b", 10), task("c", 12)]);
        let ids: Vec<String> = store
            .other_tasks_excluding(&"b".into())
            .into_iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn remove_returns_task() {
        let mut store = InMemoryTaskStore::from_tasks([task("a", 8)]);
        assert_eq!(store.remove(&"a".into()), Some(task("a", 8)));
        assert!(store.is_empty());
    }
}
