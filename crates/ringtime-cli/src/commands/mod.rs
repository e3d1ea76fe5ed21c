pub mod config;
pub mod convert;
pub mod simulate;
pub mod slot;

use chrono::{Local, NaiveDate, NaiveTime};
use ringtime_core::{CoreError, Task};
use std::path::Path;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Parse `HH:MM` (or `HH:MM:SS`).
pub fn parse_clock(value: &str) -> Result<NaiveTime, Box<dyn std::error::Error>> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|e| format!("invalid time '{value}': {e}").into())
}

pub fn parse_date(value: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{value}': {e}").into())
}

/// Read a JSON array of tasks, rejecting any that end before they start.
pub fn load_tasks(path: &Path) -> ringtime_core::error::Result<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    for task in &tasks {
        task.validate()?;
    }
    Ok(tasks)
}

/// Day shown on the ring: explicit `--date`, else the first task's day, else today.
pub fn resolve_date(
    explicit: Option<&str>,
    tasks: &[Task],
) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match explicit {
        Some(value) => parse_date(value),
        None => Ok(tasks
            .first()
            .map(|t| t.start_time.date())
            .unwrap_or_else(|| Local::now().date_naive())),
    }
}

/// Load a task file and the day it is shown on.
///
/// Every task must lie on that day; the ring cannot place anything else.
pub fn load_day(
    path: &Path,
    explicit_date: Option<&str>,
) -> Result<(Vec<Task>, NaiveDate), Box<dyn std::error::Error>> {
    let tasks = load_tasks(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let date = resolve_date(explicit_date, &tasks)?;
    for task in &tasks {
        task.ensure_within_day(date)
            .map_err(|e| format!("task {}: {}", task.id, CoreError::from(e)))?;
    }
    Ok((tasks, date))
}
