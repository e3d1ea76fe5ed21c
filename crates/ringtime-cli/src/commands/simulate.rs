//! Replay a scripted gesture sequence through the gesture controller.
//!
//! Script format (JSON array):
//!
//! ```json
//! [
//!   { "action": "start", "task": "a", "handle": "whole", "at": "09:30" },
//!   { "action": "move", "angle": 236.5 },
//!   { "action": "end" }
//! ]
//! ```
//!
//! Pointers are given either as a time on the ring (`at`) or as a raw ring
//! angle in degrees (`angle`).

use clap::Args;
use ringtime_core::ring::point_at_angle;
use ringtime_core::store::StoredTask;
use ringtime_core::{
    Config, FeedbackKind, Handle, InMemoryTaskStore, OverlapResolver, Point, RingConfig,
    RingContext, RingGestureController, TaskId, TaskRepository,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{load_day, parse_clock, CliResult};

/// Radius of the virtual ring the script's pointers are placed on.
const RING_RADIUS: f64 = 100.0;

#[derive(Args)]
pub struct SimulateArgs {
    /// JSON file with the day's tasks
    #[arg(long)]
    tasks: PathBuf,
    /// JSON file with the gesture script
    #[arg(long)]
    gestures: PathBuf,
    /// Day shown on the ring (YYYY-MM-DD, default: day of the first task)
    #[arg(long)]
    date: Option<String>,
    /// Zero position in degrees (default: configured value)
    #[arg(long)]
    zero: Option<f64>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PointerSpec {
    at: Option<String>,
    angle: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum GestureStep {
    Start {
        task: String,
        handle: Handle,
        #[serde(flatten)]
        pointer: PointerSpec,
    },
    Move {
        #[serde(flatten)]
        pointer: PointerSpec,
    },
    End,
}

#[derive(Serialize)]
struct SimulationReport {
    tasks: Vec<StoredTask>,
    feedback: Vec<FeedbackKind>,
    conflicts: Vec<(TaskId, TaskId)>,
}

fn resolve_pointer(
    pointer: &PointerSpec,
    ring: &RingContext,
) -> Result<Point, Box<dyn std::error::Error>> {
    match (&pointer.at, pointer.angle) {
        (Some(at), None) => {
            let time = ring.config.selected_date.and_time(parse_clock(at)?);
            Ok(ring.point_for(time, RING_RADIUS))
        }
        (None, Some(angle)) if angle.is_finite() => {
            Ok(point_at_angle(angle, ring.center, RING_RADIUS))
        }
        _ => Err("each pointer needs exactly one of 'at' or a finite 'angle'".into()),
    }
}

pub fn run(args: SimulateArgs) -> CliResult {
    let (tasks, date) = load_day(&args.tasks, args.date.as_deref())?;
    let script: Vec<GestureStep> = serde_json::from_str(
        &std::fs::read_to_string(&args.gestures)
            .map_err(|e| format!("cannot read {}: {e}", args.gestures.display()))?,
    )?;

    let config = Config::load_or_default();
    let ring_config = match args.zero {
        Some(zero) => RingConfig::new(zero, date),
        None => config.ring_config(date),
    };
    let ring = RingContext::new(ring_config, config.rules(), Point::default());
    let store = InMemoryTaskStore::from_tasks(tasks);
    let mut controller = RingGestureController::new(ring, store, Vec::new());

    for (index, step) in script.iter().enumerate() {
        match step {
            GestureStep::Start { task, handle, pointer } => {
                let p = resolve_pointer(pointer, &ring)?;
                if !controller.on_drag_start(&TaskId::from(task.as_str()), p, *handle) {
                    return Err(format!("step {index}: unknown task '{task}'").into());
                }
            }
            GestureStep::Move { pointer } => {
                let update = controller.on_drag_changed(resolve_pointer(pointer, &ring)?);
                tracing::debug!(step = index, ?update, "drag changed");
            }
            GestureStep::End => {
                let outcome = controller.on_drag_ended();
                tracing::debug!(step = index, ?outcome, "drag ended");
            }
        }
    }
    // a script that stops mid-drag is treated as an interrupted gesture
    controller.on_drag_ended();

    let resolver = OverlapResolver::new(&ring.rules);
    let (store, feedback) = controller.into_parts();
    let report = SimulationReport {
        conflicts: resolver.conflicting_pairs(&store.current_tasks()),
        tasks: store.entries().to_vec(),
        feedback,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &report.tasks {
            println!(
                "{}\t{} - {}\t{}",
                entry.task.id,
                entry.task.start_time.format("%H:%M"),
                entry.task.end_time.format("%H:%M"),
                entry.task.title
            );
        }
        let cues: Vec<&str> = report.feedback.iter().map(|k| k.as_str()).collect();
        println!("feedback: {}", cues.join(" "));
        if !report.conflicts.is_empty() {
            println!("conflicts: {}", report.conflicts.len());
        }
    }
    Ok(())
}
