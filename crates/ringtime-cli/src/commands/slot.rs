use chrono::Duration;
use clap::Args;
use ringtime_core::ring::start_of_day;
use ringtime_core::{Config, OverlapResolver, TaskId};
use std::path::PathBuf;

use super::{load_day, parse_clock, CliResult};

#[derive(Args)]
pub struct SlotArgs {
    /// JSON file with the day's tasks
    #[arg(long)]
    tasks: PathBuf,
    /// Required duration in minutes
    #[arg(long)]
    duration: u32,
    /// Earliest acceptable start (HH:MM, default: 00:00)
    #[arg(long)]
    after: Option<String>,
    /// Day to search (YYYY-MM-DD, default: day of the first task)
    #[arg(long)]
    date: Option<String>,
    /// Task to ignore while searching (e.g. the one being moved)
    #[arg(long)]
    exclude: Option<String>,
}

pub fn run(args: SlotArgs) -> CliResult {
    if args.duration == 0 {
        return Err("duration must be at least one minute".into());
    }
    let (tasks, date) = load_day(&args.tasks, args.date.as_deref())?;
    let preferred = match args.after.as_deref() {
        Some(value) => date.and_time(parse_clock(value)?),
        None => start_of_day(date),
    };

    let resolver = OverlapResolver::new(&Config::load_or_default().rules());
    let excluding = TaskId::from(args.exclude.unwrap_or_default());
    let duration = Duration::minutes(i64::from(args.duration));

    match resolver.find_free_slot(duration, preferred, date, &excluding, &tasks) {
        Some(start) => {
            println!(
                "{} - {}",
                start.format("%H:%M"),
                (start + duration).format("%H:%M")
            );
            Ok(())
        }
        None => Err(format!(
            "no free {}-minute slot after {}",
            args.duration,
            preferred.format("%H:%M")
        )
        .into()),
    }
}
