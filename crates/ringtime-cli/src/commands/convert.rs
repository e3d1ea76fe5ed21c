//! Angle <-> time conversion commands.

use clap::Args;
use ringtime_core::ring::{angle_to_time, time_to_angle};
use ringtime_core::Config;

use super::{parse_clock, parse_date, CliResult};
use chrono::Local;

#[derive(Args)]
pub struct AngleArgs {
    /// Time of day (HH:MM)
    time: String,
    /// Zero position in degrees (default: configured value)
    #[arg(long)]
    zero: Option<f64>,
}

#[derive(Args)]
pub struct TimeArgs {
    /// Ring angle in degrees
    #[arg(allow_negative_numbers = true)]
    degrees: f64,
    /// Zero position in degrees (default: configured value)
    #[arg(long)]
    zero: Option<f64>,
    /// Reference date (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<String>,
}

fn zero_or_configured(zero: Option<f64>) -> f64 {
    zero.unwrap_or_else(|| Config::load_or_default().ring.zero_position)
}

pub fn run_angle(args: AngleArgs) -> CliResult {
    let time = parse_clock(&args.time)?;
    let angle = time_to_angle(time, zero_or_configured(args.zero));
    println!("{angle}");
    Ok(())
}

pub fn run_time(args: TimeArgs) -> CliResult {
    if !args.degrees.is_finite() {
        return Err("angle must be a finite number".into());
    }
    let date = match args.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => Local::now().date_naive(),
    };
    let time = angle_to_time(args.degrees, zero_or_configured(args.zero), date);
    if args.date.is_some() {
        println!("{}", time.format("%Y-%m-%dT%H:%M"));
    } else {
        println!("{}", time.format("%H:%M"));
    }
    Ok(())
}
