//! The 24-hour ring: geometry, configuration and scheduling rules.

pub mod angle;
pub mod constraints;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub use angle::{
    angle_to_minutes, angle_to_time, hour_bucket, normalize_degrees, normalize_minutes,
    point_at_angle, pointer_angle, signed_angle_delta, time_to_angle, Point, DEGREES_PER_MINUTE,
    MINUTES_PER_DAY, MINUTES_PER_DEGREE,
};
pub use constraints::{
    clamp_interval_start, clamp_to_day, end_of_day, latest_instant, meets_minimum_duration,
    start_of_day, within_day,
};

/// Session-scoped ring configuration, read-only to the scheduling core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    /// Rotational offset in degrees, `[0, 360)`.
    pub zero_position: f64,
    /// Day whose 24 hours the ring represents.
    pub selected_date: NaiveDate,
}

impl RingConfig {
    pub fn new(zero_position: f64, selected_date: NaiveDate) -> Self {
        Self {
            zero_position: normalize_degrees(zero_position),
            selected_date,
        }
    }

    /// Angle of `time` on this ring.
    pub fn angle_of(&self, time: NaiveDateTime) -> f64 {
        time_to_angle(time.time(), self.zero_position)
    }

    /// Wall-clock time on the selected date at `degrees`.
    pub fn time_at(&self, degrees: f64) -> NaiveDateTime {
        angle_to_time(degrees, self.zero_position, self.selected_date)
    }

    pub fn day_start(&self) -> NaiveDateTime {
        start_of_day(self.selected_date)
    }

    pub fn latest_instant(&self) -> NaiveDateTime {
        latest_instant(self.selected_date)
    }
}

/// Tunable scheduling constants.
///
/// Only the UX feel depends on the exact values; every invariant holds for
/// any positive quantum and any tolerance shorter than the minimum duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingRules {
    /// Shortest duration a committed task may have.
    pub min_duration: Duration,
    /// Near-miss buffer below which two ranges do not count as overlapping.
    pub overlap_tolerance: Duration,
    /// Step between candidate starts in the free-slot search.
    pub slot_quantum: Duration,
}

impl Default for RingRules {
    fn default() -> Self {
        Self {
            min_duration: Duration::minutes(5),
            overlap_tolerance: Duration::seconds(30),
            slot_quantum: Duration::minutes(15),
        }
    }
}

/// Everything a drag controller needs to know about the ring it operates on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingContext {
    pub config: RingConfig,
    pub rules: RingRules,
    /// Screen location of the ring's center.
    pub center: Point,
}

impl RingContext {
    pub fn new(config: RingConfig, rules: RingRules, center: Point) -> Self {
        Self { config, rules, center }
    }

    /// Time under a pointer, clamped into the selected day.
    pub fn time_under(&self, pointer: Point) -> NaiveDateTime {
        let angle = pointer_angle(pointer, self.center);
        clamp_to_day(self.config.time_at(angle), self.config.selected_date)
    }

    /// Screen location at `time` on a circle of `radius`.
    pub fn point_for(&self, time: NaiveDateTime, radius: f64) -> Point {
        point_at_angle(self.config.angle_of(time), self.center, radius)
    }
}
