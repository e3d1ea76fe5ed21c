//! Bidirectional mapping between ring angles and wall-clock time.
//!
//! The ring spreads 1440 minutes over 360 degrees, so one hour covers 15°
//! and one degree covers 4 minutes. Angles use screen convention: measured
//! from the positive x axis, growing clockwise because y grows downward.
//! A fixed 90° visual offset is applied and the result is rotated by the
//! configured zero position.
//!
//! ```text
//! angle   = (minutes / 4 + 90 - zero_position) mod 360
//! minutes = ((angle - 90 + zero_position) mod 360) * 4
//! ```
//!
//! Every function here is total: out-of-range input is normalized, never
//! rejected.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Minutes covered by one revolution of the ring.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Degrees swept by one minute.
pub const DEGREES_PER_MINUTE: f64 = 360.0 / MINUTES_PER_DAY as f64;

/// Minutes covered by one degree.
pub const MINUTES_PER_DEGREE: f64 = 4.0;

/// Rotation that puts the ring's reference angle at the top of the screen.
const VISUAL_OFFSET_DEG: f64 = 90.0;

/// A location in screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Normalize an angle into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Normalize a minute count into `[0, 1440)`.
pub fn normalize_minutes(minutes: i64) -> i64 {
    minutes.rem_euclid(MINUTES_PER_DAY)
}

/// Minutes elapsed since midnight, including the fractional seconds part.
fn fractional_minutes(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) / 60.0
}

/// Map a time of day onto the ring.
///
/// Always returns a value in `[0, 360)`.
pub fn time_to_angle(time: NaiveTime, zero_position: f64) -> f64 {
    normalize_degrees(
        fractional_minutes(time) * DEGREES_PER_MINUTE + VISUAL_OFFSET_DEG - zero_position,
    )
}

/// Map a ring angle to minutes since midnight, rounded to the nearest minute.
///
/// Always returns a value in `[0, 1440)`.
pub fn angle_to_minutes(degrees: f64, zero_position: f64) -> i64 {
    let unrotated = normalize_degrees(degrees - VISUAL_OFFSET_DEG + zero_position);
    normalize_minutes((unrotated * MINUTES_PER_DEGREE).round() as i64)
}

/// Map a ring angle to a wall-clock time on `reference_date`.
pub fn angle_to_time(degrees: f64, zero_position: f64, reference_date: NaiveDate) -> NaiveDateTime {
    let minutes = angle_to_minutes(degrees, zero_position);
    reference_date.and_time(NaiveTime::MIN) + Duration::minutes(minutes)
}

/// Angle of `location` around `center`, normalized into `[0, 360)`.
pub fn pointer_angle(location: Point, center: Point) -> f64 {
    let dx = location.x - center.x;
    let dy = location.y - center.y;
    normalize_degrees(dy.atan2(dx).to_degrees())
}

/// Point at `angle` on a circle of `radius` around `center`.
///
/// Inverse of [`pointer_angle`] for any positive radius.
pub fn point_at_angle(angle: f64, center: Point, radius: f64) -> Point {
    let rad = angle.to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

/// Shortest signed angular distance from `initial` to `current`.
///
/// The result lies in `(-180, 180]`; positive means clockwise. Non-finite
/// input yields 0.
pub fn signed_angle_delta(current: f64, initial: f64) -> f64 {
    let delta = current - initial;
    if !delta.is_finite() {
        return 0.0;
    }
    let mut wrapped = delta.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// Hour of the day a time falls into; used to throttle tick feedback.
pub fn hour_bucket(time: NaiveDateTime) -> u32 {
    time.hour()
}
