//! Day-boundary clamping and minimum-duration checks.
//!
//! The latest permissible instant on a ring day is 23:59; nothing published
//! by the core may start before midnight or end after that minute.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Midnight at the start of `day`.
pub fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// Exclusive end of `day` (midnight of the following day).
pub fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    start_of_day(day) + Duration::days(1)
}

/// Latest instant a task boundary may occupy: 23:59 of `day`.
pub fn latest_instant(day: NaiveDate) -> NaiveDateTime {
    end_of_day(day) - Duration::minutes(1)
}

/// Clamp `time` into `[00:00, 23:59]` of `day`.
pub fn clamp_to_day(time: NaiveDateTime, day: NaiveDate) -> NaiveDateTime {
    time.clamp(start_of_day(day), latest_instant(day))
}

/// Whether `[start, end)` is at least `min_duration` long.
///
/// Callers reject the candidate when this fails instead of coercing the
/// moving boundary.
pub fn meets_minimum_duration(
    start: NaiveDateTime,
    end: NaiveDateTime,
    min_duration: Duration,
) -> bool {
    end - start >= min_duration
}

/// Whether `[start, end)` lies within `day`'s bounds.
pub fn within_day(start: NaiveDateTime, end: NaiveDateTime, day: NaiveDate) -> bool {
    start >= start_of_day(day) && end <= latest_instant(day) && start <= end
}

/// Clamp the start of an interval of `duration` so the whole interval fits
/// inside `day`.
///
/// An end past 23:59 shifts the start backward so the end lands exactly on
/// 23:59; a start before midnight shifts it forward to midnight.
pub fn clamp_interval_start(
    start: NaiveDateTime,
    duration: Duration,
    day: NaiveDate,
) -> NaiveDateTime {
    let day_start = start_of_day(day);
    let latest = latest_instant(day);
    let mut clamped = start;
    if clamped + duration > latest {
        clamped = latest - duration;
    }
    if clamped < day_start {
        clamped = day_start;
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn latest_instant_is_one_minute_before_midnight() {
        assert_eq!(latest_instant(day()), at(23, 59));
        assert_eq!(end_of_day(day()) - start_of_day(day()), Duration::days(1));
    }

    #[test]
    fn clamp_to_day_caps_both_ends() {
        let before = start_of_day(day()) - Duration::hours(2);
        let after = end_of_day(day()) + Duration::hours(2);
        assert_eq!(clamp_to_day(before, day()), at(0, 0));
        assert_eq!(clamp_to_day(after, day()), at(23, 59));
        assert_eq!(clamp_to_day(at(12, 30), day()), at(12, 30));
    }

    #[test]
    fn minimum_duration_is_inclusive() {
        let min = Duration::minutes(5);
        assert!(meets_minimum_duration(at(9, 0), at(9, 5), min));
        assert!(!meets_minimum_duration(at(9, 0), at(9, 4), min));
        assert!(!meets_minimum_duration(at(9, 0), at(8, 0), min));
    }

    #[test]
    fn interval_past_day_end_lands_on_latest_instant() {
        let start = clamp_interval_start(at(23, 30), Duration::hours(1), day());
        assert_eq!(start, at(22, 59));
        assert_eq!(start + Duration::hours(1), latest_instant(day()));
    }

    #[test]
    fn interval_before_midnight_lands_on_day_start() {
        let early = at(0, 0) - Duration::minutes(30);
        let start = clamp_interval_start(early, Duration::hours(1), day());
        assert_eq!(start, at(0, 0));
    }

    #[test]
    fn within_day_rejects_spill_over() {
        assert!(within_day(at(0, 0), at(23, 59), day()));
        assert!(!within_day(at(23, 0), end_of_day(day()), day()));
    }
}
