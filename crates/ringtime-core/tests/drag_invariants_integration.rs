//! Property tests: invariants that must hold after arbitrary drag sequences.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use ringtime_core::ring::{latest_instant, point_at_angle, start_of_day};
use ringtime_core::{
    Handle, InMemoryTaskStore, OverlapResolver, Point, RingConfig, RingContext,
    RingGestureController, RingRules, Task, TaskRepository,
};

const RADIUS: f64 = 90.0;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

/// Non-overlapping tasks, one per occupied two-hour slot.
fn layout() -> impl Strategy<Value = Vec<Task>> {
    proptest::collection::vec(proptest::option::of(15i64..=119), 12).prop_map(|slots| {
        slots
            .into_iter()
            .enumerate()
            .filter_map(|(i, len)| {
                let len = len?;
                let start: NaiveDateTime = start_of_day(day()) + Duration::hours(2 * i as i64);
                let end = start + Duration::minutes(len);
                Task::with_id(format!("t{i}"), format!("task {i}"), start, end).ok()
            })
            .collect::<Vec<_>>()
    })
}

fn controller(tasks: Vec<Task>, zero: f64) -> RingGestureController<InMemoryTaskStore, ()> {
    let ctx = RingContext::new(
        RingConfig::new(zero, day()),
        RingRules::default(),
        Point::new(100.0, 100.0),
    );
    RingGestureController::new(ctx, InMemoryTaskStore::from_tasks(tasks), ())
}

fn assert_in_day_and_long_enough(tasks: &[Task]) -> Result<(), TestCaseError> {
    let min = RingRules::default().min_duration;
    for t in tasks {
        prop_assert!(t.end_time - t.start_time >= min, "{} too short", t.id);
        prop_assert!(t.start_time >= start_of_day(day()), "{} starts before day", t.id);
        prop_assert!(t.end_time <= latest_instant(day()), "{} ends after day", t.id);
    }
    Ok(())
}

proptest! {
    #[test]
    fn edge_drags_keep_minimum_duration_and_day_bounds(
        tasks in layout(),
        pick in 0usize..12,
        use_end in any::<bool>(),
        zero in 0.0f64..360.0,
        path in proptest::collection::vec(0.0f64..360.0, 1..40),
    ) {
        prop_assume!(!tasks.is_empty());
        let target = tasks[pick % tasks.len()].clone();
        let mut ctl = controller(tasks, zero);
        let ctx = *ctl.ring();
        let handle = if use_end { Handle::End } else { Handle::Start };
        let grabbed = if use_end { target.end_time } else { target.start_time };

        ctl.on_drag_start(&target.id, ctx.point_for(grabbed, RADIUS), handle);
        for angle in path {
            ctl.on_drag_changed(point_at_angle(angle, ctx.center, RADIUS));
            assert_in_day_and_long_enough(&ctl.repository().current_tasks())?;
        }
        ctl.on_drag_ended();
        assert_in_day_and_long_enough(&ctl.repository().current_tasks())?;
    }

    #[test]
    fn whole_arc_commit_leaves_no_overlap(
        tasks in layout(),
        pick in 0usize..12,
        zero in 0.0f64..360.0,
        grab_angle in 0.0f64..360.0,
        path in proptest::collection::vec(0.0f64..360.0, 1..20),
    ) {
        prop_assume!(!tasks.is_empty());
        let target = tasks[pick % tasks.len()].clone();
        let mut ctl = controller(tasks, zero);
        let ctx = *ctl.ring();

        let grab = point_at_angle(grab_angle, ctx.center, RADIUS);
        ctl.on_drag_start(&target.id, grab, Handle::Whole);
        for angle in path {
            ctl.on_drag_changed(point_at_angle(angle, ctx.center, RADIUS));
            let moved = ctl.repository().task(&target.id).unwrap();
            prop_assert_eq!(moved.duration(), target.duration());
        }
        ctl.on_drag_ended();

        let tasks = ctl.repository().current_tasks();
        assert_in_day_and_long_enough(&tasks)?;
        prop_assert!(OverlapResolver::default().conflicting_pairs(&tasks).is_empty());
    }
}
