//! Tests for free-slot extraction.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use freebusy_engine::{
    first_free_slot, free_slots, free_slots_at_least, free_slots_in, merge, Interval,
};

fn iv(start: i64, end: i64) -> Interval {
    Interval::new(start, end)
}

/// Helper to build a UTC instant on 2026-03-01.
fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, min, 0).unwrap()
}

#[test]
fn gaps_between_merged_busy_blocks() {
    let free = free_slots(&[iv(10, 25), iv(30, 40)], 0, 50);
    assert_eq!(free, vec![iv(0, 10), iv(25, 30), iv(40, 50)]);
}

#[test]
fn no_busy_whole_window_free() {
    assert_eq!(free_slots::<i64>(&[], 0, 50), vec![iv(0, 50)]);
}

#[test]
fn degenerate_window_no_slots() {
    assert!(free_slots::<i64>(&[], 10, 10).is_empty());
    assert!(free_slots::<i64>(&[], 20, 10).is_empty());
    assert!(free_slots(&[iv(0, 5)], 20, 10).is_empty());
}

#[test]
fn busy_after_window_leaves_it_free() {
    assert_eq!(free_slots(&[iv(100, 200)], 0, 50), vec![iv(0, 50)]);
}

#[test]
fn busy_before_window_leaves_it_free() {
    assert_eq!(free_slots(&[iv(-20, -10)], 0, 50), vec![iv(0, 50)]);
}

#[test]
fn busy_covering_window_no_slots() {
    assert!(free_slots(&[iv(0, 100)], 10, 20).is_empty());
}

#[test]
fn busy_exactly_filling_window_no_slots() {
    assert!(free_slots(&[iv(10, 20)], 10, 20).is_empty());
}

#[test]
fn busy_straddling_start_trims_first_slot() {
    assert_eq!(free_slots(&[iv(-5, 10)], 0, 50), vec![iv(10, 50)]);
}

#[test]
fn busy_straddling_end_trims_last_slot() {
    assert_eq!(free_slots(&[iv(40, 80)], 0, 50), vec![iv(0, 40)]);
}

#[test]
fn busy_starting_at_window_end_is_outside() {
    assert_eq!(free_slots(&[iv(50, 60)], 0, 50), vec![iv(0, 50)]);
}

#[test]
fn busy_ending_at_window_start_is_outside() {
    assert_eq!(free_slots(&[iv(-10, 0)], 0, 50), vec![iv(0, 50)]);
}

#[test]
fn busy_list_beyond_window_is_not_scanned_into_output() {
    let busy = [iv(10, 20), iv(60, 70), iv(80, 90)];
    assert_eq!(free_slots(&busy, 0, 50), vec![iv(0, 10), iv(20, 50)]);
}

#[test]
fn window_given_as_interval() {
    assert_eq!(
        free_slots_in(&[iv(10, 25), iv(30, 40)], iv(0, 50)),
        vec![iv(0, 10), iv(25, 30), iv(40, 50)]
    );
}

#[test]
fn minimum_span_filters_short_gaps() {
    let busy = [iv(10, 25), iv(30, 40)];
    assert_eq!(
        free_slots_at_least(&busy, 0, 50, 10),
        vec![iv(0, 10), iv(40, 50)]
    );
    assert!(free_slots_at_least(&busy, 0, 50, 11).is_empty());
}

#[test]
fn first_free_slot_skips_short_gaps() {
    // Window: 08:00-17:00, busy 08:00-08:30 and 09:00-12:00.
    // The 08:30-09:00 gap is too short for an hour; the first fit is 12:00-17:00.
    let busy = merge(&[
        Interval::new(at(8, 0), at(8, 30)),
        Interval::new(at(9, 0), at(12, 0)),
    ]);

    let slot = first_free_slot(&busy, at(8, 0), at(17, 0), TimeDelta::minutes(60));

    assert_eq!(slot, Some(Interval::new(at(12, 0), at(17, 0))));
}

#[test]
fn first_free_slot_none_when_nothing_fits() {
    let busy = merge(&[
        Interval::new(at(9, 0), at(10, 0)),
        Interval::new(at(10, 15), at(12, 0)),
    ]);

    let slot = first_free_slot(&busy, at(9, 0), at(12, 0), TimeDelta::minutes(60));

    assert!(slot.is_none(), "only a 15 minute gap exists");
}

#[test]
fn datetime_day_with_three_meetings() {
    // Window: 08:00-18:00; meetings 09-10, 12-13, 15-16.
    let busy = merge(&[
        Interval::new(at(15, 0), at(16, 0)),
        Interval::new(at(9, 0), at(10, 0)),
        Interval::new(at(12, 0), at(13, 0)),
    ]);

    let free = free_slots(&busy, at(8, 0), at(18, 0));

    let minutes: Vec<i64> = free.iter().map(|s| s.duration().num_minutes()).collect();
    assert_eq!(minutes, vec![60, 120, 120, 120]);
    assert_eq!(free[0].start, at(8, 0));
    assert_eq!(free[3].end, at(18, 0));
}

#[test]
fn touching_meetings_leave_no_zero_width_gap() {
    let busy = merge(&[
        Interval::new(at(10, 0), at(11, 0)),
        Interval::new(at(11, 0), at(12, 0)),
    ]);

    let free = free_slots(&busy, at(9, 0), at(13, 0));

    assert_eq!(
        free,
        vec![
            Interval::new(at(9, 0), at(10, 0)),
            Interval::new(at(12, 0), at(13, 0)),
        ]
    );
}
