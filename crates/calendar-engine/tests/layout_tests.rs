//! Tests for row packing.

use calendar_engine::layout::clamp_to_axis;
use calendar_engine::{assign_rows, rows_for_events, AxisSpan, Event, EventDraft};
use chrono::{NaiveDate, NaiveDateTime};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).expect("valid test time")
}

fn event(start: NaiveDateTime, end: NaiveDateTime) -> Event {
    EventDraft::new(start)
        .with_end(end)
        .commit()
        .expect("valid draft")
}

/// Sunday 2024-03-03 through Saturday 2024-03-09.
fn week_axis() -> Vec<NaiveDate> {
    date(2024, 3, 3).iter_days().take(7).collect()
}

// ---------------------------------------------------------------------------
// assign_rows
// ---------------------------------------------------------------------------

#[test]
fn shared_boundary_day_forces_a_new_row() {
    // A: days 0-2, B: days 1-3, C: days 3-5, each inclusive of both ends.
    // B and C share day 3, so they collide; A and C do not.
    let spans = [AxisSpan::new(0, 3), AxisSpan::new(1, 3), AxisSpan::new(3, 3)];
    let rows = assign_rows(&spans, 6);

    assert_eq!(rows, vec![0, 1, 0]);
    assert_ne!(rows[0], rows[1], "A and B overlap on days 1-2");
    assert_ne!(rows[1], rows[2], "B and C overlap on day 3");
}

#[test]
fn touching_half_open_spans_share_a_row() {
    let spans = [AxisSpan::new(0, 3), AxisSpan::new(3, 3)];
    assert_eq!(assign_rows(&spans, 6), vec![0, 0]);
}

#[test]
fn first_fit_reuses_freed_rows() {
    let spans = [
        AxisSpan::new(0, 7),
        AxisSpan::new(0, 2),
        AxisSpan::new(1, 3),
        AxisSpan::new(4, 3),
    ];
    assert_eq!(assign_rows(&spans, 7), vec![0, 1, 2, 1]);
}

#[test]
fn layout_depends_on_input_order() {
    let a = AxisSpan::new(0, 2);
    let b = AxisSpan::new(1, 2);
    let c = AxisSpan::new(2, 2);
    assert_eq!(assign_rows(&[a, b, c], 4), vec![0, 1, 0]);
    assert_eq!(assign_rows(&[b, a, c], 4), vec![0, 1, 1]);
}

#[test]
fn empty_input_gives_no_rows() {
    assert!(assign_rows(&[], 7).is_empty());
}

// ---------------------------------------------------------------------------
// Events on a date axis
// ---------------------------------------------------------------------------

#[test]
fn events_are_clamped_to_the_axis() {
    let axis = week_axis();
    let early = event(at(2024, 2, 28, 0, 0), at(2024, 3, 4, 0, 0));
    assert_eq!(clamp_to_axis(&early, &axis), Some(AxisSpan::new(0, 2)));

    let late = event(at(2024, 3, 8, 9, 0), at(2024, 3, 12, 9, 0));
    assert_eq!(clamp_to_axis(&late, &axis), Some(AxisSpan::new(5, 2)));

    let outside = event(at(2024, 3, 10, 9, 0), at(2024, 3, 10, 10, 0));
    assert_eq!(clamp_to_axis(&outside, &axis), None);
    assert_eq!(clamp_to_axis(&early, &[]), None);
}

#[test]
fn rows_align_with_input_events() {
    let axis = week_axis();
    let conference = event(at(2024, 3, 4, 0, 0), at(2024, 3, 6, 0, 0));
    let elsewhere = event(at(2024, 3, 20, 0, 0), at(2024, 3, 20, 0, 0));
    let offsite = event(at(2024, 3, 5, 0, 0), at(2024, 3, 5, 0, 0));
    let trip = event(at(2024, 3, 7, 0, 0), at(2024, 3, 9, 0, 0));

    let rows = rows_for_events(&[&conference, &elsewhere, &offsite, &trip], &axis);
    assert_eq!(rows, vec![Some(0), None, Some(1), Some(0)]);
}
