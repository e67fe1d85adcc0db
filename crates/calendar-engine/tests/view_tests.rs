//! Tests for view state: focus, navigation and persistence.

use calendar_engine::{CalendarGrid, CalendarLayout, MemoryStore, ViewState};
use chrono::{Datelike, Local, NaiveDate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[test]
fn view_state_points_at_grid_cell() {
    let state = ViewState::focused_on(date(2024, 3, 15));
    let grid = CalendarGrid::build(2024);
    assert_eq!(state.focused_date(&grid), Some(date(2024, 3, 15)));
    assert_eq!(state.focused_date(&CalendarGrid::build(2023)), None);
}

#[test]
fn set_month_focuses_the_first() {
    let mut state = ViewState::focused_on(date(2024, 3, 15));
    state.set_month(1).expect("February exists");
    assert_eq!(
        state.focused_date(&CalendarGrid::build(2024)),
        Some(date(2024, 2, 1))
    );
    assert!(state.set_month(12).is_err());
}

#[test]
fn jump_to_today_keeps_the_layout() {
    let mut state = ViewState::focused_on(date(2000, 6, 1));
    state.set_layout(CalendarLayout::Year);
    state.jump_to_today();

    assert_eq!(state.layout, CalendarLayout::Year);
    assert_eq!(state.year, Local::now().date_naive().year());
}

// ---------------------------------------------------------------------------
// Week navigation
// ---------------------------------------------------------------------------

#[test]
fn view_state_follows_week_navigation_across_years() {
    let mut state = ViewState::focused_on(date(2024, 12, 28));
    state.set_layout(CalendarLayout::Week);
    state.next_week(date(2024, 12, 28));

    assert_eq!(state.layout, CalendarLayout::Week);
    assert_eq!(state.year, 2025);
    assert_eq!(state.month, 0);
    assert_eq!(
        state.focused_date(&CalendarGrid::build(2025)),
        Some(date(2025, 1, 4))
    );
}

#[test]
fn prev_week_steps_back_into_december() {
    let mut state = ViewState::focused_on(date(2024, 1, 3));
    state.prev_week(date(2024, 1, 3));

    assert_eq!(state.year, 2023);
    assert_eq!(state.month, 11);
    assert_eq!(
        state.focused_date(&CalendarGrid::build(2023)),
        Some(date(2023, 12, 27))
    );
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn view_state_persists() {
    let mut kv = MemoryStore::new();
    assert_eq!(ViewState::load(&kv).expect("nothing to parse"), None);

    let mut state = ViewState::focused_on(date(2024, 3, 15));
    state.set_layout(CalendarLayout::Day);
    state.save(&mut kv).expect("saves");
    assert_eq!(ViewState::load(&kv).expect("parses"), Some(state));
}
