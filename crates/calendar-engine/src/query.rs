//! Range queries and event classification.
//!
//! Comparisons are made on calendar dates, not instants: an event ending at
//! 09:00 on the last day of a range is inside that range.

use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::date_math::difference_in_days;
use crate::event::Event;

/// Whether the date span `[start, end]` qualifies for `[range_start, range_end]`.
///
/// Non-greedy: the span must lie entirely inside the range. Greedy: any
/// overlap qualifies, i.e. either endpoint falls inside the range or the
/// span covers the whole range. A single-day range (`range_start ==
/// range_end`) therefore matches every span touching that day, including a
/// span that is exactly that day.
pub fn is_within_range(
    start: NaiveDate,
    end: NaiveDate,
    range_start: NaiveDate,
    range_end: NaiveDate,
    greedy: bool,
) -> bool {
    if !greedy {
        return start >= range_start && end <= range_end;
    }
    let inside = |d: NaiveDate| range_start <= d && d <= range_end;
    inside(end) || inside(start) || (start <= range_start && end >= range_end)
}

/// Events qualifying for the range, in input order.
pub fn events_intersecting<'a, I>(
    events: I,
    range_start: NaiveDate,
    range_end: NaiveDate,
    greedy: bool,
) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|e| is_within_range(e.start_date(), e.end_date(), range_start, range_end, greedy))
        .collect()
}

/// Stable sort by start; ties keep their incoming (creation) order.
pub fn sort_for_layout(events: &mut [&Event]) {
    events.sort_by_key(|e| e.start());
}

/// Display classification of an event. Flags are independent: an event can be
/// both full-day and multi-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventClass {
    pub full_day: bool,
    pub multi_day: bool,
    pub timed: bool,
}

impl EventClass {
    /// Events drawn as banners across day columns rather than in hour slots.
    pub fn is_full_or_multi_day(&self) -> bool {
        self.full_day || self.multi_day
    }
}

/// `full_day` follows [`Event::is_all_day`] (midnight endpoints unless
/// overridden); `multi_day` means the end date is more than one day after the
/// start date; `timed` means either endpoint has a time-of-day.
pub fn classify(event: &Event) -> EventClass {
    let has_time = |t: chrono::NaiveDateTime| t.time().num_seconds_from_midnight() != 0;
    EventClass {
        full_day: event.is_all_day(),
        multi_day: difference_in_days(event.start_date(), event.end_date()) > 1,
        timed: has_time(event.start()) || has_time(event.end()),
    }
}

/// Events of one view split into banner rows and hour-slot entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitEvents<'a> {
    /// Full-day or multi-day events.
    pub banner: Vec<&'a Event>,
    /// Everything else.
    pub timed: Vec<&'a Event>,
}

pub fn split_by_kind<'a, I>(events: I) -> SplitEvents<'a>
where
    I: IntoIterator<Item = &'a Event>,
{
    let (banner, timed): (Vec<&Event>, Vec<&Event>) = events
        .into_iter()
        .partition(|e| classify(e).is_full_or_multi_day());
    SplitEvents { banner, timed }
}

/// Timed events starting on `date`.
pub fn timed_events_on<'a, I>(events: I, date: NaiveDate) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    split_by_kind(events)
        .timed
        .into_iter()
        .filter(|e| e.start_date() == date)
        .collect()
}
