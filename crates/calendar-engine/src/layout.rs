//! Greedy first-fit row packing for events drawn across a row of day cells.
//!
//! Spans are half-open in cell units: a span with `start = 1, len = 3`
//! occupies cells 1, 2 and 3. Events clamped from an inclusive date range
//! therefore collide whenever they share any calendar day, including when
//! one ends on the day the other starts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_math::difference_in_days;
use crate::event::Event;

/// A span on the date axis, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSpan {
    pub start: usize,
    pub len: usize,
}

impl AxisSpan {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn overlaps(&self, other: &AxisSpan) -> bool {
        self.start < other.start + other.len && other.start < self.start + self.len
    }
}

/// Assign each span the lowest row free across all of its cells.
///
/// Rows are returned in input order, so the layout depends only on that
/// order; sort beforehand for a canonical result. Spans are expected to lie
/// within `[0, axis_len)`; any part outside is ignored, and a zero-length
/// span always lands on row 0.
pub fn assign_rows(spans: &[AxisSpan], axis_len: usize) -> Vec<usize> {
    let mut occupancy: Vec<Vec<bool>> = Vec::new();
    let mut rows = Vec::with_capacity(spans.len());

    for span in spans {
        let cells = span.start.min(axis_len)..span.start.saturating_add(span.len).min(axis_len);

        let free = occupancy
            .iter()
            .position(|row| row[cells.clone()].iter().all(|taken| !taken));
        let row = match free {
            Some(row) => row,
            None => {
                occupancy.push(vec![false; axis_len]);
                occupancy.len() - 1
            }
        };

        occupancy[row][cells].fill(true);
        rows.push(row);
    }

    rows
}

/// Clamp an event to a consecutive, ascending date axis.
///
/// Returns `None` when the event does not touch the axis.
pub fn clamp_to_axis(event: &Event, axis: &[NaiveDate]) -> Option<AxisSpan> {
    let (first, last) = (*axis.first()?, *axis.last()?);
    if event.end_date() < first || event.start_date() > last {
        return None;
    }
    let start = event.start_date().max(first);
    let end = event.end_date().min(last);
    Some(AxisSpan {
        start: usize::try_from(difference_in_days(first, start)).ok()?,
        len: usize::try_from(difference_in_days(start, end) + 1).ok()?,
    })
}

/// Rows for `events` laid out on `axis`, aligned with the input.
///
/// Events that miss the axis get `None` and take no row.
pub fn rows_for_events(events: &[&Event], axis: &[NaiveDate]) -> Vec<Option<usize>> {
    let spans: Vec<Option<AxisSpan>> = events.iter().map(|e| clamp_to_axis(e, axis)).collect();
    let placed: Vec<AxisSpan> = spans.iter().flatten().copied().collect();
    let mut rows = assign_rows(&placed, axis.len()).into_iter();
    spans
        .iter()
        .map(|span| span.and_then(|_| rows.next()))
        .collect()
}
