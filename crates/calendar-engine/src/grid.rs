//! Year calendar grids: every day of a year laid out in Sunday-first week rows.
//!
//! The first and last rows are padded with days from the neighbouring years so
//! that every row holds exactly seven dates. Grids are immutable once built;
//! [`GridCache`] keeps one per year for the lifetime of its owner.

use std::collections::HashMap;

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::date_math::{day_of_week, DAYS_IN_WEEK};

/// Seven consecutive dates, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    days: [NaiveDate; DAYS_IN_WEEK],
}

impl Week {
    /// The week containing `date`, walking back to its Sunday.
    ///
    /// `None` when part of that week falls outside chrono's date range.
    fn containing(date: NaiveDate) -> Option<Self> {
        let sunday = date.checked_sub_days(Days::new(u64::from(day_of_week(date))))?;
        let mut days = [sunday; DAYS_IN_WEEK];
        for (offset, slot) in (0u64..).zip(days.iter_mut()) {
            *slot = sunday.checked_add_days(Days::new(offset))?;
        }
        Some(Self { days })
    }

    pub fn days(&self) -> &[NaiveDate; DAYS_IN_WEEK] {
        &self.days
    }

    pub fn first(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.days[DAYS_IN_WEEK - 1]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first() <= date && date <= self.last()
    }
}

/// Row/column position of a date inside a [`CalendarGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateIndices {
    /// 0-based month of the date.
    pub month: u32,
    /// Index of the week row within the year grid.
    pub week: usize,
    /// Sunday-based column (`0` = Sunday).
    pub day: u32,
}

/// One year's days partitioned into week rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarGrid {
    year: i32,
    weeks: Vec<Week>,
}

impl CalendarGrid {
    /// Build the grid for `year`.
    ///
    /// Walks the days of the year in order and opens a new row whenever the
    /// weekday wraps back to Sunday. Each row is materialised from its Sunday,
    /// which pads the first row with trailing December days of the previous
    /// year and the last row with leading January days of the next one.
    ///
    /// Years whose padded rows cannot be represented (the first and last years
    /// chrono supports, and anything beyond) produce an empty grid.
    pub fn build(year: i32) -> Self {
        let mut weeks: Vec<Week> = Vec::with_capacity(54);

        let Some(jan_first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
            return Self { year, weeks };
        };

        for day in jan_first.iter_days().take_while(|d| d.year() == year) {
            if weeks.is_empty() || day.weekday() == Weekday::Sun {
                let Some(week) = Week::containing(day) else {
                    log::warn!("event=grid_out_of_range module=grid year={}", year);
                    return Self {
                        year,
                        weeks: Vec::new(),
                    };
                };
                weeks.push(week);
            }
        }

        log::debug!(
            "event=grid_build module=grid year={} weeks={}",
            year,
            weeks.len()
        );

        Self { year, weeks }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// The week rows that hold at least one day of the 0-based `month`, in order.
    pub fn weeks_for_month(&self, month: u32) -> &[Week] {
        let touches = |w: &Week| {
            w.days()
                .iter()
                .any(|d| d.year() == self.year && d.month0() == month)
        };
        let Some(first) = self.weeks.iter().position(|w| touches(w)) else {
            return &[];
        };
        let len = self.weeks[first..]
            .iter()
            .take_while(|w| touches(*w))
            .count();
        &self.weeks[first..first + len]
    }

    /// Locate `date` in this grid.
    ///
    /// Only dates belonging to the grid's own year are reported; padding days
    /// from neighbouring years yield `None`.
    pub fn indices_of(&self, date: NaiveDate) -> Option<DateIndices> {
        if date.year() != self.year {
            return None;
        }
        self.weeks
            .iter()
            .position(|w| w.contains(date))
            .map(|week| DateIndices {
                month: date.month0(),
                week,
                day: day_of_week(date),
            })
    }

    /// Indices of the local "today", or `None` when today is not in this year.
    pub fn today_indices(&self) -> Option<DateIndices> {
        self.indices_of(Local::now().date_naive())
    }
}

/// Caller-owned cache of year grids with an injectable builder.
///
/// Grids are never evicted; one entry exists per distinct year requested.
pub struct GridCache<F = fn(i32) -> CalendarGrid> {
    grids: HashMap<i32, CalendarGrid>,
    builder: F,
}

impl GridCache {
    pub fn new() -> Self {
        Self::with_builder(CalendarGrid::build)
    }
}

impl Default for GridCache {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> GridCache<F>
where
    F: Fn(i32) -> CalendarGrid,
{
    pub fn with_builder(builder: F) -> Self {
        Self {
            grids: HashMap::new(),
            builder,
        }
    }

    /// Return the grid for `year`, building it on first request.
    pub fn get(&mut self, year: i32) -> &CalendarGrid {
        let builder = &self.builder;
        self.grids.entry(year).or_insert_with(|| builder(year))
    }

    pub fn contains(&self, year: i32) -> bool {
        self.grids.contains_key(&year)
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}
