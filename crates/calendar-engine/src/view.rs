//! Navigation state of a calendar view: which layout is shown and which
//! month, week row and day are in focus.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date_math::{day_of_week, first_of_month, next_week, prev_week, week_of_year};
use crate::error::{CalendarError, Result};
use crate::grid::CalendarGrid;
use crate::snapshot::{KeyValueStore, CALENDAR_DATA_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CalendarLayout {
    Year,
    #[default]
    Month,
    Week,
    Day,
}

/// `week` indexes the rows of the year grid; `day` is a Sunday-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub layout: CalendarLayout,
    pub year: i32,
    pub month: u32,
    pub week: usize,
    pub day: u32,
}

impl ViewState {
    /// Focus `date`, keeping the default month layout.
    pub fn focused_on(date: NaiveDate) -> Self {
        Self {
            layout: CalendarLayout::default(),
            year: date.year(),
            month: date.month0(),
            week: week_of_year(date),
            day: day_of_week(date),
        }
    }

    pub fn today() -> Self {
        Self::focused_on(Local::now().date_naive())
    }

    /// The focused date looked up in `grid`, which must be this state's year.
    ///
    /// `None` when the grid is for another year or the indices fall outside it.
    pub fn focused_date(&self, grid: &CalendarGrid) -> Option<NaiveDate> {
        if grid.year() != self.year {
            return None;
        }
        let week = grid.weeks().get(self.week)?;
        week.days().get(usize::try_from(self.day).ok()?).copied()
    }

    pub fn set_layout(&mut self, layout: CalendarLayout) {
        self.layout = layout;
    }

    /// Move to the first day of a 0-based month of the current year.
    pub fn set_month(&mut self, month: u32) -> Result<()> {
        let first = first_of_month(self.year, month).ok_or(CalendarError::InvalidDate {
            year: self.year,
            month,
            day: 1,
        })?;
        self.refocus(first);
        Ok(())
    }

    pub fn set_week(&mut self, week: usize) {
        self.week = week;
    }

    pub fn set_day(&mut self, day: u32) {
        self.day = day;
    }

    pub fn jump_to_today(&mut self) {
        self.refocus(Local::now().date_naive());
    }

    /// Step one week forward from `current`, crossing into the next year when
    /// needed.
    pub fn next_week(&mut self, current: NaiveDate) {
        self.refocus(next_week(current));
    }

    pub fn prev_week(&mut self, current: NaiveDate) {
        self.refocus(prev_week(current));
    }

    fn refocus(&mut self, date: NaiveDate) {
        *self = Self {
            layout: self.layout,
            ..Self::focused_on(date)
        };
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.set(CALENDAR_DATA_KEY, serde_json::to_string(self)?);
        Ok(())
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Self>> {
        store
            .get(CALENDAR_DATA_KEY)
            .map(|json| serde_json::from_str(&json).map_err(CalendarError::from))
            .transpose()
    }
}
