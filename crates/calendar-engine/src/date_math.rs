//! Naive-date arithmetic shared by the grid builder and the recurrence engine.
//!
//! Months are 0-based throughout (`0` = January, `11` = December) and weeks are
//! Sunday-first. Everything here is local-calendar arithmetic on naive dates:
//! no time zones, no time-of-day, so DST can never leak into a day count.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

pub const DAYS_IN_WEEK: usize = 7;
pub const MONTHS_IN_YEAR: u32 = 12;

/// A calendar-local date as a `(year, 0-based month, day)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonthDay {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl YearMonthDay {
    /// Build a triple, rejecting days that do not exist in `(year, month)`.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        let ymd = Self { year, month, day };
        ymd.to_date()?;
        Ok(ymd)
    }

    pub fn to_date(self) -> Result<NaiveDate> {
        self.month
            .checked_add(1)
            .and_then(|m| NaiveDate::from_ymd_opt(self.year, m, self.day))
            .ok_or(CalendarError::InvalidDate {
                year: self.year,
                month: self.month,
                day: self.day,
            })
    }
}

impl From<NaiveDate> for YearMonthDay {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
            day: date.day(),
        }
    }
}

impl TryFrom<YearMonthDay> for NaiveDate {
    type Error = CalendarError;

    fn try_from(ymd: YearMonthDay) -> Result<Self> {
        ymd.to_date()
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a 0-based month. `month` must be in `0..12`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 if is_leap_year(year) => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// The last day-of-month number; same value as [`days_in_month`].
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    days_in_month(year, month)
}

/// First day of a 0-based month, or `None` when the month index is out of range.
pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if month >= MONTHS_IN_YEAR {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1)
}

/// Calendar-correct addition; `n` may be negative.
///
/// Panics only if the result leaves chrono's representable range (roughly
/// ±262,000 years).
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// Signed number of days from `start` to `end`.
pub fn difference_in_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Day count of the intersection of `[start, end]` with `[range_start, range_end]`.
///
/// Measured from `max(start, range_start)` to `min(end, range_end)`; the result
/// is negative when the two intervals do not meet.
pub fn difference_in_days_within(
    start: NaiveDate,
    end: NaiveDate,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> i64 {
    difference_in_days(start.max(range_start), end.min(range_end))
}

/// Sunday-based day of week: `0` = Sunday ... `6` = Saturday.
pub fn day_of_week(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Zero-based row of `date` within its month's Sunday-first calendar grid.
///
/// The first row is the one holding the 1st, however few days of it belong to
/// the month, so a month starting on Saturday has the 2nd in row 1.
pub fn week_of_month(date: NaiveDate) -> u32 {
    let first = date - Duration::days(i64::from(date.day0()));
    (date.day0() + day_of_week(first)) / DAYS_IN_WEEK as u32
}

/// The `n`-th (1-based) occurrence of `weekday` in a 0-based month.
///
/// Returns `None` when `n` is zero or exceeds the occurrences in that month
/// (e.g. a fifth Monday in a month that has four).
pub fn nth_weekday_of_month(weekday: Weekday, n: u32, year: i32, month: u32) -> Option<NaiveDate> {
    let index = usize::try_from(n.checked_sub(1)?).ok()?;
    first_of_month(year, month)?
        .iter_days()
        .take_while(|d| d.month0() == month)
        .filter(|d| d.weekday() == weekday)
        .nth(index)
}

/// Zero-based row of `date` within its year's Sunday-first grid; the row that
/// holds January 1st is row 0.
pub fn week_of_year(date: NaiveDate) -> usize {
    let jan_first = date - Duration::days(i64::from(date.ordinal0()));
    (date.ordinal0() + day_of_week(jan_first)) as usize / DAYS_IN_WEEK
}

/// 1-based ordinal of `date`'s weekday within its month (the 15th is always
/// the third of its weekday).
pub fn weekday_ordinal_in_month(date: NaiveDate) -> u32 {
    date.day0() / DAYS_IN_WEEK as u32 + 1
}

pub fn prev_week(date: NaiveDate) -> NaiveDate {
    add_days(date, -(DAYS_IN_WEEK as i64))
}

pub fn next_week(date: NaiveDate) -> NaiveDate {
    add_days(date, DAYS_IN_WEEK as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_table_matches_chrono() {
        for year in [1900, 2000, 2023, 2024] {
            for month in 0..MONTHS_IN_YEAR {
                let first = first_of_month(year, month).unwrap();
                let next = if month == 11 {
                    date(year + 1, 1, 1)
                } else {
                    first_of_month(year, month + 1).unwrap()
                };
                assert_eq!(
                    days_in_month(year, month) as i64,
                    difference_in_days(first, next),
                    "{year}-{month}"
                );
            }
        }
    }

    #[test]
    fn out_of_range_month_has_no_first_day() {
        assert_eq!(first_of_month(2024, 12), None);
        assert!(YearMonthDay::new(2024, u32::MAX, 1).is_err());
    }
}
