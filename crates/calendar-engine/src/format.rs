//! Human-readable labels for dates, times and repeat rules.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::date_math::weekday_ordinal_in_month;
use crate::event::Event;
use crate::recurrence::RepeatType;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const SHORT_DAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

const ORDINAL_NAMES: [&str; 5] = ["first", "second", "third", "fourth", "fifth"];

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Name of a 0-based month, `None` past December.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(usize::try_from(month).ok()?).copied()
}

/// English ordinal suffix: `st`, `nd`, `rd` or `th`.
pub fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// `"first"` .. `"fifth"` for 1..=5.
pub fn ordinal_name(n: u32) -> Option<&'static str> {
    ORDINAL_NAMES
        .get(usize::try_from(n.checked_sub(1)?).ok()?)
        .copied()
}

/// Fractional hour of day as a 12-hour clock string: `13.5` → `"1:30 PM"`.
///
/// Values outside `0.0..24.0` wrap around the clock.
pub fn format_hour(hours: f64) -> String {
    let whole = hours.floor();
    let minute = ((hours - whole) * 60.0).floor() as u32;
    let hour24 = (whole as i64).rem_euclid(24) as u32;
    let suffix = if hour24 > 11 { "PM" } else { "AM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour12, minute, suffix)
}

/// `"Sunday, January 1"`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// Label describing how `event` repeats, e.g. `"Weekly on Monday"`.
pub fn repeat_label(event: &Event) -> String {
    let start = event.start_date();
    match event.repeat().repeat_type {
        RepeatType::None => "Does not repeat".to_string(),
        RepeatType::MonthlyByWeekday => {
            let ordinal = event
                .repeat()
                .repeat_value
                .unwrap_or_else(|| weekday_ordinal_in_month(start));
            monthly_by_weekday_label(start, ordinal)
        }
        other => repeat_choice_label(other, start),
    }
}

/// The repeat options offered for an event starting on `date`, one per
/// [`RepeatType`], in declaration order.
pub fn repeat_choices(date: NaiveDate) -> Vec<(RepeatType, String)> {
    RepeatType::ALL
        .iter()
        .map(|&repeat_type| (repeat_type, repeat_choice_label(repeat_type, date)))
        .collect()
}

fn repeat_choice_label(repeat_type: RepeatType, date: NaiveDate) -> String {
    match repeat_type {
        RepeatType::None => "Does not repeat".to_string(),
        RepeatType::Daily => "Daily".to_string(),
        RepeatType::Weekly => format!("Weekly on {}", weekday_name(date.weekday())),
        RepeatType::MonthlyByDate => {
            format!("Monthly on the {}{}", date.day(), ordinal_suffix(date.day()))
        }
        RepeatType::MonthlyByWeekday => {
            monthly_by_weekday_label(date, weekday_ordinal_in_month(date))
        }
        RepeatType::Yearly => format!("Yearly on {}", date.format("%B %-d")),
    }
}

fn monthly_by_weekday_label(date: NaiveDate, ordinal: u32) -> String {
    format!(
        "Monthly on the {} {}",
        ordinal_name(ordinal).unwrap_or("last"),
        weekday_name(date.weekday())
    )
}
