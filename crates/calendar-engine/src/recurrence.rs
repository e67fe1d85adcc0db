//! Recurrence expansion: one seed event plus a repeat rule becomes a family of
//! sibling events sharing a `repeat_id`.
//!
//! Each [`RepeatType`] maps to its own cadence function through
//! [`RepeatType::cadence`]; adding a cadence means adding a variant and one
//! match arm, and the compiler checks the table is complete.
//!
//! Expansion walks forward from the seed's start date one occurrence at a time
//! and stops at the first date after the (inclusive) end bound. Without an
//! explicit `repeat_end`, the bound is the seed's start plus
//! [`EngineConfig::repeat_horizon_days`], and that bound is written onto every
//! member so the family records where it stops.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::date_math::{
    add_days, days_in_month, first_of_month, nth_weekday_of_month, weekday_ordinal_in_month,
    MONTHS_IN_YEAR,
};
use crate::error::{CalendarError, Result};
use crate::event::Event;

/// How often an event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RepeatType {
    #[default]
    None,
    Daily,
    Weekly,
    /// Same day-of-month; short months overflow into the following month.
    MonthlyByDate,
    /// The n-th occurrence of the seed's weekday, `n` taken from `repeat_value`.
    MonthlyByWeekday,
    Yearly,
}

/// Computes the occurrence after `current`, or `None` when there is none.
pub type Cadence = fn(current: NaiveDate, anchor: &Anchor) -> Option<NaiveDate>;

impl RepeatType {
    pub const ALL: [RepeatType; 6] = [
        RepeatType::None,
        RepeatType::Daily,
        RepeatType::Weekly,
        RepeatType::MonthlyByDate,
        RepeatType::MonthlyByWeekday,
        RepeatType::Yearly,
    ];

    /// The next-occurrence strategy for this repeat type.
    pub fn cadence(self) -> Option<Cadence> {
        match self {
            Self::None => None,
            Self::Daily => Some(next_daily),
            Self::Weekly => Some(next_weekly),
            Self::MonthlyByDate => Some(next_monthly_by_date),
            Self::MonthlyByWeekday => Some(next_monthly_by_weekday),
            Self::Yearly => Some(next_yearly),
        }
    }
}

/// Properties of the seed date that cadences key off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub weekday: Weekday,
    /// 1-based week-of-month ordinal for [`RepeatType::MonthlyByWeekday`].
    pub ordinal: u32,
}

fn next_daily(current: NaiveDate, _: &Anchor) -> Option<NaiveDate> {
    Some(add_days(current, 1))
}

fn next_weekly(current: NaiveDate, _: &Anchor) -> Option<NaiveDate> {
    Some(add_days(current, 7))
}

fn next_monthly_by_date(current: NaiveDate, _: &Anchor) -> Option<NaiveDate> {
    let step = days_in_month(current.year(), current.month0());
    Some(add_days(current, i64::from(step)))
}

fn next_monthly_by_weekday(current: NaiveDate, anchor: &Anchor) -> Option<NaiveDate> {
    // A fifth weekday is missing from most months; skip ahead to the next
    // month that has one. Every weekday occurs five times within any year.
    let (mut year, mut month) = (current.year(), current.month0());
    for _ in 0..MONTHS_IN_YEAR {
        month += 1;
        if month == MONTHS_IN_YEAR {
            month = 0;
            year += 1;
        }
        if let Some(date) = nth_weekday_of_month(anchor.weekday, anchor.ordinal, year, month) {
            return Some(date);
        }
    }
    None
}

fn next_yearly(current: NaiveDate, _: &Anchor) -> Option<NaiveDate> {
    let year = current.year() + 1;
    current.with_year(year).or_else(|| {
        // Feb 29 in a common year rolls over to Mar 1.
        first_of_month(year, current.month0()).map(|first| add_days(first, i64::from(current.day0())))
    })
}

/// Repeat settings shared by every member of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatRule {
    #[serde(default)]
    pub repeat_type: RepeatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_value: Option<u32>,
    /// Last date (inclusive) an occurrence may start on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_end: Option<NaiveDate>,
}

impl RepeatRule {
    pub fn new(repeat_type: RepeatType) -> Self {
        Self {
            repeat_type,
            ..Self::default()
        }
    }

    /// Monthly on the same weekday ordinal `date` has (e.g. second Tuesday).
    pub fn monthly_by_weekday_of(date: NaiveDate) -> Self {
        Self {
            repeat_type: RepeatType::MonthlyByWeekday,
            repeat_value: Some(weekday_ordinal_in_month(date)),
            repeat_end: None,
        }
    }

    pub fn until(mut self, repeat_end: NaiveDate) -> Self {
        self.repeat_end = Some(repeat_end);
        self
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat_type != RepeatType::None
    }

    pub fn validate(&self) -> Result<()> {
        if self.repeat_type == RepeatType::MonthlyByWeekday {
            match self.repeat_value {
                Some(1..=5) => {}
                Some(n) => {
                    return Err(CalendarError::InvalidRule(format!(
                        "week-of-month ordinal must be 1..=5, got {}",
                        n
                    )))
                }
                None => {
                    return Err(CalendarError::InvalidRule(
                        "MonthlyByWeekday requires a week-of-month ordinal".to_string(),
                    ))
                }
            }
        }
        Ok(())
    }

    /// The inclusive end bound for a family seeded on `start`.
    pub fn effective_end(&self, start: NaiveDate, config: &EngineConfig) -> NaiveDate {
        self.repeat_end
            .unwrap_or_else(|| add_days(start, config.repeat_horizon_days))
    }
}

/// Occurrence dates for `rule` starting at `start` (included as the first
/// element), up to and including the rule's end bound.
///
/// Non-repeating rules yield just `start`. At most `config.max_instances`
/// dates are produced.
pub fn occurrences(
    rule: &RepeatRule,
    start: NaiveDate,
    config: &EngineConfig,
) -> Result<Vec<NaiveDate>> {
    rule.validate()?;

    let mut dates = vec![start];
    let Some(cadence) = rule.repeat_type.cadence() else {
        return Ok(dates);
    };

    let end = rule.effective_end(start, config);
    let anchor = Anchor {
        weekday: start.weekday(),
        ordinal: rule.repeat_value.unwrap_or(1),
    };

    let mut current = start;
    while let Some(next) = cadence(current, &anchor) {
        if next > end {
            break;
        }
        if dates.len() >= config.max_instances {
            log::warn!(
                "event=expansion_capped module=recurrence repeat_type={:?} max_instances={}",
                rule.repeat_type,
                config.max_instances
            );
            break;
        }
        dates.push(next);
        current = next;
    }

    Ok(dates)
}

/// Expand `seed` into its full family.
///
/// The seed keeps its id and comes first; every later member gets a fresh id,
/// the seed's time-of-day and length, and the family's new `repeat_id`. A
/// non-repeating seed is returned alone, without a `repeat_id`.
pub fn expand(seed: &Event, config: &EngineConfig) -> Result<Vec<Event>> {
    let mut head = seed.clone();
    if !seed.repeat().is_repeating() {
        head.set_repeat_id(None);
        return Ok(vec![head]);
    }

    let mut rule = *seed.repeat();
    rule.repeat_end = Some(rule.effective_end(seed.start_date(), config));
    let dates = occurrences(&rule, seed.start_date(), config)?;

    let repeat_id = Uuid::new_v4();
    head.set_repeat(rule);
    head.set_repeat_id(Some(repeat_id));

    let time = seed.start().time();
    let mut family = Vec::with_capacity(dates.len());
    for date in dates.iter().skip(1) {
        family.push(head.sibling_at(date.and_time(time)));
    }
    family.insert(0, head);

    log::debug!(
        "event=family_expand module=recurrence repeat_id={} repeat_type={:?} members={}",
        repeat_id,
        rule.repeat_type,
        family.len()
    );

    Ok(family)
}
