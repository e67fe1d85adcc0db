//! The event entity, its draft form, and the edit buffer that holds either.
//!
//! An [`Event`] always has an id and a valid span (`end >= start`); the
//! cached `day_count` is recomputed whenever the span changes and is never
//! read back from serialized input. Unsaved edits live in an
//! [`EventDraft`], which must be committed before it can enter a store.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_math::difference_in_days;
use crate::error::{CalendarError, Result};
use crate::recurrence::RepeatRule;

pub type EventId = Uuid;
pub type RepeatId = Uuid;

/// A committed calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord", into = "EventRecord")]
pub struct Event {
    id: EventId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub calendar_name: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    day_count: u32,
    all_day: Option<bool>,
    repeat: RepeatRule,
    repeat_id: Option<RepeatId>,
}

impl Event {
    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// Calendar days covered, counting both the start and end day.
    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    pub fn repeat(&self) -> &RepeatRule {
        &self.repeat
    }

    pub fn repeat_id(&self) -> Option<RepeatId> {
        self.repeat_id
    }

    /// Explicit all-day flag if one was set, otherwise whether both endpoints
    /// sit at midnight.
    pub fn is_all_day(&self) -> bool {
        self.all_day
            .unwrap_or_else(|| is_midnight(self.start) && is_midnight(self.end))
    }

    pub fn all_day_override(&self) -> Option<bool> {
        self.all_day
    }

    pub fn set_all_day_override(&mut self, all_day: Option<bool>) {
        self.all_day = all_day;
    }

    /// Replace the span, keeping `day_count` in step.
    pub fn set_span(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
        self.day_count = day_count(start, end)?;
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Change the repeat rule. A store reconciles the family when the edited
    /// event is saved.
    pub fn set_repeat(&mut self, rule: RepeatRule) {
        self.repeat = rule;
    }

    pub(crate) fn set_repeat_id(&mut self, repeat_id: Option<RepeatId>) {
        self.repeat_id = repeat_id;
    }

    /// A new family member starting at `start`, with a fresh id and the same
    /// length and fields as `self`.
    pub(crate) fn sibling_at(&self, start: NaiveDateTime) -> Self {
        let end = start + (self.end - self.start);
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            ..self.clone()
        }
    }
}

fn is_midnight(dt: NaiveDateTime) -> bool {
    dt.time().num_seconds_from_midnight() == 0
}

fn day_count(start: NaiveDateTime, end: NaiveDateTime) -> Result<u32> {
    if end < start {
        return Err(CalendarError::InvalidSpan { start, end });
    }
    let days = difference_in_days(start.date(), end.date());
    Ok(u32::try_from(days).unwrap_or(u32::MAX).saturating_add(1))
}

/// An event that has not been saved yet: no id, no family.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub calendar_name: String,
    pub start: NaiveDateTime,
    /// Defaults to `start` when absent.
    pub end: Option<NaiveDateTime>,
    pub all_day: Option<bool>,
    pub repeat: RepeatRule,
}

impl EventDraft {
    /// Factory with every optional field defaulted.
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            location: String::new(),
            calendar_name: String::new(),
            start,
            end: None,
            all_day: None,
            repeat: RepeatRule::default(),
        }
    }

    /// A single all-day event on `date`.
    pub fn on_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(NaiveTime::default()))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_calendar(mut self, calendar_name: impl Into<String>) -> Self {
        self.calendar_name = calendar_name.into();
        self
    }

    pub fn with_repeat(mut self, repeat: RepeatRule) -> Self {
        self.repeat = repeat;
        self
    }

    /// Validate the draft and give it a fresh id.
    pub fn commit(self) -> Result<Event> {
        let end = self.end.unwrap_or(self.start);
        let day_count = day_count(self.start, end)?;
        self.repeat.validate()?;
        Ok(Event {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            location: self.location,
            calendar_name: self.calendar_name,
            start: self.start,
            end,
            day_count,
            all_day: self.all_day,
            repeat: self.repeat,
            repeat_id: None,
        })
    }
}

/// What an editor is currently holding: a new draft or a copy of a saved event.
#[derive(Debug, Clone, PartialEq)]
pub enum EditBuffer {
    Draft(EventDraft),
    Committed(Event),
}

impl EditBuffer {
    pub fn id(&self) -> Option<EventId> {
        match self {
            Self::Draft(_) => None,
            Self::Committed(event) => Some(event.id()),
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft(_))
    }
}

impl From<EventDraft> for EditBuffer {
    fn from(draft: EventDraft) -> Self {
        Self::Draft(draft)
    }
}

impl From<Event> for EditBuffer {
    fn from(event: Event) -> Self {
        Self::Committed(event)
    }
}

/// Wire form of [`Event`]: camelCase keys, ISO-8601 naive date-times.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    id: EventId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    calendar_name: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    /// Written for readers of the snapshot; ignored on load.
    #[serde(default, skip_deserializing)]
    day_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_all_day: Option<bool>,
    #[serde(flatten)]
    repeat: RepeatRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    repeat_id: Option<RepeatId>,
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            location: event.location,
            calendar_name: event.calendar_name,
            start: event.start,
            end: event.end,
            day_count: event.day_count,
            is_all_day: event.all_day,
            repeat: event.repeat,
            repeat_id: event.repeat_id,
        }
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = CalendarError;

    fn try_from(record: EventRecord) -> Result<Self> {
        let day_count = day_count(record.start, record.end)?;
        record.repeat.validate()?;
        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            location: record.location,
            calendar_name: record.calendar_name,
            start: record.start,
            end: record.end,
            day_count,
            all_day: record.is_all_day,
            repeat: record.repeat,
            repeat_id: record.repeat_id,
        })
    }
}
