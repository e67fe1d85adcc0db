//! Error types for calendar-engine operations.

use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CalendarError {
    /// A (year, 0-based month, day) triple that names no calendar date.
    #[error("Invalid date: {year}-{month}-{day} (month is 0-based)")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// An event whose end precedes its start.
    #[error("Invalid event span: end {end} is before start {start}")]
    InvalidSpan {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Invalid repeat rule: {0}")]
    InvalidRule(String),

    #[error("Event not found: {0}")]
    EventNotFound(Uuid),

    /// A recurrence family broke one of its shared-field invariants.
    #[error("Recurrence family {repeat_id} is inconsistent: {message}")]
    Consistency { repeat_id: Uuid, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
