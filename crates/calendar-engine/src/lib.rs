//! # calendar-engine
//!
//! Date and event computation for calendar applications: the parts of a
//! calendar that have to be right regardless of how they are drawn.
//!
//! All arithmetic is on naive, local-calendar dates and date-times. Months are
//! 0-based and weeks start on Sunday.
//!
//! ## Modules
//!
//! - [`date_math`]: leap years, month lengths, day arithmetic, week-of-month,
//!   n-th weekday lookups
//! - [`grid`]: year grids of 7-day week rows and a per-year grid cache
//! - [`event`]: events, drafts and the edit buffer
//! - [`recurrence`]: repeat rules and family expansion
//! - [`store`]: the event collection with scoped edit/delete reconciliation
//! - [`layout`]: greedy row packing of events over a date axis
//! - [`query`]: range matching and full-day/multi-day/timed classification
//! - [`snapshot`]: JSON snapshot and the key-value persistence seam
//! - [`view`]: navigation state (layout, focused month/week/day)
//! - [`format`]: display labels for dates, times and repeat rules
//! - [`config`]: engine configuration
//! - [`error`]: error types

pub mod config;
pub mod date_math;
pub mod error;
pub mod event;
pub mod format;
pub mod grid;
pub mod layout;
pub mod query;
pub mod recurrence;
pub mod snapshot;
pub mod store;
pub mod view;

pub use config::EngineConfig;
pub use date_math::YearMonthDay;
pub use error::{CalendarError, Result};
pub use event::{EditBuffer, Event, EventDraft, EventId, RepeatId};
pub use grid::{CalendarGrid, DateIndices, GridCache, Week};
pub use layout::{assign_rows, rows_for_events, AxisSpan};
pub use query::{classify, events_intersecting, EventClass};
pub use recurrence::{expand, RepeatRule, RepeatType};
pub use snapshot::{Calendar, KeyValueStore, MemoryStore, Snapshot};
pub use store::{DeleteScope, EventStore};
pub use view::{CalendarLayout, ViewState};
