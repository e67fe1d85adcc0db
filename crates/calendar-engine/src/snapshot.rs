//! Versionless persistence snapshot and the key-value store it is written to.
//!
//! The engine owns the JSON shape; where the bytes end up is the host's
//! business, behind [`KeyValueStore`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::event::Event;

/// Key under which the event snapshot is stored.
pub const EVENT_DATA_KEY: &str = "calendarAppEventData";

/// Key under which the calendar view state is stored.
pub const CALENDAR_DATA_KEY: &str = "calendarAppCalendarData";

/// A named calendar that events refer to through `calendar_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

impl Calendar {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub calendars: Vec<Calendar>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a snapshot; every event is validated as it is read.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Opaque string storage provided by the host (browser local storage, a file,
/// a database row).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

pub fn save_snapshot<S: KeyValueStore + ?Sized>(store: &mut S, snapshot: &Snapshot) -> Result<()> {
    store.set(EVENT_DATA_KEY, snapshot.to_json()?);
    log::debug!(
        "event=snapshot_save module=snapshot events={} calendars={}",
        snapshot.events.len(),
        snapshot.calendars.len()
    );
    Ok(())
}

/// Load the stored snapshot; `Ok(None)` when nothing has been saved yet.
pub fn load_snapshot<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Snapshot>> {
    store
        .get(EVENT_DATA_KEY)
        .map(|json| Snapshot::from_json(&json))
        .transpose()
}
