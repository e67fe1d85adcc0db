//! In-memory event collection with recurrence-family reconciliation.
//!
//! Events are kept in insertion order, which doubles as the "creation order"
//! tie-breaker for layout. Families are tracked by an index from `repeat_id`
//! to member ids ordered by start, maintained on every mutation, so scoped
//! deletes and family validation never scan the whole collection.

use std::collections::HashMap;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{CalendarError, Result};
use crate::event::{EditBuffer, Event, EventDraft, EventId, RepeatId};
use crate::query;
use crate::recurrence::expand;
use crate::snapshot::{Calendar, Snapshot};

/// Which members of a family a delete reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeleteScope {
    /// Only the focused event.
    #[default]
    None,
    /// The focused event and every sibling starting at or after it.
    Future,
    /// The whole family.
    All,
}

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: IndexMap<EventId, Event>,
    families: HashMap<RepeatId, Vec<EventId>>,
    calendars: Vec<Calendar>,
    config: EngineConfig,
}

impl EventStore {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Rebuild a store from a persisted snapshot, re-indexing and validating
    /// every family.
    pub fn from_snapshot(snapshot: Snapshot, config: EngineConfig) -> Result<Self> {
        let mut store = Self::new(config);
        store.calendars = snapshot.calendars;
        store.insert_all(snapshot.events);
        let family_ids: Vec<RepeatId> = store.families.keys().copied().collect();
        for repeat_id in family_ids {
            store.validate_family(repeat_id)?;
        }
        Ok(store)
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            events: self.events.values().cloned().collect(),
            calendars: self.calendars.clone(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(&id)
    }

    /// All events in insertion order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    /// Members of a family ordered by start; empty for an unknown id.
    pub fn family(&self, repeat_id: RepeatId) -> Vec<&Event> {
        self.families
            .get(&repeat_id)
            .map(|ids| ids.iter().filter_map(|id| self.events.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn calendars(&self) -> &[Calendar] {
        &self.calendars
    }

    /// Add a calendar, replacing any existing one with the same name.
    pub fn upsert_calendar(&mut self, calendar: Calendar) {
        match self.calendars.iter_mut().find(|c| c.name == calendar.name) {
            Some(existing) => *existing = calendar,
            None => self.calendars.push(calendar),
        }
    }

    /// Persist whatever an editor holds: drafts are added, committed events
    /// are reconciled as edits. Returns the ids of the events written.
    pub fn save(&mut self, buffer: EditBuffer) -> Result<Vec<EventId>> {
        match buffer {
            EditBuffer::Draft(draft) => self.add(draft),
            EditBuffer::Committed(event) => self.update(event),
        }
    }

    /// Commit a draft and insert it together with its expanded family.
    pub fn add(&mut self, draft: EventDraft) -> Result<Vec<EventId>> {
        let seed = draft.commit()?;
        let family = expand(&seed, &self.config)?;
        let ids: Vec<EventId> = family.iter().map(Event::id).collect();
        let repeat_id = seed_repeat_id(&family);

        self.insert_all(family);
        if let Some(repeat_id) = repeat_id {
            self.validate_family(repeat_id)?;
        }

        log::debug!(
            "event=event_add module=store id={} members={}",
            seed.id(),
            ids.len()
        );
        Ok(ids)
    }

    /// Apply an edit to a stored event.
    ///
    /// If the repeat rule is unchanged only the edited event is replaced; its
    /// siblings are untouched. If the rule changed (or repetition was turned
    /// on or off) the whole old family is removed and, when still repeating,
    /// re-expanded with the edited event as the new seed.
    pub fn update(&mut self, edited: Event) -> Result<Vec<EventId>> {
        let id = edited.id();
        let existing = self
            .events
            .get(&id)
            .ok_or(CalendarError::EventNotFound(id))?;
        let old_family = existing.repeat_id();

        if existing.repeat() == edited.repeat() {
            return self.replace_in_place(edited, old_family);
        }

        // Expand before touching the store so a bad rule leaves it intact.
        let family = expand(&edited, &self.config)?;
        let new_family = seed_repeat_id(&family);

        match old_family {
            Some(repeat_id) => {
                self.remove_family(repeat_id);
            }
            None => {
                self.events.shift_remove(&id);
            }
        }

        let ids: Vec<EventId> = family.iter().map(Event::id).collect();
        self.insert_all(family);
        if let Some(repeat_id) = new_family {
            self.validate_family(repeat_id)?;
        }

        log::debug!(
            "event=family_reconcile module=store id={} old_family={:?} new_family={:?} members={}",
            id,
            old_family,
            new_family,
            ids.len()
        );
        Ok(ids)
    }

    fn replace_in_place(
        &mut self,
        mut edited: Event,
        family: Option<RepeatId>,
    ) -> Result<Vec<EventId>> {
        let id = edited.id();
        edited.set_repeat_id(family);
        let previous = self.events.insert(id, edited);

        if let Some(repeat_id) = family {
            self.sort_family(repeat_id);
            if let Err(err) = self.validate_family(repeat_id) {
                if let Some(previous) = previous {
                    self.events.insert(id, previous);
                    self.sort_family(repeat_id);
                }
                return Err(err);
            }
        }
        Ok(vec![id])
    }

    /// Delete the event `id` and, depending on `scope`, its siblings.
    ///
    /// Returns the removed events. Events outside any family ignore `scope`.
    /// Whatever remains of the family is validated afterwards.
    pub fn delete(&mut self, id: EventId, scope: DeleteScope) -> Result<Vec<Event>> {
        let focused = self
            .events
            .get(&id)
            .ok_or(CalendarError::EventNotFound(id))?;
        let focused_start = focused.start();
        let focused_family = focused.repeat_id();

        let targets: Vec<EventId> = match (scope, focused_family) {
            (DeleteScope::None, _) | (_, None) => vec![id],
            (DeleteScope::Future, Some(repeat_id)) => self
                .family(repeat_id)
                .into_iter()
                .filter(|e| e.start() >= focused_start)
                .map(Event::id)
                .collect(),
            (DeleteScope::All, Some(repeat_id)) => {
                self.families.get(&repeat_id).cloned().unwrap_or_default()
            }
        };

        let removed: Vec<Event> = targets
            .iter()
            .filter_map(|target| self.remove_one(*target))
            .collect();

        if let Some(repeat_id) = focused_family {
            if self.families.contains_key(&repeat_id) {
                self.validate_family(repeat_id)?;
            }
        }

        log::debug!(
            "event=event_delete module=store id={} scope={:?} removed={}",
            id,
            scope,
            removed.len()
        );
        Ok(removed)
    }

    /// Check that every member of a family is present and agrees on the
    /// shared fields: repeat rule, `day_count` and `repeat_id`.
    pub fn validate_family(&self, repeat_id: RepeatId) -> Result<()> {
        let inconsistent = |message: String| CalendarError::Consistency { repeat_id, message };

        let ids = self
            .families
            .get(&repeat_id)
            .ok_or_else(|| inconsistent("family is not indexed".to_string()))?;

        let mut reference: Option<&Event> = None;
        for id in ids {
            let member = self
                .events
                .get(id)
                .ok_or_else(|| inconsistent(format!("member {} is missing", id)))?;
            if member.repeat_id() != Some(repeat_id) {
                return Err(inconsistent(format!(
                    "member {} carries repeat id {:?}",
                    id,
                    member.repeat_id()
                )));
            }
            let Some(first) = reference else {
                reference = Some(member);
                continue;
            };
            if member.repeat() != first.repeat() {
                return Err(inconsistent(format!(
                    "member {} has rule {:?}, expected {:?}",
                    id,
                    member.repeat(),
                    first.repeat()
                )));
            }
            if member.day_count() != first.day_count() {
                return Err(inconsistent(format!(
                    "member {} spans {} days, expected {}",
                    id,
                    member.day_count(),
                    first.day_count()
                )));
            }
        }
        Ok(())
    }

    /// Events overlapping `[range_start, range_end]` (or contained in it when
    /// `greedy` is false), sorted by start then insertion order.
    pub fn events_in_range(
        &self,
        range_start: NaiveDate,
        range_end: NaiveDate,
        greedy: bool,
    ) -> Vec<&Event> {
        let mut events = query::events_intersecting(self.events(), range_start, range_end, greedy);
        query::sort_for_layout(&mut events);
        events
    }

    /// Events touching a single day.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.events_in_range(date, date, true)
    }

    fn insert_all(&mut self, events: Vec<Event>) {
        let mut touched: Vec<RepeatId> = Vec::new();
        for event in events {
            if let Some(repeat_id) = event.repeat_id() {
                self.families.entry(repeat_id).or_default().push(event.id());
                if !touched.contains(&repeat_id) {
                    touched.push(repeat_id);
                }
            }
            self.events.insert(event.id(), event);
        }
        for repeat_id in touched {
            self.sort_family(repeat_id);
        }
    }

    fn sort_family(&mut self, repeat_id: RepeatId) {
        let Some(ids) = self.families.get_mut(&repeat_id) else {
            return;
        };
        let events = &self.events;
        ids.sort_by_key(|id| events.get(id).map(Event::start));
    }

    fn remove_family(&mut self, repeat_id: RepeatId) -> Vec<Event> {
        self.families
            .remove(&repeat_id)
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.events.shift_remove(id))
            .collect()
    }

    fn remove_one(&mut self, id: EventId) -> Option<Event> {
        let event = self.events.shift_remove(&id)?;
        if let Some(repeat_id) = event.repeat_id() {
            if let Some(ids) = self.families.get_mut(&repeat_id) {
                ids.retain(|member| *member != id);
                if ids.is_empty() {
                    self.families.remove(&repeat_id);
                }
            }
        }
        Some(event)
    }
}

fn seed_repeat_id(family: &[Event]) -> Option<RepeatId> {
    family.first().and_then(Event::repeat_id)
}
