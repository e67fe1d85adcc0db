//! Tests for snapshot serialization and key-value persistence.

use calendar_engine::snapshot::{load_snapshot, save_snapshot, EVENT_DATA_KEY};
use calendar_engine::{
    Calendar, CalendarError, EngineConfig, EventDraft, EventStore, KeyValueStore, MemoryStore,
    RepeatRule, RepeatType, Snapshot,
};
use chrono::{NaiveDate, NaiveDateTime};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).expect("valid test time")
}

fn populated_store() -> EventStore {
    let mut store = EventStore::default();
    store.upsert_calendar(Calendar::new("Work", "#3366ff"));
    store
        .add(
            EventDraft::new(at(2024, 3, 4, 9, 0))
                .with_end(at(2024, 3, 4, 10, 0))
                .with_title("Planning")
                .with_calendar("Work")
                .with_repeat(RepeatRule::new(RepeatType::Weekly).until(date(2024, 3, 18))),
        )
        .expect("valid draft");
    store
        .add(EventDraft::on_date(date(2024, 3, 8)).with_title("Holiday"))
        .expect("valid draft");
    store
}

// ---------------------------------------------------------------------------
// JSON shape
// ---------------------------------------------------------------------------

#[test]
fn snapshot_roundtrip_rebuilds_families() {
    let store = populated_store();
    let json = store.to_snapshot().to_json().expect("serializes");

    let restored = EventStore::from_snapshot(
        Snapshot::from_json(&json).expect("parses"),
        EngineConfig::default(),
    )
    .expect("families are valid");

    assert_eq!(restored.len(), store.len());
    assert_eq!(restored.calendars(), store.calendars());
    let original: Vec<_> = store.events().cloned().collect();
    let reloaded: Vec<_> = restored.events().cloned().collect();
    assert_eq!(original, reloaded);

    let repeat_id = reloaded[0].repeat_id().expect("first event repeats");
    assert_eq!(restored.family(repeat_id).len(), 3);
}

#[test]
fn dates_are_iso_strings_with_camel_case_keys() {
    let json = populated_store().to_snapshot().to_json().expect("serializes");
    assert!(json.contains(r#""start":"2024-03-04T09:00:00""#), "{json}");
    assert!(json.contains(r#""repeatType":"Weekly""#), "{json}");
    assert!(json.contains(r#""repeatEnd":"2024-03-18""#), "{json}");
    assert!(json.contains(r#""calendarName":"Work""#), "{json}");
    assert!(json.contains(r#""dayCount":1"#), "{json}");
}

#[test]
fn day_count_is_recomputed_on_load() {
    let json = r#"{
        "events": [{
            "id": "6f1c1f9e-54a4-4a53-9a4c-3c3a0d0f2f10",
            "title": "Trip",
            "start": "2024-03-01T08:00:00",
            "end": "2024-03-03T18:00:00",
            "dayCount": 99
        }]
    }"#;
    let snapshot = Snapshot::from_json(json).expect("parses");
    assert_eq!(snapshot.events[0].day_count(), 3);
    assert_eq!(snapshot.events[0].repeat().repeat_type, RepeatType::None);
    assert!(snapshot.calendars.is_empty());
}

#[test]
fn inverted_span_is_rejected_on_load() {
    let json = r#"{"events": [{
        "id": "6f1c1f9e-54a4-4a53-9a4c-3c3a0d0f2f10",
        "start": "2024-03-02T08:00:00",
        "end": "2024-03-01T08:00:00"
    }]}"#;
    assert!(matches!(
        Snapshot::from_json(json),
        Err(CalendarError::Serialization(_))
    ));
}

#[test]
fn inconsistent_family_is_rejected_on_restore() {
    let mut snapshot = populated_store().to_snapshot();
    // Stretch one member so it no longer matches its siblings' day count.
    let member = &mut snapshot.events[1];
    let start = member.start();
    member
        .set_span(start, start + chrono::Duration::days(1))
        .expect("valid span");

    let err = EventStore::from_snapshot(snapshot, EngineConfig::default()).unwrap_err();
    assert!(matches!(err, CalendarError::Consistency { .. }));
}

// ---------------------------------------------------------------------------
// Key-value persistence
// ---------------------------------------------------------------------------

#[test]
fn nothing_saved_loads_as_none() {
    let kv = MemoryStore::new();
    assert!(load_snapshot(&kv).expect("no parse needed").is_none());
}

#[test]
fn saved_snapshot_loads_back() {
    let mut kv = MemoryStore::new();
    let snapshot = populated_store().to_snapshot();
    save_snapshot(&mut kv, &snapshot).expect("saves");

    assert!(kv.get(EVENT_DATA_KEY).is_some());
    let loaded = load_snapshot(&kv).expect("parses").expect("was saved");
    assert_eq!(loaded, snapshot);
}

#[test]
fn corrupt_storage_is_an_error() {
    let mut kv = MemoryStore::new();
    kv.set(EVENT_DATA_KEY, "{not json".to_string());
    assert!(load_snapshot(&kv).is_err());
}
