//! WASM bindings for calendar-engine.
//!
//! Exposes year grids, recurrence expansion, range queries, classification and
//! row packing to JavaScript via `wasm-bindgen`. Complex values cross the
//! boundary as JSON strings; events use the same camelCase shape as the
//! persisted snapshot, with ISO 8601 naive date-times.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p calendar-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/calendar-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/calendar_engine_wasm.wasm
//! ```

use calendar_engine::{EngineConfig, Event};
use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct GridDto {
    year: i32,
    /// Week rows of seven `YYYY-MM-DD` strings, Sunday first.
    weeks: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse a `YYYY-MM-DD` date string.
fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_events_json(json: &str) -> Result<Vec<Event>, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid events JSON: {}", e)))
}

fn parse_config(config_toml: Option<String>) -> Result<EngineConfig, JsValue> {
    match config_toml {
        Some(toml) => EngineConfig::from_toml_str(&toml).map_err(js_error),
        None => Ok(EngineConfig::default()),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Build the Sunday-first week grid for `year`.
///
/// Returns `{year, weeks}` where `weeks` is an array of 7-element arrays of
/// `YYYY-MM-DD` strings, padded with days of the neighbouring years.
#[wasm_bindgen(js_name = "buildYearGrid")]
pub fn build_year_grid(year: i32) -> Result<String, JsValue> {
    let grid = calendar_engine::CalendarGrid::build(year);
    let dto = GridDto {
        year,
        weeks: grid
            .weeks()
            .iter()
            .map(|w| w.days().iter().map(|d| d.to_string()).collect())
            .collect(),
    };
    to_json(&dto)
}

/// `{month, week, day}` of today in the `year` grid, or `null` when today is
/// in another year.
#[wasm_bindgen(js_name = "todayIndices")]
pub fn today_indices(year: i32) -> Result<String, JsValue> {
    to_json(&calendar_engine::CalendarGrid::build(year).today_indices())
}

/// Expand a committed repeating event into its family.
///
/// `event_json` is one event object; `config_toml` optionally overrides the
/// engine configuration. Returns a JSON array of events, seed first.
#[wasm_bindgen(js_name = "expandEvent")]
pub fn expand_event(event_json: &str, config_toml: Option<String>) -> Result<String, JsValue> {
    let seed: Event = serde_json::from_str(event_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid event JSON: {}", e)))?;
    let config = parse_config(config_toml)?;
    let family = calendar_engine::expand(&seed, &config).map_err(js_error)?;
    to_json(&family)
}

/// Events from `events_json` that qualify for `[range_start, range_end]`,
/// sorted by start. `greedy` selects overlap rather than containment.
#[wasm_bindgen(js_name = "eventsInRange")]
pub fn events_in_range(
    events_json: &str,
    range_start: &str,
    range_end: &str,
    greedy: bool,
) -> Result<String, JsValue> {
    let events = parse_events_json(events_json)?;
    let rs = parse_date(range_start)?;
    let re = parse_date(range_end)?;

    let mut found = calendar_engine::events_intersecting(&events, rs, re, greedy);
    calendar_engine::query::sort_for_layout(&mut found);
    to_json(&found)
}

/// `{full_day, multi_day, timed}` flags for one event.
#[wasm_bindgen(js_name = "classifyEvent")]
pub fn classify_event(event_json: &str) -> Result<String, JsValue> {
    let event: Event = serde_json::from_str(event_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid event JSON: {}", e)))?;
    to_json(&calendar_engine::classify(&event))
}

/// Row index for each event laid out over `axis_len` consecutive days starting
/// at `axis_start`. Events are taken in the given order; entries are `null`
/// for events that miss the axis.
#[wasm_bindgen(js_name = "assignEventRows")]
pub fn assign_event_rows(
    events_json: &str,
    axis_start: &str,
    axis_len: u32,
) -> Result<String, JsValue> {
    let events = parse_events_json(events_json)?;
    let first = parse_date(axis_start)?;
    let axis: Vec<NaiveDate> = first.iter_days().take(axis_len as usize).collect();

    let refs: Vec<&Event> = events.iter().collect();
    to_json(&calendar_engine::rows_for_events(&refs, &axis))
}
