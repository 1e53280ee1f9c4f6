//! WASM bindings for freebusy-engine.
//!
//! Exposes busy merging, free-slot extraction, and availability to the web
//! client via `wasm-bindgen`. All complex types are passed as JSON strings
//! holding RFC 3339 timestamps.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p freebusy-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/freebusy_engine_wasm.wasm
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use freebusy_engine::wire::{self, AvailabilityDto, FreeSlotDto, UtcInterval};
use freebusy_engine::EngineError;
use wasm_bindgen::prelude::*;

fn to_js(e: EngineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, JsValue> {
    wire::parse_timestamp(s).map_err(to_js)
}

/// Read a busy document (bare array or provider response) and merge every calendar.
fn merged_busy(json: &str) -> Result<Vec<UtcInterval>, JsValue> {
    let doc = wire::parse_busy_document(json).map_err(to_js)?;
    Ok(freebusy_engine::merge_sources(&doc.sources))
}

fn serialize<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Merge overlapping and touching busy periods.
///
/// `busy_json` is either a JSON array of `{start, end}` objects or a Google
/// Calendar freeBusy response. Returns a JSON array of `{start, end}` blocks.
#[wasm_bindgen(js_name = "mergeBusy")]
pub fn merge_busy(busy_json: &str) -> Result<String, JsValue> {
    let merged = merged_busy(busy_json)?;
    wire::render_busy(&merged).map_err(to_js)
}

/// Find free slots within `[start, end)`.
///
/// Returns a JSON array of `{start, end, duration_minutes}` objects. An
/// inverted or empty window yields `[]`.
#[wasm_bindgen(js_name = "findFreeSlots")]
pub fn find_free_slots(busy_json: &str, start: &str, end: &str) -> Result<String, JsValue> {
    let merged = merged_busy(busy_json)?;
    let slots = freebusy_engine::free_slots(&merged, parse_instant(start)?, parse_instant(end)?);
    wire::render_free_slots(&slots).map_err(to_js)
}

/// Find the earliest free slot of at least `min_minutes` within `[start, end)`.
///
/// Returns a JSON `{start, end, duration_minutes}` object, or `null` when no
/// slot is long enough.
#[wasm_bindgen(js_name = "findFirstFreeSlot")]
pub fn find_first_free_slot(
    busy_json: &str,
    start: &str,
    end: &str,
    min_minutes: u32,
) -> Result<String, JsValue> {
    let merged = merged_busy(busy_json)?;
    let slot = freebusy_engine::first_free_slot(
        &merged,
        parse_instant(start)?,
        parse_instant(end)?,
        TimeDelta::minutes(i64::from(min_minutes)),
    );
    serialize(&slot.as_ref().map(FreeSlotDto::from))
}

/// Compute busy blocks and free slots from a freeBusy response.
///
/// `start`/`end` override the response's `timeMin`/`timeMax`. Returns a JSON
/// object with `time_min`, `time_max`, `busy`, `free`, and, when any calendar
/// reported errors, `failed_calendars`.
#[wasm_bindgen(js_name = "computeAvailability")]
pub fn compute_availability(
    response_json: &str,
    start: Option<String>,
    end: Option<String>,
) -> Result<String, JsValue> {
    let doc = wire::parse_busy_document(response_json).map_err(to_js)?;
    let start = start.as_deref().map(parse_instant).transpose()?;
    let end = end.as_deref().map(parse_instant).transpose()?;
    let window = doc.window(start, end).map_err(to_js)?;

    let view = freebusy_engine::availability(&doc.sources, window);
    serialize(&AvailabilityDto::new(&view, doc.failed_calendars))
}
