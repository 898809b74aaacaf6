//! WASM bindings for availability-engine.
//!
//! Exposes slot computation, booking-attempt checks and month highlighting
//! to JavaScript via `wasm-bindgen`. Request documents and results cross the
//! boundary as JSON strings, in the same shape the availability endpoint
//! uses (`ownerTimezone`, `workingHours`, `bookings`, `eventType`, ...).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p availability-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/availability-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/availability_engine_wasm.wasm
//! ```

use availability_engine::wire::{format_instant, parse_instant};
use availability_engine::{AvailabilityRequest, AvailabilityResponse, TimeSlot};
use chrono::{NaiveDate, TimeZone};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDetailDto {
    start: String,
    end: String,
    available: bool,
}

impl<Z: TimeZone> From<&TimeSlot<Z>> for SlotDetailDto {
    fn from(slot: &TimeSlot<Z>) -> Self {
        Self {
            start: format_instant(&slot.start),
            end: format_instant(&slot.end),
            available: slot.available,
        }
    }
}

// ---------------------------------------------------------------------------
// JSON-level operations (plain `String` errors, usable outside WASM)
// ---------------------------------------------------------------------------

fn parse_request(request_json: &str) -> Result<AvailabilityRequest, String> {
    AvailabilityRequest::from_json(request_json).map_err(|e| e.to_string())
}

fn parse_date(date: Option<&str>) -> Result<Option<NaiveDate>, String> {
    date.map(|d| {
        d.parse::<NaiveDate>()
            .map_err(|e| format!("Invalid date '{}': {}", d, e))
    })
    .transpose()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

/// Available slots as `{"slots":[{start,end}]}`.
pub fn compute_availability_json(
    request_json: &str,
    now: &str,
    date: Option<&str>,
) -> Result<String, String> {
    let request = parse_request(request_json)?;
    let date = request
        .resolve_date(parse_date(date)?)
        .map_err(|e| e.to_string())?;
    let now = parse_instant(now).map_err(|e| e.to_string())?;

    let slots = request.compute(date, now).map_err(|e| e.to_string())?;
    to_json(&AvailabilityResponse::from_slots(&slots))
}

/// Every slot, available or not, as `[{start,end,available}]`.
pub fn compute_all_slots_json(
    request_json: &str,
    now: &str,
    date: Option<&str>,
) -> Result<String, String> {
    let request = parse_request(request_json)?;
    let date = request
        .resolve_date(parse_date(date)?)
        .map_err(|e| e.to_string())?;
    let now = parse_instant(now).map_err(|e| e.to_string())?;

    let slots = request.compute(date, now).map_err(|e| e.to_string())?;
    let dtos: Vec<SlotDetailDto> = slots.iter().map(SlotDetailDto::from).collect();
    to_json(&dtos)
}

/// Whether a booking attempt starting at `start` is still free.
pub fn is_slot_available_json(
    request_json: &str,
    start: &str,
    end: Option<&str>,
) -> Result<bool, String> {
    let request = parse_request(request_json)?;
    let start = parse_instant(start).map_err(|e| e.to_string())?;
    let end = end
        .map(parse_instant)
        .transpose()
        .map_err(|e| e.to_string())?;
    request.check(start, end).map_err(|e| e.to_string())
}

/// Dates of `year`/`month` (1 = January) with working hours, as a JSON array
/// of `YYYY-MM-DD` strings.
pub fn dates_with_availability_json(
    request_json: &str,
    year: i32,
    month: u32,
) -> Result<String, String> {
    let request = parse_request(request_json)?;
    let dates: Vec<String> = request
        .dates(year, month)
        .map_err(|e| e.to_string())?
        .iter()
        .map(|d| d.to_string())
        .collect();
    to_json(&dates)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the available slots for a request document.
///
/// # Arguments
/// - `request_json` -- The request document as JSON
/// - `now` -- Current instant as an ISO 8601 string
/// - `date` -- Optional `YYYY-MM-DD`; defaults to the document's `date`
#[wasm_bindgen(js_name = "computeAvailability")]
pub fn compute_availability(
    request_json: &str,
    now: &str,
    date: Option<String>,
) -> Result<String, JsValue> {
    compute_availability_json(request_json, now, date.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Like `computeAvailability` but returns blocked slots too, each with an
/// `available` flag.
#[wasm_bindgen(js_name = "computeAllSlots")]
pub fn compute_all_slots(
    request_json: &str,
    now: &str,
    date: Option<String>,
) -> Result<String, JsValue> {
    compute_all_slots_json(request_json, now, date.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Re-check a booking attempt against the document's bookings and buffers.
#[wasm_bindgen(js_name = "isSlotAvailable")]
pub fn is_slot_available(
    request_json: &str,
    start: &str,
    end: Option<String>,
) -> Result<bool, JsValue> {
    is_slot_available_json(request_json, start, end.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// List the dates of a month that have working hours.
#[wasm_bindgen(js_name = "datesWithAvailability")]
pub fn dates_with_availability(
    request_json: &str,
    year: i32,
    month: u32,
) -> Result<String, JsValue> {
    dates_with_availability_json(request_json, year, month).map_err(|e| JsValue::from_str(&e))
}
