//! Request/response shapes for the availability endpoint.
//!
//! The storage layer hands over an owner's working hours, timezone, bookings
//! (with their lifecycle status) and one event type. This module turns that
//! document into engine inputs and serializes only the available slots as
//! absolute UTC instants, which is what a booking page consumes.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::availability::compute_availability;
use crate::config::EventTypeConfig;
use crate::conflict::is_slot_available;
use crate::error::{AvailabilityError, Result};
use crate::interval::{BookedInterval, TimeSlot};
use crate::rule::WeeklyRule;
use crate::selector::dates_with_availability;

/// Lifecycle state of a stored booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    #[default]
    Accepted,
    Cancelled,
    Rejected,
}

impl BookingStatus {
    /// Whether a booking in this state blocks the owner's calendar.
    pub fn occupies_calendar(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Accepted)
    }
}

/// A stored booking as the storage layer returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub status: BookingStatus,
}

/// Everything needed to answer an availability query for one owner and one
/// event type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    /// IANA timezone of the owner.
    pub owner_timezone: String,
    /// IANA timezone the visitor wants to see slots in.
    #[serde(default)]
    pub target_timezone: Option<String>,
    /// Requested calendar date, if the document carries one.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub working_hours: Vec<WeeklyRule>,
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
    pub event_type: EventTypeConfig,
}

/// One bookable window on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDto {
    pub start: String,
    pub end: String,
}

impl<Z: TimeZone> From<&TimeSlot<Z>> for SlotDto {
    fn from(slot: &TimeSlot<Z>) -> Self {
        Self {
            start: format_instant(&slot.start),
            end: format_instant(&slot.end),
        }
    }
}

/// The availability endpoint's response body: `{ "slots": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub slots: Vec<SlotDto>,
}

impl AvailabilityResponse {
    /// Keep only available slots, in order.
    pub fn from_slots<Z: TimeZone>(slots: &[TimeSlot<Z>]) -> Self {
        Self {
            slots: slots
                .iter()
                .filter(|s| s.available)
                .map(SlotDto::from)
                .collect(),
        }
    }
}

/// Format an instant as RFC 3339 in UTC with a `Z` suffix.
pub fn format_instant<Z: TimeZone>(dt: &DateTime<Z>) -> String {
    dt.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an RFC 3339 datetime, or a naive `YYYY-MM-DDTHH:MM:SS` read as UTC.
///
/// # Errors
/// Returns [`AvailabilityError::InvalidDatetime`] if neither form matches.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| AvailabilityError::InvalidDatetime(format!("'{}': {}", s, e)))
}

impl AvailabilityRequest {
    /// Parse a request document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AvailabilityError::Request(e.to_string()))
    }

    /// Bookings that occupy the calendar, as engine intervals.
    ///
    /// Cancelled and rejected bookings are dropped.
    ///
    /// # Errors
    /// Returns [`AvailabilityError::InvalidInterval`] if an occupying booking
    /// does not end after it starts.
    pub fn booked_intervals(&self) -> Result<Vec<BookedInterval>> {
        self.bookings
            .iter()
            .filter(|b| b.status.occupies_calendar())
            .map(|b| BookedInterval::new(b.start_time, b.end_time))
            .collect()
    }

    /// The explicit `date` argument, else the document's own date.
    ///
    /// # Errors
    /// Returns [`AvailabilityError::InvalidDate`] if neither is set.
    pub fn resolve_date(&self, date: Option<NaiveDate>) -> Result<NaiveDate> {
        date.or(self.date).ok_or_else(|| {
            AvailabilityError::InvalidDate("no date given and request has none".to_string())
        })
    }

    /// Run the full computation for `date`.
    pub fn compute(&self, date: NaiveDate, now: DateTime<Utc>) -> Result<Vec<TimeSlot<Tz>>> {
        let bookings = self.booked_intervals()?;
        compute_availability(
            date,
            &self.working_hours,
            &bookings,
            &self.event_type,
            &self.owner_timezone,
            self.target_timezone.as_deref(),
            now,
        )
    }

    /// Run the computation and keep only the available slots.
    pub fn respond(&self, date: NaiveDate, now: DateTime<Utc>) -> Result<AvailabilityResponse> {
        self.compute(date, now)
            .map(|slots| AvailabilityResponse::from_slots(&slots))
    }

    /// Re-check a booking attempt immediately before it is committed.
    ///
    /// When `end` is given it must equal `start` plus the event length.
    ///
    /// # Errors
    /// Returns [`AvailabilityError::InvalidInterval`] for a mismatched end,
    /// plus any error from [`is_slot_available`].
    pub fn check(&self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Result<bool> {
        if let Some(end) = end {
            let expected =
                start.checked_add_signed(Duration::minutes(i64::from(self.event_type.length)));
            if expected != Some(end) {
                return Err(AvailabilityError::InvalidInterval(format!(
                    "end {} does not match a {}-minute event starting at {}",
                    format_instant(&end),
                    self.event_type.length,
                    format_instant(&start)
                )));
            }
        }
        let bookings = self.booked_intervals()?;
        is_slot_available(start, &self.event_type, &bookings, &self.owner_timezone)
    }

    /// Dates in `year`/`month` (1 = January) with at least one working-hour rule.
    pub fn dates(&self, year: i32, month: u32) -> Result<Vec<NaiveDate>> {
        dates_with_availability(year, month, &self.working_hours, &self.owner_timezone)
    }
}
