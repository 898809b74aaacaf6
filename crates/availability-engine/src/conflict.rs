//! Mark candidate slots that collide with buffered existing bookings.
//!
//! Each booking is widened to `[start − before_buffer, end + after_buffer]`
//! and tested against every slot with the three-way overlap test of
//! [`BufferedEnvelope::conflicts_with`]. Slots are never removed here.

use chrono::{DateTime, Utc};

use crate::config::EventTypeConfig;
use crate::error::{AvailabilityError, Result};
use crate::interval::{BookedInterval, BufferedEnvelope, TimeSlot};
use crate::projector::validate_timezone;

/// Flag every slot that conflicts with any buffered booking as unavailable.
///
/// Availability is monotonic: a slot that comes in unavailable stays
/// unavailable, and a slot is only ever switched from available to
/// unavailable. Order and length of `slots` are preserved.
pub fn resolve_conflicts(
    slots: Vec<TimeSlot>,
    bookings: &[BookedInterval],
    before_buffer: u32,
    after_buffer: u32,
) -> Vec<TimeSlot> {
    let envelopes: Vec<BufferedEnvelope> = bookings
        .iter()
        .map(|b| b.buffered(before_buffer, after_buffer))
        .collect();

    slots
        .into_iter()
        .map(|mut slot| {
            if slot.available && collides(&slot, &envelopes) {
                slot.available = false;
            }
            slot
        })
        .collect()
}

fn collides(slot: &TimeSlot, envelopes: &[BufferedEnvelope]) -> bool {
    envelopes
        .iter()
        .any(|env| env.conflicts_with(slot.start, slot.end))
}

/// Check a single candidate start against the owner's bookings.
///
/// Builds one slot of `config.length` minutes at `candidate_start` and runs
/// it through the same buffered conflict test as [`resolve_conflicts`].
/// Working hours and notice are not consulted; this is the last check
/// before committing a booking attempt.
///
/// # Errors
/// Returns [`AvailabilityError::InvalidConfig`] for a zero length,
/// [`AvailabilityError::InvalidTimezone`] for an unknown owner zone, or
/// [`AvailabilityError::InvalidInterval`] when the slot would end past the
/// last representable instant.
pub fn is_slot_available(
    candidate_start: DateTime<Utc>,
    config: &EventTypeConfig,
    bookings: &[BookedInterval],
    owner_timezone: &str,
) -> Result<bool> {
    config.validate()?;
    validate_timezone(owner_timezone)?;

    let slot = TimeSlot::starting_at(candidate_start, config.length).ok_or_else(|| {
        AvailabilityError::InvalidInterval(format!(
            "a {}-minute slot starting at {} ends out of range",
            config.length, candidate_start
        ))
    })?;
    let resolved = resolve_conflicts(
        vec![slot],
        bookings,
        config.before_buffer,
        config.after_buffer,
    );
    Ok(resolved.first().is_some_and(|s| s.available))
}
